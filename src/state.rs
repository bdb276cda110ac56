use crate::{
    config::RuntimeConfiguration,
    error::{GetDatabaseConnectionSnafu, MigrateSnafu, OpenDatabaseSnafu, RollcallResult},
    maud_conveniences::render_nav,
    routes::sse::SseEvent,
};
use maud::{DOCTYPE, Markup, html};
use snafu::ResultExt;
use sqlx::{Pool, Sqlite, pool::PoolConnection, sqlite::SqlitePoolOptions};
use std::ops::Deref;
use tokio::sync::broadcast::{Receiver, Sender, channel};

#[derive(Clone, Debug)]
pub struct RollcallState {
    pool: Pool<Sqlite>,
    config: RuntimeConfiguration,
    sse_events_sender: Sender<SseEvent>,
}

impl RollcallState {
    pub async fn new(
        options: SqlitePoolOptions,
        config: RuntimeConfiguration,
    ) -> RollcallResult<Self> {
        let pool = options
            .connect_with(config.db_config().connect_options())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        let (tx, _rx) = channel(16);

        Ok(Self {
            pool,
            config,
            sse_events_sender: tx,
        })
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Rollcall" }
                }
                body hx-ext="sse" class="bg-gray-900 h-screen flex flex-col items-center justify-center text-white" {
                    (render_nav())
                    (markup)
                }
            }
        }
    }

    #[allow(dead_code)]
    pub fn config(&self) -> RuntimeConfiguration {
        self.config.clone()
    }

    pub async fn get_connection(&self) -> RollcallResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<SseEvent> {
        self.sse_events_sender.subscribe()
    }

    pub fn send_sse_event(&self, event: SseEvent) {
        let _ = self.sse_events_sender.send(event);
    }

    pub async fn sensible_shutdown(&self) -> RollcallResult<()> {
        self.pool.close().await;
        Ok(())
    }
}

impl Deref for RollcallState {
    type Target = Pool<Sqlite>;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

#[cfg(test)]
impl RollcallState {
    ///State backed by a throwaway SQLite file, for exercising handlers directly.
    pub async fn for_tests() -> (tempfile::TempDir, Self) {
        let dir = tempfile::tempdir().expect("unable to make temp dir");
        let path = dir.path().join("rollcall.db");
        let config = RuntimeConfiguration::with_db_path(path.to_string_lossy());
        let state = Self::new(SqlitePoolOptions::new().max_connections(5), config)
            .await
            .expect("unable to create test state");
        (dir, state)
    }
}
