use dotenvy::var;
use sqlx::sqlite::SqliteConnectOptions;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> Self {
        Self {
            db_config: Arc::new(DbConfig::new()),
        }
    }

    pub fn with_db_path(path: impl Into<String>) -> Self {
        Self {
            db_config: Arc::new(DbConfig::with_path(path)),
        }
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }
}

#[derive(Debug)]
pub struct DbConfig {
    path: String,
}

impl DbConfig {
    pub fn new() -> Self {
        Self {
            path: var("ROLLCALL_DB_PATH").unwrap_or_else(|_| "rollcall.db".to_string()),
        }
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
    }
}
