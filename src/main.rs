#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    routes::{
        all_students::{
            delete_student, get_students, internal_get_close_dialog, internal_get_confirm_delete,
            internal_get_student_form, internal_get_student_in_detail, internal_get_students,
            put_student,
        },
        index::get_index_route,
        sse::sse_feed,
    },
    state::RollcallState,
};
use axum::{Router, routing::get};
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod maud_conveniences;
mod routes;
mod state;

async fn shutdown_signal(state: RollcallState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    if let Err(e) = state.sensible_shutdown().await {
        error!(?e, "Error sensibly shutting down");
    }
    warn!("signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() {
    //a missing .env just means the defaults apply
    let _ = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    let options = SqlitePoolOptions::new().max_connections(15);
    let config = RuntimeConfiguration::new();
    let state = RollcallState::new(options, config)
        .await
        .expect("unable to create state");

    let trace_layer = TraceLayer::new_for_http();

    let app = Router::new()
        .route("/", get(get_index_route))
        .route(
            "/students",
            get(get_students).put(put_student).delete(delete_student),
        )
        .route("/internal/get_students", get(internal_get_students))
        .route("/internal/get_student", get(internal_get_student_in_detail))
        .route("/internal/students/form", get(internal_get_student_form))
        .route(
            "/internal/students/confirm_delete",
            get(internal_get_confirm_delete),
        )
        .route(
            "/internal/students/close_dialog",
            get(internal_get_close_dialog),
        )
        .route("/sse_feed", get(sse_feed))
        .layer(trace_layer)
        .with_state(state.clone());

    let server_ip =
        env::var("ROLLCALL_SERVER_IP").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = TcpListener::bind(&server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("unable to serve app");
}
