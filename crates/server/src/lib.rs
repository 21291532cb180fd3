//! Minicrm server library.
//!
//! This crate provides the web application as a library, allowing the
//! router to be built in-process for tests as well as by the binary.
//!
//! # Architecture
//!
//! - Axum web framework with Askama server-side rendering
//! - tower-sessions cookie sessions backed by an in-memory store
//! - In-memory credential store and customer registry (lost on restart)
//! - Append-only line-delimited JSON security log on the filesystem

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seclog;
pub mod services;
pub mod state;
pub mod store;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router with session and trace layers applied.
///
/// The binary wraps this with Sentry layers; tests drive it directly.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
