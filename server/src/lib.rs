//! Tabsync Server - in-memory stand-in for the remote tabular store.
//!
//! Speaks the same four request shapes as the hosted store, so `tabsync`
//! clients can be developed and tested against a local process. Data lives
//! only in memory and is lost on shutdown.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;

use crate::db::Tables;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone, Default)]
pub struct AppState {
    pub tables: Arc<Tables>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the router with tracing and permissive CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
