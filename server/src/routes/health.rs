//! Liveness and store summary.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Tables created so far, across all contracts
    pub tables: usize,
    /// Rows held across all tables
    pub rows: usize,
}

/// Create health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(banner))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        tables: state.tables.table_count(),
        rows: state.tables.row_count(),
    })
}

async fn banner() -> &'static str {
    "Tabsync stand-in store: GET /{contract}/data/{table}/all"
}
