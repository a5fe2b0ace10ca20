//! Table data routes, mirroring the hosted store's paths.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use tabsync::{EntryResponse, ListResponse, StoreRequest, UpdateRequest};

use crate::error::Result;
use crate::handlers::{
    handle_delete, handle_list, handle_store, handle_update, DeleteResponse, ListQuery,
};
use crate::AppState;

/// Create data routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{contract}/data/{table}/all", get(list_handler))
        .route("/{contract}/data/store", post(store_handler))
        .route("/{contract}/data/{table}/update/{id}", put(update_handler))
        .route("/{contract}/data/{table}/delete/{id}", delete(delete_handler))
}

/// GET /{contract}/data/{table}/all - List a table.
async fn list_handler(
    State(state): State<AppState>,
    Path((contract, table)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let response = handle_list(&state.tables, &contract, &table, query)?;
    Ok(Json(response))
}

/// POST /{contract}/data/store - Insert a row.
async fn store_handler(
    State(state): State<AppState>,
    Path(contract): Path<String>,
    Json(request): Json<StoreRequest>,
) -> Result<Json<EntryResponse>> {
    let response = handle_store(&state.tables, &contract, request)?;
    Ok(Json(response))
}

/// PUT /{contract}/data/{table}/update/{id} - Merge fields into a row.
async fn update_handler(
    State(state): State<AppState>,
    Path((contract, table, id)): Path<(String, String, String)>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<EntryResponse>> {
    let response = handle_update(&state.tables, &contract, &table, &id, request)?;
    Ok(Json(response))
}

/// DELETE /{contract}/data/{table}/delete/{id} - Remove a row.
async fn delete_handler(
    State(state): State<AppState>,
    Path((contract, table, id)): Path<(String, String, String)>,
) -> Result<Json<DeleteResponse>> {
    let response = handle_delete(&state.tables, &contract, &table, &id)?;
    Ok(Json(response))
}
