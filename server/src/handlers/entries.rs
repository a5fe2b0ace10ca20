//! Entry handlers - list, store, update and delete rows.

use crate::db::Tables;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use tabsync::{EntryResponse, ListResponse, StoreRequest, UpdateRequest};

/// Query parameters for listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only `json` is supported
    pub format: Option<String>,
}

/// Response for delete.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeleteResponse {
    pub entry_id: String,
}

/// List every row of a table.
pub fn handle_list(
    tables: &Tables,
    contract: &str,
    table: &str,
    query: ListQuery,
) -> Result<ListResponse> {
    if let Some(format) = query.format.as_deref() {
        if format != "json" {
            return Err(AppError::BadRequest(format!("unsupported format: {}", format)));
        }
    }

    let entries = tables
        .list(contract, table)
        .iter()
        .map(|row| row.to_remote())
        .collect();
    Ok(ListResponse::new(entries))
}

/// Insert a new row into `request.table_name`.
pub fn handle_store(tables: &Tables, contract: &str, request: StoreRequest) -> Result<EntryResponse> {
    let table = request.table_name.trim();
    if table.is_empty() {
        return Err(AppError::BadRequest("table_name is required".to_string()));
    }

    let row = tables.insert(contract, table, request.data);
    Ok(EntryResponse {
        data: row.to_remote(),
    })
}

/// Merge fields into an existing row.
pub fn handle_update(
    tables: &Tables,
    contract: &str,
    table: &str,
    entry_id: &str,
    request: UpdateRequest,
) -> Result<EntryResponse> {
    let row = tables
        .update(contract, table, entry_id, request.data)
        .ok_or_else(|| AppError::NotFound(format!("entry {} not found", entry_id)))?;

    Ok(EntryResponse {
        data: row.to_remote(),
    })
}

/// Remove a row.
pub fn handle_delete(
    tables: &Tables,
    contract: &str,
    table: &str,
    entry_id: &str,
) -> Result<DeleteResponse> {
    if !tables.delete(contract, table, entry_id) {
        return Err(AppError::NotFound(format!("entry {} not found", entry_id)));
    }

    Ok(DeleteResponse {
        entry_id: entry_id.to_string(),
    })
}
