//! Payload shapes exchanged with the remote collection endpoint.

use crate::Fields;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the remote store.
///
/// Some deployments hand out numeric row ids, others opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Text(text) => f.write_str(text),
            EntryId::Number(number) => write!(f, "{}", number),
        }
    }
}

/// A single row as the remote store returns it: `{ entry_id, data: {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEntry {
    #[serde(default)]
    pub entry_id: Option<EntryId>,
    #[serde(default)]
    pub data: Fields,
}

impl RemoteEntry {
    /// Create an entry with a textual id.
    pub fn new(entry_id: impl Into<String>, data: Fields) -> Self {
        Self {
            entry_id: Some(EntryId::Text(entry_id.into())),
            data,
        }
    }
}

/// Body of `GET /{contract}/data/{table}/all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    /// `null` and a missing key both mean an empty table.
    #[serde(default)]
    pub data: Option<Vec<RemoteEntry>>,
}

impl ListResponse {
    /// Wrap a listing.
    pub fn new(entries: Vec<RemoteEntry>) -> Self {
        Self {
            data: Some(entries),
        }
    }

    /// Consume the response, yielding its entries.
    pub fn into_entries(self) -> Vec<RemoteEntry> {
        self.data.unwrap_or_default()
    }
}

/// Body of `POST /{contract}/data/store`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRequest {
    pub table_name: String,
    pub data: Fields,
}

/// Body of `PUT /{contract}/data/{table}/update/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub data: Fields,
}

/// Body returned by store and update calls. The client does not rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryResponse {
    pub data: RemoteEntry,
}
