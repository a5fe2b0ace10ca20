//! Tables keyed by contract and table name.
//!
//! Each table keeps its rows in insertion order, which is also the listing
//! order clients observe.

use dashmap::DashMap;
use tabsync::{Fields, RemoteEntry};

/// Identifies one table: `(contract, table)`.
pub type TableKey = (String, String);

/// A stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub entry_id: String,
    pub data: Fields,
}

impl StoredEntry {
    /// Convert to the wire envelope.
    pub fn to_remote(&self) -> RemoteEntry {
        RemoteEntry::new(self.entry_id.clone(), self.data.clone())
    }
}

/// All tables of the stand-in store.
#[derive(Debug, Default)]
pub struct Tables {
    tables: DashMap<TableKey, Vec<StoredEntry>>,
}

fn key(contract: &str, table: &str) -> TableKey {
    (contract.to_string(), table.to_string())
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row of a table in insertion order. Unknown tables are empty.
    pub fn list(&self, contract: &str, table: &str) -> Vec<StoredEntry> {
        self.tables
            .get(&key(contract, table))
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    /// Append a row under a fresh id, creating the table on first use.
    pub fn insert(&self, contract: &str, table: &str, data: Fields) -> StoredEntry {
        let entry = StoredEntry {
            entry_id: uuid::Uuid::new_v4().to_string(),
            data,
        };

        self.tables
            .entry(key(contract, table))
            .or_default()
            .push(entry.clone());

        tracing::debug!(contract, table, entry_id = %entry.entry_id, "Row inserted");
        entry
    }

    /// Merge `data` into an existing row. Returns the updated row.
    pub fn update(
        &self,
        contract: &str,
        table: &str,
        entry_id: &str,
        data: Fields,
    ) -> Option<StoredEntry> {
        let mut rows = self.tables.get_mut(&key(contract, table))?;
        let row = rows.iter_mut().find(|row| row.entry_id == entry_id)?;
        row.data.extend(data);

        tracing::debug!(contract, table, entry_id, "Row updated");
        Some(row.clone())
    }

    /// Remove a row. Returns whether it existed.
    pub fn delete(&self, contract: &str, table: &str, entry_id: &str) -> bool {
        let Some(mut rows) = self.tables.get_mut(&key(contract, table)) else {
            return false;
        };
        let before = rows.len();
        rows.retain(|row| row.entry_id != entry_id);
        let removed = rows.len() != before;

        if removed {
            tracing::debug!(contract, table, entry_id, "Row deleted");
        }
        removed
    }

    /// Number of rows in a table.
    pub fn len(&self, contract: &str, table: &str) -> usize {
        self.tables
            .get(&key(contract, table))
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, contract: &str, table: &str) -> bool {
        self.len(contract, table) == 0
    }

    /// Number of tables that have been written to.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Rows across every table.
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|rows| rows.len()).sum()
    }
}
