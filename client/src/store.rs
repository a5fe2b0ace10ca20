//! Sync store - the canonical in-memory collection.
//!
//! The store owns `items`, `is_loading` and `last_error`, and is the only
//! writer of them. Consumers read snapshots or subscribe to changes.
//!
//! Reconciliation after each mutation:
//! - create / update: full re-list, because create does not return the new
//!   id and update may change fields the client does not know about
//! - delete: local removal by id
//!
//! Operations are not serialized. Two overlapping calls share one loading
//! flag, so the flag can drop to `false` while another call is still pending.

use crate::{Fields, HttpTransport, ItemRecord, RecordRef, RemoteAccess, Transport};
use std::sync::Arc;
use tokio::sync::watch;

/// Message stored when listing fails.
pub const FETCH_FAILED: &str = "Failed to fetch items.";
/// Message stored when a create fails.
pub const CREATE_FAILED: &str = "Failed to create item.";
/// Message stored when an update fails.
pub const UPDATE_FAILED: &str = "Failed to update item.";
/// Message stored when a delete fails.
pub const DELETE_FAILED: &str = "Failed to delete item.";

/// Read-only view published to consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Records in remote listing order
    pub items: Vec<ItemRecord>,
    /// True while an operation is in flight
    pub is_loading: bool,
    /// Description of the most recent failure
    pub last_error: Option<String>,
}

/// Shared handle to the store. Clones refer to the same state.
pub struct SyncStore<T = HttpTransport> {
    remote: Arc<RemoteAccess<T>>,
    state: Arc<watch::Sender<StoreState>>,
}

impl<T> Clone for SyncStore<T> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Transport> SyncStore<T> {
    /// Create an empty, idle store without contacting the remote.
    pub fn new(remote: RemoteAccess<T>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            remote: Arc::new(remote),
            state: Arc::new(state),
        }
    }

    /// Create a store and load the collection once.
    pub async fn open(remote: RemoteAccess<T>) -> Self {
        let store = Self::new(remote);
        store.refresh().await;
        store
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Current records, cloned out of the state cell.
    pub fn items(&self) -> Vec<ItemRecord> {
        self.state.borrow().items.clone()
    }

    /// Whether the most recently started or finished operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Message of the latest failure since the last operation began.
    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Re-list the collection and replace `items` wholesale.
    pub async fn refresh(&self) {
        self.begin();
        self.reload().await;
        self.finish();
    }

    /// Create a record, then re-list whether or not the create succeeded.
    pub async fn create(&self, fields: Fields) {
        self.begin();
        if let Err(e) = self.remote.create(&fields).await {
            tracing::error!("Create item failed: {}", e);
            self.fail(CREATE_FAILED);
        }
        self.reload().await;
        self.finish();
    }

    /// Update the record described by a flat `{ id, ...fields }` mapping,
    /// then re-list.
    ///
    /// Always returns `false`; the outcome is visible only through
    /// `last_error` and the refreshed `items`.
    pub async fn update(&self, record: Fields) -> bool {
        self.begin();
        match ItemRecord::from_flat(record) {
            Ok(record) => {
                match self.remote.update(record.id(), record.fields()).await {
                    Ok(true) => {}
                    Ok(false) => self.fail(UPDATE_FAILED),
                    Err(e) => {
                        tracing::error!(id = %record.id(), "Update item failed: {}", e);
                        self.fail(UPDATE_FAILED);
                    }
                }
                self.reload().await;
            }
            Err(e) => {
                tracing::error!("Update item failed: {}", e);
                self.fail(UPDATE_FAILED);
            }
        }
        self.finish();
        false
    }

    /// Delete a record and drop it from `items` if the remote confirms.
    pub async fn delete<'a>(&self, target: impl Into<RecordRef<'a>>) -> bool {
        self.begin();
        let target = target.into();
        let deleted = match self.remote.delete(target).await {
            Ok(true) => {
                if let Some(id) = target.id() {
                    self.state
                        .send_modify(|state| state.items.retain(|item| item.id() != id));
                }
                true
            }
            Ok(false) => false,
            Err(e) => {
                tracing::error!("Delete item failed: {}", e);
                false
            }
        };
        if !deleted {
            self.fail(DELETE_FAILED);
        }
        self.finish();
        deleted
    }

    async fn reload(&self) {
        match self.remote.list().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Refreshed items");
                self.state.send_modify(|state| state.items = items);
            }
            Err(e) => {
                tracing::error!("Fetch items failed: {}", e);
                self.fail(FETCH_FAILED);
            }
        }
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.last_error = None;
        });
    }

    fn finish(&self) {
        self.state.send_modify(|state| state.is_loading = false);
    }

    fn fail(&self, message: &str) {
        self.state
            .send_modify(|state| state.last_error = Some(message.to_string()));
    }
}
