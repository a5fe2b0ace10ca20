//! # Tabsync
//!
//! A client-side sync layer that keeps an in-memory collection of item records
//! in step with a remote tabular data store reached over HTTP.
//!
//! ## Design Principles
//!
//! - **Server is the source of truth**: local state is rebuilt from a full
//!   listing after every create or update; only deletes patch local state
//! - **Explicit state container**: the [`SyncStore`] is constructed and handed
//!   to consumers, never looked up from ambient globals
//! - **Failures stay inside**: store operations never return errors to the
//!   presentation layer; they set [`StoreState::last_error`] instead
//! - **Pluggable transport**: the [`Transport`] trait is the only IO seam
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! An [`ItemRecord`] is a flat object with a server-assigned `id` and an open,
//! ordered set of [`Fields`]. The remote store wraps each row in an envelope
//! `{ entry_id, data }`; [`ItemRecord::from_entry`] flattens it.
//!
//! ### Remote Access
//!
//! [`RemoteAccess`] is a stateless mapping from the four logical operations
//! (list, create, update, delete) to HTTP requests against one collection
//! endpoint.
//!
//! ### Synchronization Store
//!
//! [`SyncStore`] owns the canonical `items` list plus the `is_loading` flag
//! and the `last_error` slot, and publishes snapshots through a
//! `tokio::sync::watch` channel.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tabsync::{Config, RemoteAccess, SyncStore};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let remote = RemoteAccess::from_config(&Config::from_env()?);
//! let store = SyncStore::open(remote).await;
//!
//! let fields = json!({"name": "Buy milk"}).as_object().cloned().unwrap_or_default();
//! store.create(fields).await;
//!
//! for item in store.items() {
//!     println!("{} {:?}", item.id(), item.get("name"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod record;
pub mod remote;
pub mod store;
pub mod transport;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types at crate root
pub use config::{Config, ConfigError};
pub use error::{Error, Result, TransportError};
pub use record::{Fields, ItemRecord, RecordRef, ID_FIELD};
pub use remote::RemoteAccess;
pub use store::{StoreState, SyncStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport};
pub use wire::{EntryId, EntryResponse, ListResponse, RemoteEntry, StoreRequest, UpdateRequest};

/// Type aliases for clarity
pub type RecordId = String;
pub type StatusCode = u16;
