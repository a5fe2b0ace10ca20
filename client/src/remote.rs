//! Remote Access - stateless mapping from CRUD intents to HTTP requests.
//!
//! Owns no state beyond the endpoint it targets. Every call is a single
//! round-trip (except [`RemoteAccess::delete_all`]) and nothing is cached.

use crate::{
    Config, Error, Fields, HttpRequest, HttpTransport, ItemRecord, ListResponse, RecordRef,
    Result, StoreRequest, Transport, UpdateRequest, ID_FIELD,
};

/// Client for one table of the remote store.
#[derive(Debug, Clone)]
pub struct RemoteAccess<T> {
    transport: T,
    config: Config,
}

impl RemoteAccess<HttpTransport> {
    /// Build an HTTP-backed client for the configured endpoint.
    pub fn from_config(config: &Config) -> Self {
        Self::new(HttpTransport::new(&config.base_url), config.clone())
    }
}

impl<T: Transport> RemoteAccess<T> {
    /// Create a client over an arbitrary transport.
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    /// Fetch the whole collection in remote order.
    ///
    /// Entries without a usable `entry_id` are dropped.
    pub async fn list(&self) -> Result<Vec<ItemRecord>> {
        let response = self
            .transport
            .send(HttpRequest::get(self.config.list_path()))
            .await?;

        if !response.is_success() {
            tracing::error!(status = response.status, "Listing failed");
            return Err(Error::RemoteRead {
                status: response.status,
            });
        }

        let decoded: ListResponse = serde_json::from_str(&response.body)?;
        let entries = decoded.into_entries();
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match ItemRecord::from_entry(entry) {
                Ok(record) => items.push(record),
                Err(e) => tracing::warn!("Skipping remote entry: {}", e),
            }
        }

        tracing::debug!(count = items.len(), table = %self.config.table, "Listed items");
        Ok(items)
    }

    /// Store a new record. The assigned id is not returned; re-list to see it.
    pub async fn create(&self, fields: &Fields) -> Result<()> {
        let body = StoreRequest {
            table_name: self.config.table.clone(),
            data: without_id(fields),
        };
        let request = HttpRequest::post(self.config.store_path(), serde_json::to_value(&body)?);

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!("Create failed: {}", e);
            Error::from(e)
        })?;

        if !response.is_success() {
            tracing::error!(status = response.status, body = %response.body, "Create rejected");
            return Err(Error::RemoteWrite {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }

    /// Replace the given fields of record `id`.
    ///
    /// Only a blank `id` is an error; every other failure is logged and
    /// reported as `false`.
    pub async fn update(&self, id: &str, fields: &Fields) -> Result<bool> {
        if id.trim().is_empty() {
            return Err(Error::MissingIdentifier);
        }

        let body = UpdateRequest {
            data: without_id(fields),
        };
        let request = HttpRequest::put(self.config.update_path(id), serde_json::to_value(&body)?);

        Ok(self.send_write("Update", id, request).await)
    }

    /// Delete a record given its id or the record itself.
    ///
    /// Only an unresolvable id is an error; every other failure is logged and
    /// reported as `false`.
    pub async fn delete<'a>(&self, target: impl Into<RecordRef<'a>>) -> Result<bool> {
        let id = target.into().id().ok_or(Error::MissingIdentifier)?;
        let request = HttpRequest::delete(self.config.delete_path(&id));

        Ok(self.send_write("Delete", &id, request).await)
    }

    /// List the collection, then delete every record one by one.
    ///
    /// Returns `true` once the listing succeeded, even if individual deletes
    /// fail.
    pub async fn delete_all(&self) -> bool {
        let items = match self.list().await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Delete all failed: {}", e);
                return false;
            }
        };

        for item in &items {
            match self.delete(item).await {
                Ok(true) => {}
                Ok(false) => tracing::warn!(id = %item.id(), "Delete all skipped a record"),
                Err(e) => tracing::warn!(id = %item.id(), "Delete all skipped a record: {}", e),
            }
        }
        true
    }

    async fn send_write(&self, op: &'static str, id: &str, request: HttpRequest) -> bool {
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                tracing::debug!(op, id = %id, "Write accepted");
                true
            }
            Ok(response) => {
                tracing::error!(
                    op,
                    id = %id,
                    status = response.status,
                    body = %response.body,
                    "Write rejected"
                );
                false
            }
            Err(e) => {
                tracing::error!(op, id = %id, "Write failed: {}", e);
                false
            }
        }
    }
}

fn without_id(fields: &Fields) -> Fields {
    let mut data = fields.clone();
    data.shift_remove(ID_FIELD);
    data
}
