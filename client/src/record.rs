//! Item records and envelope flattening.

use crate::{Error, RecordId, RemoteEntry, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Open, ordered attribute mapping of a record.
pub type Fields = serde_json::Map<String, Value>;

/// Key under which the identifier appears in the flat record shape.
pub const ID_FIELD: &str = "id";

/// A single row of the remote collection in flat local shape.
///
/// The id is never empty: every constructor rejects records without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Fields", into = "Fields")]
pub struct ItemRecord {
    id: RecordId,
    fields: Fields,
}

impl ItemRecord {
    /// Create a record from an id and its fields.
    ///
    /// An `id` key inside `fields` is discarded in favour of `id`.
    pub fn new(id: impl Into<RecordId>, mut fields: Fields) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::MissingIdentifier);
        }
        fields.shift_remove(ID_FIELD);
        Ok(Self { id, fields })
    }

    /// Split a flat `{ id, ...fields }` mapping.
    pub fn from_flat(mut flat: Fields) -> Result<Self> {
        let id = flat
            .shift_remove(ID_FIELD)
            .as_ref()
            .and_then(id_from_value)
            .map(Cow::into_owned)
            .ok_or(Error::MissingIdentifier)?;
        Ok(Self { id, fields: flat })
    }

    /// Flatten a remote `{ entry_id, data }` envelope into `{ id, ...data }`.
    pub fn from_entry(entry: RemoteEntry) -> Result<Self> {
        let id = entry
            .entry_id
            .map(|id| id.to_string())
            .ok_or(Error::MissingIdentifier)?;
        Self::new(id, entry.data)
    }

    /// The server-assigned identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All non-id attributes, in remote order.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Look up one attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Rebuild the flat mapping with `id` first.
    pub fn into_flat(self) -> Fields {
        let mut flat = Fields::with_capacity(self.fields.len() + 1);
        flat.insert(ID_FIELD.to_string(), Value::String(self.id));
        flat.extend(self.fields);
        flat
    }
}

impl TryFrom<Fields> for ItemRecord {
    type Error = Error;

    fn try_from(flat: Fields) -> Result<Self> {
        Self::from_flat(flat)
    }
}

impl From<ItemRecord> for Fields {
    fn from(record: ItemRecord) -> Self {
        record.into_flat()
    }
}

/// Something a record id can be extracted from: a bare id or a record.
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Id(&'a str),
    Record(&'a ItemRecord),
    Flat(&'a Fields),
}

impl<'a> RecordRef<'a> {
    /// The referenced id, if one can be resolved.
    pub fn id(&self) -> Option<Cow<'a, str>> {
        match *self {
            RecordRef::Id(id) if !id.trim().is_empty() => Some(Cow::Borrowed(id)),
            RecordRef::Id(_) => None,
            RecordRef::Record(record) => Some(Cow::Borrowed(record.id())),
            RecordRef::Flat(flat) => flat.get(ID_FIELD).and_then(id_from_value),
        }
    }
}

impl<'a> From<&'a str> for RecordRef<'a> {
    fn from(id: &'a str) -> Self {
        RecordRef::Id(id)
    }
}

impl<'a> From<&'a String> for RecordRef<'a> {
    fn from(id: &'a String) -> Self {
        RecordRef::Id(id)
    }
}

impl<'a> From<&'a ItemRecord> for RecordRef<'a> {
    fn from(record: &'a ItemRecord) -> Self {
        RecordRef::Record(record)
    }
}

impl<'a> From<&'a Fields> for RecordRef<'a> {
    fn from(flat: &'a Fields) -> Self {
        RecordRef::Flat(flat)
    }
}

fn id_from_value(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Some(Cow::Borrowed(id)),
        Value::Number(id) => Some(Cow::Owned(id.to_string())),
        _ => None,
    }
}
