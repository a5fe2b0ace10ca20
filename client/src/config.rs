//! Endpoint configuration.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::env;

/// Bytes escaped inside one path segment, so an id can never reach into the
/// query, the fragment or a neighbouring segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Base address of the hosted remote store.
pub const DEFAULT_BASE_URL: &str = "https://unidb.openlab.uninorte.edu.co";
/// Contract key that scopes every request path.
pub const DEFAULT_CONTRACT: &str = "todo-tubens-144";
/// Table holding the item records.
pub const DEFAULT_TABLE: &str = "todo";

/// Location of the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    /// Contract key
    pub contract: String,
    /// Table name
    pub table: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            contract: DEFAULT_CONTRACT.to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl Config {
    /// Create a configuration for an arbitrary endpoint.
    pub fn new(
        base_url: impl Into<String>,
        contract: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            contract: contract.into(),
            table: table.into(),
        }
    }

    /// Load configuration from environment variables, falling back to the
    /// built-in endpoint for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &'static str, default: &str| match lookup(key) {
            Some(value) if value.trim().is_empty() => Err(ConfigError::Blank(key)),
            Some(value) => Ok(value.trim().to_string()),
            None => Ok(default.to_string()),
        };

        Ok(Self::new(
            read("TABSYNC_BASE_URL", DEFAULT_BASE_URL)?,
            read("TABSYNC_CONTRACT", DEFAULT_CONTRACT)?,
            read("TABSYNC_TABLE", DEFAULT_TABLE)?,
        ))
    }

    /// `GET` path listing the whole table.
    pub fn list_path(&self) -> String {
        format!(
            "/{}/data/{}/all?format=json",
            segment(&self.contract),
            segment(&self.table)
        )
    }

    /// `POST` path for new records.
    pub fn store_path(&self) -> String {
        format!("/{}/data/store", segment(&self.contract))
    }

    /// `PUT` path for one record.
    pub fn update_path(&self, id: &str) -> String {
        format!(
            "/{}/data/{}/update/{}",
            segment(&self.contract),
            segment(&self.table),
            segment(id)
        )
    }

    /// `DELETE` path for one record.
    pub fn delete_path(&self, id: &str) -> String {
        format!(
            "/{}/data/{}/delete/{}",
            segment(&self.contract),
            segment(&self.table),
            segment(id)
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is set but blank")]
    Blank(&'static str),
}
