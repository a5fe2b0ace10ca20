//! Error types for the sync layer.

use crate::StatusCode;
use thiserror::Error;

/// Failures raised while talking to the remote store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("remote read failed with status {status}")]
    RemoteRead { status: StatusCode },

    #[error("remote write failed with status {status}: {body}")]
    RemoteWrite { status: StatusCode, body: String },

    #[error("record id is required")]
    MissingIdentifier,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

/// Failures below the HTTP status line: the request never produced a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("could not encode request body: {0}")]
    Encode(String),
}

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, Error>;
