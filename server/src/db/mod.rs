//! In-memory table storage.

mod tables;

pub use tables::*;
