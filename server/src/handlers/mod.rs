//! Request handlers for table operations.

mod entries;

pub use entries::*;
