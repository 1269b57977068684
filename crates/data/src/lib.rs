//! Data-access boundary for Frostline.
//!
//! This crate provides:
//! - Validation of loosely-shaped store documents into typed records
//! - The `RecordSource` abstraction and its JSON-directory and in-memory implementations
//! - Persistence of dashboard filters behind `FilterStore`

pub mod error;
pub mod filters;
pub mod source;
pub mod validate;

pub use error::DataError;
pub use filters::{FilterStore, JsonFileFilterStore, MemoryFilterStore, load_or_default};
pub use source::{JsonDirSource, MemorySource, RecordSource, load_snapshot};
