//! Persistent, newest-first history of logged routes.
//!
//! The whole collection lives in memory and is written back as one JSON blob
//! under [`STORAGE_KEY`] after every mutation. Loading never fails: a blob that
//! cannot be read or parsed is logged and treated as an empty history.

pub mod backend;
pub mod error;
pub mod store;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use error::StoreError;
pub use store::{deserialize_records, serialize_records, RecordStore, STORAGE_KEY};
