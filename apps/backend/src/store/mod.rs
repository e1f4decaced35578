//! Document store used for persistence.
//!
//! Records are opaque JSON documents grouped into collections and keyed by
//! generated IDs. Writes always replace the whole record.

pub mod json_file;
pub mod memory;

use serde_json::Value;
use thiserror::Error;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("corrupt record {collection}/{id}: {reason}")]
    Corrupt {
        collection: String,
        id: String,
        reason: String,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Generic per-collection document store.
pub trait DocumentStore: Send + Sync {
    /// Read one record, `None` when absent.
    fn read(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Insert or fully overwrite a record.
    fn write(&self, collection: &str, id: &str, record: &Value) -> StoreResult<()>;

    /// All records in `collection` matching `predicate`.
    fn query(&self, collection: &str, predicate: &dyn Fn(&Value) -> bool)
        -> StoreResult<Vec<Value>>;

    /// Remove a record. Returns whether it existed.
    fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Fresh unique ID for a new record.
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Keys end up in file names, so only a conservative alphabet is accepted.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 128
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
