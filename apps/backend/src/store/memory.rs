//! In-memory document store.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use serde_json::Value;

use super::{DocumentStore, StoreResult};

/// Document store that keeps every collection in process memory.
///
/// Used when no data directory is configured, and by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection.
    #[cfg(test)]
    pub(crate) fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned())
    }

    fn write(&self, collection: &str, id: &str, record: &Value) -> StoreResult<()> {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), record.clone());
        Ok(())
    }

    fn query(
        &self,
        collection: &str,
        predicate: &dyn Fn(&Value) -> bool,
    ) -> StoreResult<Vec<Value>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|c| c.values().filter(|v| predicate(v)).cloned().collect())
            .unwrap_or_default())
    }

    fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        Ok(self
            .collections
            .write()
            .get_mut(collection)
            .map_or(false, |c| c.remove(id).is_some()))
    }
}
