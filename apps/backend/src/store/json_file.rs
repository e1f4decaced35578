//! JSON file document store.
//!
//! Directory structure:
//! ```text
//! {root}/
//! └── {collection}/
//!     └── {id}.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{is_valid_key, DocumentStore, StoreError, StoreResult};

/// Document store keeping one pretty-printed JSON file per record.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> StoreResult<PathBuf> {
        if !is_valid_key(collection) {
            return Err(StoreError::InvalidKey(collection.to_string()));
        }
        Ok(self.root.join(collection))
    }

    fn record_path(&self, collection: &str, id: &str) -> StoreResult<PathBuf> {
        if !is_valid_key(id) {
            return Err(StoreError::InvalidKey(id.to_string()));
        }
        Ok(self.collection_dir(collection)?.join(format!("{}.json", id)))
    }

    fn parse(collection: &str, path: &Path) -> StoreResult<Value> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            collection: collection.to_string(),
            id: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            reason: e.to_string(),
        })
    }
}

impl DocumentStore for JsonFileStore {
    fn read(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        // An ID that could never have been written cannot exist.
        if !is_valid_key(id) {
            return Ok(None);
        }
        let path = self.record_path(collection, id)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::parse(collection, &path).map(Some)
    }

    fn write(&self, collection: &str, id: &str, record: &Value) -> StoreResult<()> {
        let path = self.record_path(collection, id)?;
        let dir = self.collection_dir(collection)?;
        fs::create_dir_all(&dir)?;

        // Write beside the target then rename, so a failed write leaves the old record intact.
        let tmp = dir.join(format!(".{}.json.tmp", id));
        fs::write(&tmp, serde_json::to_string_pretty(record)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn query(
        &self,
        collection: &str,
        predicate: &dyn Fn(&Value) -> bool,
    ) -> StoreResult<Vec<Value>> {
        let dir = self.collection_dir(collection)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                let record = Self::parse(collection, &path)?;
                if predicate(&record) {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        if !is_valid_key(id) {
            return Ok(false);
        }
        let path = self.record_path(collection, id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }
}
