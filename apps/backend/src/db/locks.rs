//! Per-deck mutual exclusion.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// One mutex per deck ID, held only while some caller needs it.
///
/// Cards are embedded in their deck and every write replaces the whole
/// record, so two unsynchronised read-modify-write cycles on the same deck
/// would lose one update.
#[derive(Debug, Default)]
pub struct DeckLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DeckLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `deck_id`.
    ///
    /// The entry is dropped again once no other caller holds or waits on it,
    /// so IDs that never existed leave nothing behind.
    pub fn with<T>(&self, deck_id: &str, f: impl FnOnce() -> T) -> T {
        let handle = self
            .locks
            .lock()
            .entry(deck_id.to_string())
            .or_default()
            .clone();

        let result = {
            let _guard = handle.lock();
            f()
        };

        self.release(deck_id, handle);
        result
    }

    fn release(&self, deck_id: &str, handle: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock();
        // Handles are only cloned under the map lock, so the count cannot grow here.
        drop(handle);
        if locks
            .get(deck_id)
            .map_or(false, |h| Arc::strong_count(h) == 1)
        {
            locks.remove(deck_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.lock().len()
    }
}
