use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// A table of mutexes keyed by note name.
///
/// Operations on the same name run one at a time, so an existence check and
/// the write that depends on it cannot interleave with another operation on
/// that name. Distinct names never contend beyond the brief table lookup.
/// Entries are dropped once nobody holds or waits on them, so the table only
/// grows with the number of names in flight.
#[derive(Debug, Default)]
pub struct KeyLocks {
    table: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for `key`.
    ///
    /// The table entry is released even if `f` panics.
    pub fn with_key<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let entry = Release {
            locks: self,
            key,
            slot: self.acquire(key),
        };

        // The guarded data is `()`, so a poisoned lock carries no broken state.
        let _guard = entry.slot.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of names currently locked or waited on.
    pub fn in_flight(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn acquire(&self, key: &str) -> Arc<Mutex<()>> {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table
            .entry(key.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn release(&self, key: &str, slot: &Arc<Mutex<()>>) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        // NOTE: clones only happen under the table lock, so a count of 2
        // (table + ours) means nobody else is holding or waiting.
        if Arc::strong_count(slot) == 2 {
            table.remove(key);
        }
    }
}

/// Drops a key's table entry once its last user is done with it.
struct Release<'a> {
    locks: &'a KeyLocks,
    key: &'a str,
    slot: Arc<Mutex<()>>,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.locks.release(self.key, &self.slot);
    }
}
