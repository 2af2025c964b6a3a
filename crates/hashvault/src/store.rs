//! Concurrent keyed storage for encoded digests.
//!
//! [`DigestStore`] owns the only contended map in the system. A single
//! reader-writer lock guards the key counter and the entry map jointly, so
//! key allocation and the counter increment are one indivisible step and no
//! two concurrent inserts can observe the same key.

use crate::{DigestKey, Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct StoreInner {
    /// Highest key allocated so far; 0 means nothing has been allocated.
    last_key: DigestKey,
    entries: HashMap<DigestKey, String>,
}

/// A thread-safe map from sequentially allocated keys to digest strings.
///
/// Keys start at 1 and increase by one per [`insert`](Self::insert). For M
/// inserts against a store whose highest key is `k`, the returned keys are
/// exactly `{k+1, …, k+M}` regardless of how callers interleave — the
/// order among concurrent callers is unspecified, but there are no gaps and
/// no duplicates. Entries are never deleted; the map grows for the life of
/// the process.
///
/// Reads share the lock and may run concurrently with each other; an entry
/// written under the write lock becomes visible atomically or not at all.
#[derive(Debug, Default)]
pub struct DigestStore {
    inner: RwLock<StoreInner>,
}

impl DigestStore {
    /// Creates an empty store whose first allocated key will be 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next sequential key, stores `value` under it, and
    /// returns the key.
    pub fn insert(&self, value: impl Into<String>) -> DigestKey {
        let mut inner = self.inner.write();
        let key = inner.last_key + 1;
        inner.last_key = key;
        inner.entries.insert(key, value.into());
        key
    }

    /// Returns the value stored under `key`.
    ///
    /// Fails with [`Error::KeyNotFound`] if the key was never allocated. An
    /// allocated-but-pending key succeeds and returns the placeholder.
    pub fn get(&self, key: DigestKey) -> Result<String> {
        self.inner
            .read()
            .entries
            .get(&key)
            .cloned()
            .ok_or(Error::KeyNotFound { key })
    }

    /// Overwrites the value stored under an already-allocated `key`.
    ///
    /// Updating a key that was never allocated fails with
    /// [`Error::KeyNotFound`]: keys exist only by way of
    /// [`insert`](Self::insert).
    pub fn update(&self, key: DigestKey, value: impl Into<String>) -> Result<()> {
        let mut inner = self.inner.write();
        match inner.entries.get_mut(&key) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(Error::KeyNotFound { key }),
        }
    }

    /// Number of entries allocated so far.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether no entries have been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
