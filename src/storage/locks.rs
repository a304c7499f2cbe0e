//! Collection Lock Registry
//!
//! One exclusive lock per collection name, created on first use.
//!
//! ## Concurrency:
//! - `locks`: the registry map, locked only for the create-or-fetch step
//! - Each collection lock is handed out as an `Arc` and held by the caller
//!   for one mutating operation; the registry lock is already released by then
//! - Entries are never removed, so a name maps to the same lock for the
//!   lifetime of the registry

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Shared handle to one collection's lock
pub type CollectionLock = Arc<Mutex<()>>;

/// Owns the per-collection locks of a single store
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock for `collection`, creating it if this is the first call
    ///
    /// Repeated calls with the same name return the same lock instance.
    /// Locking the returned handle is the caller's job:
    ///
    /// ```
    /// # use scribe::storage::LockRegistry;
    /// let registry = LockRegistry::new();
    /// let lock = registry.acquire("users");
    /// let _guard = lock.lock();
    /// // ... mutate the collection; released when `_guard` drops
    /// ```
    pub fn acquire(&self, collection: &str) -> CollectionLock {
        let mut locks = self.locks.lock();

        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }

        let lock = CollectionLock::default();
        locks.insert(collection.to_string(), Arc::clone(&lock));
        lock
    }

    /// Number of collections with a registered lock
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
