//! Reference-identity memoization.
//!
//! A single-slot cache keyed by `Arc` pointer identity. Hit checking is O(1)
//! and never inspects the data: a structurally-equal-but-new container is a
//! cache miss. Each cell is owned by the component that needs it; there is no
//! shared module-level state.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// One-entry memo cell keyed by `Arc::ptr_eq` on the source container.
pub struct IdentityMemo<K: ?Sized, V> {
    slot: Mutex<Option<(Arc<K>, Arc<V>)>>,
}

impl<K: ?Sized, V> Default for IdentityMemo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ?Sized, V> IdentityMemo<K, V> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value when `key` is the same allocation as the last
    /// call's key; otherwise compute, cache, and return the fresh value.
    pub fn get_or_compute<F>(&self, key: &Arc<K>, compute: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        let mut slot = self.slot.lock();
        if let Some((cached_key, cached_value)) = slot.as_ref()
            && Arc::ptr_eq(cached_key, key)
        {
            return Arc::clone(cached_value);
        }
        let value = Arc::new(compute(key));
        *slot = Some((Arc::clone(key), Arc::clone(&value)));
        value
    }
}

impl<K: ?Sized, V> fmt::Debug for IdentityMemo<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityMemo")
            .field("occupied", &self.slot.lock().is_some())
            .finish()
    }
}
