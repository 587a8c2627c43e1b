use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per key, created on demand
///
/// Holders of different keys never contend. An entry is dropped from the map
/// as soon as its last holder or waiter lets go, so the registry only holds
/// keys that are in use.
pub struct KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    locks: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Wait for exclusive access to `key`
    pub async fn lock(&self, key: K) -> KeyedGuard<K> {
        // The map shard lock is released at the end of this statement,
        // before awaiting the per-key mutex.
        let mutex = Arc::clone(
            self.locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );

        // Built before waiting: if this future is dropped mid-wait, the
        // guard's Drop still prunes the entry once the mutex Arc is gone.
        let mut held = KeyedGuard {
            key,
            guard: None,
            locks: Arc::clone(&self.locks),
        };
        held.guard = Some(mutex.lock_owned().await);
        held
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            locks: Arc::clone(&self.locks),
        }
    }
}

/// Exclusive access to one key; released on drop
pub struct KeyedGuard<K>
where
    K: Eq + Hash + Clone,
{
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K> KeyedGuard<K>
where
    K: Eq + Hash + Clone,
{
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K> Drop for KeyedGuard<K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        // Release the mutex first so its Arc no longer counts as a holder.
        drop(self.guard.take());
        // Only the map's own reference left: nobody holds or waits on this key.
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
