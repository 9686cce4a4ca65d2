use super::SingularLock;
use crate::core::ResourceKey;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Keyed mutual-exclusion coordinator.
///
/// One [`SingularLock`] is created per distinct key the first time the key
/// is referenced. Lock instances persist for the lifetime of the manager,
/// even after the entity a key refers to is deleted — a deliberate
/// resource-growth tradeoff for session-scoped stores; long-running
/// processes would want reference-counted eviction.
pub struct KeyedLockManager {
    locks: Mutex<HashMap<ResourceKey, Arc<SingularLock>>>,
}

impl KeyedLockManager {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the lock for `key` is currently held. Keys never referenced
    /// report free.
    pub fn locked(&self, key: &str) -> bool {
        self.locks
            .lock()
            .get(key)
            .map(|lock| lock.locked())
            .unwrap_or(false)
    }

    /// Number of lock instances created so far.
    pub fn lock_count(&self) -> usize {
        self.locks.lock().len()
    }

    fn lock_for(&self, key: &str) -> Arc<SingularLock> {
        let mut locks = self.locks.lock();
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(SingularLock::new()))
            .clone()
    }

    /// Take every key if all are free right now; otherwise take nothing.
    pub fn try_acquire(&self, keys: &[ResourceKey]) -> Option<KeyedLockGuard> {
        let mut guard = KeyedLockGuard {
            locks: Vec::with_capacity(keys.len()),
        };
        for key in keys {
            let lock = self.lock_for(key);
            if lock.try_acquire_raw() {
                guard.locks.push(lock);
            } else {
                // guard drop releases whatever was already taken
                return None;
            }
        }
        Some(guard)
    }

    /// Acquire every key, suspending as needed, and return a guard that
    /// releases them all when dropped.
    ///
    /// Keys are acquired in the order supplied by the caller, and must be
    /// distinct. Two concurrent multi-key acquisitions requesting the same
    /// keys in different orders can deadlock; callers are responsible for
    /// deriving key lists consistently.
    pub async fn acquire(&self, keys: &[ResourceKey]) -> KeyedLockGuard {
        let mut guard = KeyedLockGuard {
            locks: Vec::with_capacity(keys.len()),
        };
        for key in keys {
            let lock = self.lock_for(key);
            lock.acquire_raw().await;
            guard.locks.push(lock);
        }
        guard
    }

    /// Run `fut` while holding every key in `keys`.
    pub async fn with_locks<T>(&self, keys: &[ResourceKey], fut: impl Future<Output = T>) -> T {
        let _guard = self.acquire(keys).await;
        fut.await
    }
}

impl Default for KeyedLockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyedLockManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedLockManager")
            .field("locks", &self.lock_count())
            .finish()
    }
}

/// RAII guard over a set of acquired keys; releases in reverse acquisition
/// order on drop.
pub struct KeyedLockGuard {
    locks: Vec<Arc<SingularLock>>,
}

impl Drop for KeyedLockGuard {
    fn drop(&mut self) {
        for lock in self.locks.drain(..).rev() {
            lock.release_raw();
        }
    }
}

impl std::fmt::Debug for KeyedLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyedLockGuard({} keys)", self.locks.len())
    }
}
