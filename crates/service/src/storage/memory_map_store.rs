use std::{collections::HashMap, hash::Hash};
use tokio::sync::RwLock;

/// Generic in-memory key-value map guarded by a single `RwLock`.
///
/// Every access goes through one of the methods below, so the lock is the
/// only synchronisation point. Reads share the lock; `update_map` holds the
/// write guard for the whole closure, making check-then-mutate sequences
/// atomic with respect to other callers.
#[derive(Debug, Default)]
pub struct MemoryMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self { inner: RwLock::new(HashMap::new()) }
    }

    /// Snapshot of all values, in the map's arbitrary iteration order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    pub async fn contains_key(&self, key: &K) -> bool {
        self.inner.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Apply a mutation to the underlying map under the write lock.
    /// An `Err` from `f` is returned as-is; `f` must leave the map untouched
    /// on the error path.
    pub async fn update_map<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<R, E>,
    {
        let mut map = self.inner.write().await;
        f(&mut map)
    }
}
