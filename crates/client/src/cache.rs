//! In-memory query cache keyed by [`QueryKey`].
//!
//! Values are stored type-erased; a read with the wrong type behaves like a
//! miss. Locks are never held across an await.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::query_keys::QueryKey;

type Entry = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Entry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.read()
            .get(key)
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }

    pub fn insert<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.write().insert(key, Arc::new(value));
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.read().contains_key(key)
    }

    /// Drop every entry whose key starts with `prefix`. Returns how many
    /// were dropped.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let dropped = before - entries.len();
        if dropped > 0 {
            tracing::debug!(prefix = %prefix, dropped, "Invalidated cached queries");
        }
        dropped
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_keys::{articles, projects, users};

    #[test]
    fn insert_and_get() {
        let cache = QueryCache::new();
        cache.insert(users::detail(1), String::from("ursula"));
        assert_eq!(cache.get::<String>(&users::detail(1)), Some("ursula".into()));
        assert_eq!(cache.get::<String>(&users::detail(2)), None);
    }

    #[test]
    fn wrong_type_is_a_miss() {
        let cache = QueryCache::new();
        cache.insert(users::detail(1), 42_u32);
        assert_eq!(cache.get::<String>(&users::detail(1)), None);
    }

    #[test]
    fn invalidate_by_prefix() {
        let cache = QueryCache::new();
        cache.insert(articles::detail(1), 1_i32);
        cache.insert(articles::project_lists(2).push("{}"), 2_i32);
        cache.insert(articles::project_lists(3).push("{}"), 3_i32);
        cache.insert(projects::detail(2), 4_i32);

        assert_eq!(cache.invalidate(&articles::project_lists(2)), 1);
        assert!(cache.contains(&articles::detail(1)));
        assert!(cache.contains(&articles::project_lists(3).push("{}")));

        assert_eq!(cache.invalidate(&articles::all()), 2);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
