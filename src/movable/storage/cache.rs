//! Cache collaborator contract and the in-process implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::movable::core::entity::Movable;
use crate::movable::core::error::CacheError;

/// Keyed store of whole collections.
///
/// Values are derived views of repository data and may be dropped at any
/// time; a missing entry only means the next read goes to the repository.
#[async_trait]
pub trait CollectionCache<T: Movable>: Send + Sync {
    /// Cached collection for `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Vec<T>>, CacheError>;

    /// Store (or replace) the collection for `key`
    async fn put(&self, key: &str, items: Vec<T>) -> Result<(), CacheError>;

    /// Drop the collection for `key`
    async fn evict(&self, key: &str) -> Result<(), CacheError>;

    /// Drop every cached collection
    async fn clear(&self) -> Result<(), CacheError>;
}

/// Cache backed by a `HashMap` behind an async `RwLock`.
///
/// Share one instance between every service of the same entity type so a
/// full clear reaches all of their keys.
#[derive(Debug)]
pub struct InMemoryCache<T> {
    entries: RwLock<HashMap<String, Vec<T>>>,
}

impl<T: Movable> InMemoryCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached collections
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<T: Movable> Default for InMemoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Movable> CollectionCache<T> for InMemoryCache<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<T>>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, items: Vec<T>) -> Result<(), CacheError> {
        self.entries.write().await.insert(key.to_string(), items);
        Ok(())
    }

    async fn evict(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
