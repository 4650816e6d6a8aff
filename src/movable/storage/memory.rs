//! In-process repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::collection::StoredCollection;
use super::repository::Repository;
use crate::movable::core::entity::Movable;
use crate::movable::core::error::RepositoryError;

/// Repository that keeps everything in memory.
///
/// Useful for tests and for collections that never outlive the process.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    state: RwLock<StoredCollection<T>>,
}

impl<T: Movable> InMemoryRepository<T> {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoredCollection::default()),
        }
    }

    /// Create a repository pre-populated with `items`.
    ///
    /// Items that already carry an identifier keep it; the others get the
    /// next free identifiers in order.
    pub fn with_items(items: Vec<T>) -> Result<Self, RepositoryError> {
        Ok(Self {
            state: RwLock::new(StoredCollection::from_items(items)?),
        })
    }
}

impl<T: Movable> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Movable> Repository<T> for InMemoryRepository<T> {
    async fn list_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.state.read().await.items().to_vec())
    }

    async fn insert(&self, item: T) -> Result<T, RepositoryError> {
        self.state.write().await.insert(item)
    }

    async fn update(&self, item: T) -> Result<T, RepositoryError> {
        self.state.write().await.update(item)
    }

    async fn update_many(&self, items: Vec<T>) -> Result<Vec<T>, RepositoryError> {
        self.state.write().await.update_many(items)
    }

    async fn delete(&self, item: &T) -> Result<(), RepositoryError> {
        self.state.write().await.delete(item)
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        self.state.write().await.delete_all();
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
