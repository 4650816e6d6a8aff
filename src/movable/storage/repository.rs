//! Repository collaborator contract.

use async_trait::async_trait;

use crate::movable::core::entity::Movable;
use crate::movable::core::error::RepositoryError;

/// Durable storage for one entity type.
///
/// The repository is the system of record; the service only keeps a derived
/// view of it in the cache. Implementations are expected to be atomic per
/// call, so `update_many` either persists every item or none of them.
#[async_trait]
pub trait Repository<T: Movable>: Send + Sync {
    /// Return every stored item, in storage order
    async fn list_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// Store a new item and return it with its assigned identifier
    async fn insert(&self, item: T) -> Result<T, RepositoryError>;

    /// Overwrite a stored item
    async fn update(&self, item: T) -> Result<T, RepositoryError>;

    /// Overwrite several stored items in one call
    async fn update_many(&self, items: Vec<T>) -> Result<Vec<T>, RepositoryError>;

    /// Remove a stored item
    async fn delete(&self, item: &T) -> Result<(), RepositoryError>;

    /// Remove every stored item
    async fn delete_all(&self) -> Result<(), RepositoryError>;
}
