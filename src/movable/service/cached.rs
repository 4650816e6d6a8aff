//! Position-ordered collection service with a read-through cache.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::metrics::OperationTimer;
use crate::movable::core::entity::{index_of, CopyStrategy, Movable};
use crate::movable::core::error::{Direction, RepositoryError, ServiceError};
use crate::movable::core::sorting::sorted;
use crate::movable::storage::{CollectionCache, Repository};

/// Service managing one position-ordered collection.
///
/// The repository is the system of record. The cache holds the whole
/// collection under `key` and is either absent or exactly what the
/// repository returned for the last operation. Every cache write happens
/// under `write_lock`, including the store after a read miss, so a reader's
/// snapshot never lands on top of a newer mutation.
pub struct MovableService<T: Movable> {
    repository: Arc<dyn Repository<T>>,
    cache: Arc<dyn CollectionCache<T>>,
    key: String,
    copy: Box<dyn CopyStrategy<T>>,
    write_lock: Mutex<()>,
}

impl<T: Movable> MovableService<T> {
    /// Create a service for the collection cached under `key`.
    pub fn new(
        repository: Arc<dyn Repository<T>>,
        cache: Arc<dyn CollectionCache<T>>,
        key: impl Into<String>,
        copy: impl CopyStrategy<T> + 'static,
    ) -> Self {
        Self {
            repository,
            cache,
            key: key.into(),
            copy: Box::new(copy),
            write_lock: Mutex::new(()),
        }
    }

    /// Cache key of the managed collection
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Delete every item and drop the entire cache.
    pub async fn reset(&self) -> Result<(), ServiceError> {
        let _timer = OperationTimer::new("reset", &self.key);
        let _guard = self.write_lock.lock().await;
        self.repository.delete_all().await?;
        self.cache.clear().await?;
        debug!(key = %self.key, "Collection reset");
        Ok(())
    }

    /// All items in canonical order.
    pub async fn list_all(&self) -> Result<Vec<T>, ServiceError> {
        let items = self.read_through().await?;
        Ok(sorted(&items))
    }

    /// Item with the given identifier, or `None` if there is no such item.
    pub async fn get(&self, id: Option<i32>) -> Result<Option<T>, ServiceError> {
        let id = id.ok_or(ServiceError::NullArgument("id"))?;
        let items = self.read_through().await?;
        Ok(items.into_iter().find(|item| item.id() == Some(id)))
    }

    /// Store a new item and return it as persisted.
    ///
    /// The item is inserted at position 0 and then moved to `id - 1`, so new
    /// items line up in insertion order. The whole cache is dropped since
    /// the assigned identifier decides where the item lands.
    pub async fn create(&self, mut item: T) -> Result<T, ServiceError> {
        let _timer = OperationTimer::new("create", &self.key);
        let _guard = self.write_lock.lock().await;
        item.update_position(0);
        let mut stored = self.repository.insert(item).await?;
        let id = stored.id().ok_or(RepositoryError::MissingId)?;
        stored.update_position(id.saturating_sub(1));
        let stored = match self.repository.update(stored).await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(key = %self.key, id, error = %err, "Item inserted but not positioned");
                self.cache.clear().await?;
                return Err(err.into());
            }
        };
        self.cache.clear().await?;
        debug!(key = %self.key, id, "Created item");
        Ok(stored)
    }

    /// Persist changes to a stored item and patch it into the cache.
    pub async fn update(&self, item: T) -> Result<T, ServiceError> {
        let id = item.id().ok_or(ServiceError::NullArgument("id"))?;
        let _timer = OperationTimer::new("update", &self.key);
        let _guard = self.write_lock.lock().await;
        let updated = self.repository.update(item).await?;
        let mut items = self.cached_data().await?;
        replace_item(&mut items, updated.clone());
        self.cache.put(&self.key, items).await?;
        debug!(key = %self.key, id, "Updated item");
        Ok(updated)
    }

    /// Remove a stored item and drop it from the cache.
    pub async fn delete(&self, item: &T) -> Result<(), ServiceError> {
        let id = item.id().ok_or(ServiceError::NullArgument("id"))?;
        let _timer = OperationTimer::new("delete", &self.key);
        let _guard = self.write_lock.lock().await;
        self.repository.delete(item).await?;
        let mut items = self.cached_data().await?;
        items.retain(|cached| cached.id() != Some(id));
        self.cache.put(&self.key, items).await?;
        debug!(key = %self.key, id, "Deleted item");
        Ok(())
    }

    /// Store a copy of `item` and return the copy as persisted.
    pub async fn duplicate(&self, item: &T) -> Result<T, ServiceError> {
        let _timer = OperationTimer::new("duplicate", &self.key);
        let _guard = self.write_lock.lock().await;
        let copy = self.copy.copy(item);
        let stored = self.repository.insert(copy).await?;
        self.cache.clear().await?;
        debug!(key = %self.key, source = ?item.id(), id = ?stored.id(), "Duplicated item");
        Ok(stored)
    }

    /// Swap `item` with its predecessor in canonical order.
    pub async fn move_up(&self, item: &T) -> Result<(), ServiceError> {
        self.move_item(item, Direction::Up).await
    }

    /// Swap `item` with its successor in canonical order.
    pub async fn move_down(&self, item: &T) -> Result<(), ServiceError> {
        self.move_item(item, Direction::Down).await
    }

    /// Rewrite positions to `0..n` in canonical order.
    ///
    /// The cache is replaced with whatever the repository returns.
    pub async fn renumber_positions(&self) -> Result<(), ServiceError> {
        let _timer = OperationTimer::new("renumber_positions", &self.key);
        let _guard = self.write_lock.lock().await;
        let mut items = sorted(&self.cached_data().await?);
        for (index, item) in items.iter_mut().enumerate() {
            item.update_position(i32::try_from(index).unwrap_or(i32::MAX));
        }
        let count = items.len();
        let saved = self.repository.update_many(items).await?;
        self.cache.put(&self.key, saved).await?;
        debug!(key = %self.key, count, "Renumbered positions");
        Ok(())
    }

    async fn move_item(&self, item: &T, direction: Direction) -> Result<(), ServiceError> {
        let id = item.id().ok_or(ServiceError::NullArgument("id"))?;
        let position = item.position().ok_or(ServiceError::NullArgument("position"))?;
        let _timer = OperationTimer::new("move", &self.key);
        let _guard = self.write_lock.lock().await;
        let mut items = sorted(&self.cached_data().await?);
        let index = index_of(&items, id).ok_or(ServiceError::NotInCollection(id))?;
        let neighbour = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1).filter(|next| *next < items.len()),
        };
        let Some(mut other) = neighbour.and_then(|next| items.get(next)).cloned() else {
            warn!(key = %self.key, id, %direction, "Rejected move past the end of the collection");
            return Err(ServiceError::NotMovable { id, direction });
        };
        let mut moved = item.clone();
        moved.set_position(other.position());
        other.update_position(position);
        let updated = self.repository.update_many(vec![moved, other]).await?;
        for entity in updated {
            replace_item(&mut items, entity);
        }
        self.cache.put(&self.key, items).await?;
        debug!(key = %self.key, id, %direction, "Moved item");
        Ok(())
    }

    /// Cached collection, loaded and stored on a miss.
    ///
    /// The miss path takes `write_lock` and checks the cache again, since a
    /// mutation may have stored a newer list while this reader waited.
    async fn read_through(&self) -> Result<Vec<T>, ServiceError> {
        if let Some(items) = self.cache.get(&self.key).await? {
            return Ok(items);
        }
        let _guard = self.write_lock.lock().await;
        if let Some(items) = self.cache.get(&self.key).await? {
            return Ok(items);
        }
        let items = self.repository.list_all().await?;
        debug!(key = %self.key, count = items.len(), "Cache miss, loaded collection");
        self.cache.put(&self.key, items.clone()).await?;
        Ok(items)
    }

    /// Cached collection, loaded from the repository on a miss.
    ///
    /// Nothing is stored; callers hold `write_lock` and store their own
    /// patched list.
    async fn cached_data(&self) -> Result<Vec<T>, ServiceError> {
        if let Some(items) = self.cache.get(&self.key).await? {
            return Ok(items);
        }
        let items = self.repository.list_all().await?;
        debug!(key = %self.key, count = items.len(), "Cache miss, loaded collection");
        Ok(items)
    }
}

/// Replace the element with the same identifier, keeping its index.
fn replace_item<T: Movable>(items: &mut Vec<T>, item: T) {
    match item.id().and_then(|id| index_of(items, id)) {
        Some(index) => {
            if let Some(slot) = items.get_mut(index) {
                *slot = item;
            }
        }
        None => items.push(item),
    }
}
