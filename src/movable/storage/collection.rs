//! Stored collection state shared by the bundled repositories.

use serde::{Deserialize, Serialize};

use crate::movable::core::entity::{index_of, Identifiable, Movable};
use crate::movable::core::error::RepositoryError;

/// Items plus the identifier sequence.
///
/// The sequence only moves forward: deleting items, even all of them, never
/// hands an identifier out twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCollection<T> {
    pub(crate) next_id: i32,
    pub(crate) items: Vec<T>,
}

impl<T> Default for StoredCollection<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

impl<T: Movable> StoredCollection<T> {
    /// Build a collection from existing items, assigning identifiers to the
    /// ones that lack them.
    pub fn from_items(items: Vec<T>) -> Result<Self, RepositoryError> {
        let highest = items.iter().filter_map(Identifiable::id).max().unwrap_or(0);
        let mut collection = Self {
            next_id: highest.checked_add(1).ok_or(RepositoryError::SequenceExhausted)?,
            items: Vec::with_capacity(items.len()),
        };
        for mut item in items {
            if item.id().is_none() {
                item.set_id(Some(collection.take_id()?));
            }
            collection.items.push(item);
        }
        Ok(collection)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn insert(&mut self, mut item: T) -> Result<T, RepositoryError> {
        if let Some(id) = item.id() {
            return Err(RepositoryError::AlreadyStored(id));
        }
        item.set_id(Some(self.take_id()?));
        self.items.push(item.clone());
        Ok(item)
    }

    pub fn update(&mut self, item: T) -> Result<T, RepositoryError> {
        let index = self.locate(&item)?;
        if let Some(slot) = self.items.get_mut(index) {
            *slot = item.clone();
        }
        Ok(item)
    }

    /// Apply every update or none: all items are located before any is
    /// written.
    pub fn update_many(&mut self, items: Vec<T>) -> Result<Vec<T>, RepositoryError> {
        let indexes = items
            .iter()
            .map(|item| self.locate(item))
            .collect::<Result<Vec<_>, _>>()?;
        for (index, item) in indexes.into_iter().zip(&items) {
            if let Some(slot) = self.items.get_mut(index) {
                *slot = item.clone();
            }
        }
        Ok(items)
    }

    pub fn delete(&mut self, item: &T) -> Result<(), RepositoryError> {
        let index = self.locate(item)?;
        self.items.remove(index);
        Ok(())
    }

    pub fn delete_all(&mut self) {
        self.items.clear();
    }

    fn locate(&self, item: &T) -> Result<usize, RepositoryError> {
        let id = item.id().ok_or(RepositoryError::MissingId)?;
        index_of(&self.items, id).ok_or(RepositoryError::NotFound(id))
    }

    fn take_id(&mut self) -> Result<i32, RepositoryError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(RepositoryError::SequenceExhausted)?;
        Ok(id)
    }
}
