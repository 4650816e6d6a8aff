//! Repository persisted as a single JSON document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::collection::StoredCollection;
use super::repository::Repository;
use crate::movable::core::entity::Movable;
use crate::movable::core::error::RepositoryError;
use crate::utils::atomic_write;

/// Repository that writes the whole collection to one JSON file after every
/// mutation.
///
/// Writes go through [`atomic_write`], so a crash mid-write leaves the
/// previous document intact. The in-memory copy
/// is only replaced once the file is written.
#[derive(Debug)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    state: Mutex<StoredCollection<T>>,
}

impl<T> JsonFileRepository<T>
where
    T: Movable + Serialize + DeserializeOwned,
{
    /// Open the document at `path`, starting empty if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let state = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            let state: StoredCollection<T> = serde_json::from_str(&content)?;
            debug!(path = %path.display(), items = state.items().len(), "Loaded JSON repository");
            state
        } else {
            StoredCollection::default()
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Location of the backing document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, state: &StoredCollection<T>) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(state)?;
        atomic_write(&self.path, content).await?;
        Ok(())
    }

    /// Apply `change` to a copy of the state, write it, then commit it.
    async fn mutate<R, F>(&self, change: F) -> Result<R, RepositoryError>
    where
        F: FnOnce(&mut StoredCollection<T>) -> Result<R, RepositoryError> + Send,
        R: Send,
    {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let result = change(&mut next)?;
        self.persist(&next).await?;
        *state = next;
        Ok(result)
    }
}

#[async_trait]
impl<T> Repository<T> for JsonFileRepository<T>
where
    T: Movable + Serialize + DeserializeOwned,
{
    async fn list_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.state.lock().await.items().to_vec())
    }

    async fn insert(&self, item: T) -> Result<T, RepositoryError> {
        self.mutate(|state| state.insert(item)).await
    }

    async fn update(&self, item: T) -> Result<T, RepositoryError> {
        self.mutate(|state| state.update(item)).await
    }

    async fn update_many(&self, items: Vec<T>) -> Result<Vec<T>, RepositoryError> {
        self.mutate(|state| state.update_many(items)).await
    }

    async fn delete(&self, item: &T) -> Result<(), RepositoryError> {
        self.mutate(|state| state.delete(item)).await
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        self.mutate(|state| {
            state.delete_all();
            Ok(())
        })
        .await
    }
}
