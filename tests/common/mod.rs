//! Common test utilities

use std::sync::Arc;

use movable_core::{CloneAndReset, Identifiable, InMemoryCache, Movable, MovableService, Repository};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

/// Chapter of a book, the entity used across the integration tests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: Option<i32>,
    pub position: Option<i32>,
    pub title: String,
}

impl Chapter {
    #[allow(dead_code)] // Test utility for integration tests
    pub fn new(title: &str) -> Self {
        Self {
            id: None,
            position: None,
            title: title.to_string(),
        }
    }
}

impl Identifiable for Chapter {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: Option<i32>) {
        self.id = id;
    }
}

impl Movable for Chapter {
    fn position(&self) -> Option<i32> {
        self.position
    }

    fn set_position(&mut self, position: Option<i32>) {
        self.position = position;
    }
}

/// Create a temporary directory for testing
#[allow(dead_code)] // Test utility for integration tests
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Service over `repository` with a fresh cache
#[allow(dead_code)] // Test utility for integration tests
pub fn chapter_service(repository: Arc<dyn Repository<Chapter>>) -> Arc<MovableService<Chapter>> {
    let cache: Arc<InMemoryCache<Chapter>> = Arc::new(InMemoryCache::new());
    Arc::new(MovableService::new(repository, cache, "chapters", CloneAndReset))
}

/// Create chapters with the given titles through the service
#[allow(dead_code)] // Test utility for integration tests
pub async fn create_chapters(service: &MovableService<Chapter>, titles: &[&str]) {
    for title in titles {
        service
            .create(Chapter::new(title))
            .await
            .expect("Failed to create chapter");
    }
}

/// Titles in canonical order
#[allow(dead_code)] // Test utility for integration tests
pub async fn titles(service: &MovableService<Chapter>) -> Vec<String> {
    service
        .list_all()
        .await
        .expect("Failed to list chapters")
        .into_iter()
        .map(|chapter| chapter.title)
        .collect()
}
