//! Cached ordered service.
mod cached;
pub use cached::MovableService;
#[cfg(test)]
use crate::movable::core::entity::CloneAndReset;
#[cfg(test)]
use crate::movable::core::error::{Direction, ServiceError};
#[cfg(test)]
use crate::movable::core::testing::{three_items, FlakyRepository, GatedRepository, Item};
#[cfg(test)]
use crate::movable::storage::{CollectionCache, InMemoryCache};
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
#[path = "service_tests_1.rs"]
mod service_tests_1;
#[cfg(test)]
#[path = "service_tests_2.rs"]
mod service_tests_2;
#[cfg(test)]
#[path = "service_tests_3.rs"]
mod service_tests_3;

#[cfg(test)]
struct Fixture {
    repository: Arc<FlakyRepository>,
    cache: Arc<InMemoryCache<Item>>,
    service: MovableService<Item>,
}

#[cfg(test)]
fn fixture(items: Vec<Item>) -> Fixture {
    let repository = Arc::new(FlakyRepository::with_items(items));
    let cache: Arc<InMemoryCache<Item>> = Arc::new(InMemoryCache::new());
    let service = MovableService::new(repository.clone(), cache.clone(), "items", CloneAndReset);
    Fixture {
        repository,
        cache,
        service,
    }
}

#[cfg(test)]
fn positions(items: &[Item]) -> Vec<(Option<i32>, Option<i32>)> {
    items.iter().map(|item| (item.id, item.position)).collect()
}
