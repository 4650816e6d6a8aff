use std::time::Duration;

use super::*;
use crate::movable::core::sorting::sorted;

#[tokio::test]
async fn test_storage_failure_propagates_unchanged() {
    let f = fixture(three_items());
    f.repository.fail_writes();
    let result = f.service.create(Item::new("fourth")).await;
    let err = result.unwrap_err();
    assert!(!err.is_precondition());
    assert_eq!(err.code(), "REPOSITORY_ERROR");
    assert_eq!(err.to_string(), "Repository error: storage offline");
}

#[tokio::test]
async fn test_failed_update_leaves_cache_untouched() {
    let f = fixture(three_items());
    let before = f.service.list_all().await.unwrap();
    f.repository.fail_writes();
    let result = f.service.update(Item::stored(1, 0, "renamed")).await;
    assert!(matches!(result, Err(ServiceError::Repository(_))));
    let after = f.service.list_all().await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_failed_move_persists_nothing() {
    let f = fixture(three_items());
    let first = f.service.get(Some(1)).await.unwrap().unwrap();
    f.repository.fail_writes();
    assert!(f.service.move_down(&first).await.is_err());
    assert_eq!(f.repository.stored().await, three_items());
    let cached = f.cache.get("items").await.unwrap().unwrap();
    assert_eq!(cached, three_items());
}

#[tokio::test]
async fn test_failed_positioning_drops_cache() {
    let f = fixture(three_items());
    f.service.list_all().await.unwrap();
    f.repository.fail_updates();
    let err = f.service.create(Item::new("fourth")).await.unwrap_err();
    assert_eq!(err.to_string(), "Repository error: update offline");
    assert!(f.cache.get("items").await.unwrap().is_none());
    let listed = f.service.list_all().await.unwrap();
    assert_eq!(listed.len(), 4);
    assert_eq!(listed.len(), f.repository.stored().await.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_read_miss_does_not_overwrite_move() {
    let repository = Arc::new(GatedRepository::with_items(three_items()));
    let cache: Arc<InMemoryCache<Item>> = Arc::new(InMemoryCache::new());
    let service: Arc<MovableService<Item>> = Arc::new(MovableService::new(
        repository.clone(),
        cache.clone(),
        "items",
        CloneAndReset,
    ));
    let reader = tokio::spawn({
        let service = service.clone();
        async move { service.list_all().await }
    });
    repository.scan_parked().await;
    let mover = tokio::spawn({
        let service = service.clone();
        async move { service.move_down(&Item::stored(1, 0, "first")).await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    repository.release_scan();
    reader.await.unwrap().unwrap();
    mover.await.unwrap().unwrap();

    let stored = sorted(&repository.stored().await);
    assert_eq!(
        positions(&stored),
        vec![(Some(2), Some(0)), (Some(1), Some(1)), (Some(3), Some(2))]
    );
    let cached = cache.get("items").await.unwrap().unwrap();
    assert_eq!(positions(&sorted(&cached)), positions(&stored));
    assert_eq!(service.list_all().await.unwrap(), stored);
}

#[tokio::test]
async fn test_failed_reset_keeps_cache() {
    let f = fixture(three_items());
    f.service.list_all().await.unwrap();
    f.repository.fail_writes();
    assert!(f.service.reset().await.is_err());
    assert!(f.cache.get("items").await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_are_serialized() {
    let f = fixture(Vec::new());
    let service = Arc::new(f.service);
    let mut handles = Vec::new();
    for n in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.create(Item::new(&format!("item-{n}"))).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    let items = service.list_all().await.unwrap();
    assert_eq!(items.len(), 16);
    let expected: Vec<Option<i32>> = (0..16).map(Some).collect();
    let actual: Vec<Option<i32>> = items.iter().map(|item| item.position).collect();
    assert_eq!(actual, expected);
}
