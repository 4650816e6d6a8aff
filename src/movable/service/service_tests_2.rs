use super::*;

#[tokio::test]
async fn test_move_down_first_item() {
    let f = fixture(three_items());
    let first = f.service.get(Some(1)).await.unwrap().unwrap();
    f.service.move_down(&first).await.unwrap();
    let stored = f.repository.stored().await;
    assert_eq!(
        positions(&stored),
        vec![(Some(1), Some(1)), (Some(2), Some(0)), (Some(3), Some(2))]
    );
    let items = f.service.list_all().await.unwrap();
    let order: Vec<Option<i32>> = items.iter().map(|item| item.id).collect();
    assert_eq!(order, vec![Some(2), Some(1), Some(3)]);
}

#[tokio::test]
async fn test_move_up_swaps_only_neighbours() {
    let f = fixture(vec![
        Item::stored(1, 0, "a"),
        Item::stored(2, 1, "b"),
        Item::stored(3, 2, "c"),
        Item::stored(4, 3, "d"),
    ]);
    let third = f.service.get(Some(3)).await.unwrap().unwrap();
    f.service.move_up(&third).await.unwrap();
    let items = f.service.list_all().await.unwrap();
    assert_eq!(
        positions(&items),
        vec![
            (Some(1), Some(0)),
            (Some(3), Some(1)),
            (Some(2), Some(2)),
            (Some(4), Some(3)),
        ]
    );
}

#[tokio::test]
async fn test_move_keeps_cache_coherent_without_reload() {
    let f = fixture(three_items());
    let second = f.service.get(Some(2)).await.unwrap().unwrap();
    f.service.move_up(&second).await.unwrap();
    let cached = f.service.list_all().await.unwrap();
    let stored = f.repository.stored().await;
    for item in &cached {
        let persisted = stored.iter().find(|s| s.id == item.id).unwrap();
        assert_eq!(persisted.position, item.position);
    }
    assert_eq!(f.repository.list_calls(), 1);
}

#[tokio::test]
async fn test_move_up_first_item_rejected() {
    let f = fixture(three_items());
    let first = f.service.get(Some(1)).await.unwrap().unwrap();
    let result = f.service.move_up(&first).await;
    assert!(matches!(
        result,
        Err(ServiceError::NotMovable {
            id: 1,
            direction: Direction::Up
        })
    ));
    let stored = f.repository.stored().await;
    assert_eq!(stored, three_items());
}

#[tokio::test]
async fn test_move_down_last_item_rejected() {
    let f = fixture(three_items());
    let last = f.service.get(Some(3)).await.unwrap().unwrap();
    let result = f.service.move_down(&last).await;
    assert!(matches!(
        result,
        Err(ServiceError::NotMovable {
            id: 3,
            direction: Direction::Down
        })
    ));
}

#[tokio::test]
async fn test_move_unknown_item() {
    let f = fixture(three_items());
    let result = f.service.move_down(&Item::stored(9, 0, "ghost")).await;
    assert!(matches!(result, Err(ServiceError::NotInCollection(9))));
}

#[tokio::test]
async fn test_move_without_position() {
    let f = fixture(three_items());
    let mut item = Item::stored(1, 0, "first");
    item.position = None;
    let result = f.service.move_down(&item).await;
    assert!(matches!(result, Err(ServiceError::NullArgument("position"))));
}

#[tokio::test]
async fn test_renumber_positions_closes_gaps() {
    let f = fixture(vec![
        Item::stored(1, 10, "a"),
        Item::stored(2, 4, "b"),
        Item::stored(3, 4, "c"),
    ]);
    f.service.renumber_positions().await.unwrap();
    let items = f.service.list_all().await.unwrap();
    assert_eq!(
        positions(&items),
        vec![(Some(2), Some(0)), (Some(3), Some(1)), (Some(1), Some(2))]
    );
    let mut stored = f.repository.stored().await;
    stored.sort_by_key(|item| item.position);
    assert_eq!(positions(&stored), positions(&items));
}

#[tokio::test]
async fn test_renumber_positions_idempotent() {
    let f = fixture(vec![
        Item::stored(1, 5, "a"),
        Item::stored(2, 3, "b"),
        Item::stored(3, 9, "c"),
    ]);
    f.service.renumber_positions().await.unwrap();
    let first = f.service.list_all().await.unwrap();
    f.service.renumber_positions().await.unwrap();
    let second = f.service.list_all().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        positions(&second),
        vec![(Some(2), Some(0)), (Some(1), Some(1)), (Some(3), Some(2))]
    );
}

#[tokio::test]
async fn test_duplicate_inserts_copy_and_clears_cache() {
    let f = fixture(three_items());
    f.service.list_all().await.unwrap();
    let second = f.service.get(Some(2)).await.unwrap().unwrap();
    let copy = f.service.duplicate(&second).await.unwrap();
    assert_eq!(copy.id, Some(4));
    assert_eq!(copy.name, "second");
    assert!(copy.position.is_none());
    assert!(f.cache.is_empty().await);
    assert_eq!(f.service.list_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_duplicate_with_custom_copy_strategy() {
    let repository = Arc::new(FlakyRepository::with_items(three_items()));
    let cache: Arc<InMemoryCache<Item>> = Arc::new(InMemoryCache::new());
    let service = MovableService::new(repository.clone(), cache, "items", |source: &Item| Item {
        id: None,
        position: source.position,
        name: format!("{} (copy)", source.name),
    });
    let first = service.get(Some(1)).await.unwrap().unwrap();
    let copy = service.duplicate(&first).await.unwrap();
    assert_eq!(copy.name, "first (copy)");
    assert_eq!(copy.position, Some(0));
    let items = service.list_all().await.unwrap();
    let order: Vec<Option<i32>> = items.iter().map(|item| item.id).collect();
    assert_eq!(order, vec![Some(1), Some(4), Some(2), Some(3)]);
}

#[tokio::test]
async fn test_reset_empties_repository_and_cache() {
    let f = fixture(three_items());
    f.service.list_all().await.unwrap();
    f.cache.put("other", vec![Item::stored(7, 0, "x")]).await.unwrap();
    f.service.reset().await.unwrap();
    assert!(f.cache.is_empty().await);
    assert!(f.repository.stored().await.is_empty());
    assert!(f.service.list_all().await.unwrap().is_empty());
}
