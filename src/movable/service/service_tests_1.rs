use super::*;

#[tokio::test]
async fn test_list_all_sorted_by_position() {
    let f = fixture(vec![
        Item::stored(1, 2, "c"),
        Item::stored(2, 0, "a"),
        Item::stored(3, 1, "b"),
    ]);
    let items = f.service.list_all().await.unwrap();
    assert_eq!(
        positions(&items),
        vec![(Some(2), Some(0)), (Some(3), Some(1)), (Some(1), Some(2))]
    );
}

#[tokio::test]
async fn test_list_all_twice_hits_cache() {
    let f = fixture(three_items());
    let first = f.service.list_all().await.unwrap();
    assert_eq!(f.repository.list_calls(), 1);
    let second = f.service.list_all().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(f.repository.list_calls(), 1);
}

#[tokio::test]
async fn test_list_all_stores_on_miss() {
    let f = fixture(three_items());
    assert!(f.cache.get("items").await.unwrap().is_none());
    f.service.list_all().await.unwrap();
    let cached = f.cache.get("items").await.unwrap().unwrap();
    assert_eq!(cached.len(), 3);
}

#[tokio::test]
async fn test_get_null_id() {
    let f = fixture(three_items());
    let result = f.service.get(None).await;
    assert!(matches!(result, Err(ServiceError::NullArgument("id"))));
    assert!(result.unwrap_err().is_precondition());
}

#[tokio::test]
async fn test_get_existing_and_missing() {
    let f = fixture(three_items());
    let found = f.service.get(Some(2)).await.unwrap();
    assert_eq!(found, Some(Item::stored(2, 1, "second")));
    let missing = f.service.get(Some(42)).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_get_after_cache_clear_repopulates() {
    let f = fixture(three_items());
    f.service.list_all().await.unwrap();
    f.cache.clear().await.unwrap();
    let found = f.service.get(Some(3)).await.unwrap();
    assert_eq!(found, Some(Item::stored(3, 2, "third")));
    assert_eq!(f.repository.list_calls(), 2);
}

#[tokio::test]
async fn test_create_positions_by_id() {
    let f = fixture(three_items());
    let created = f.service.create(Item::new("fourth")).await.unwrap();
    assert_eq!(created.id, Some(4));
    assert_eq!(created.position, Some(3));
    let fetched = f.service.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "fourth");
    assert_eq!(fetched.position, Some(3));
}

#[tokio::test]
async fn test_create_clears_cache() {
    let f = fixture(three_items());
    f.service.list_all().await.unwrap();
    f.cache.put("other", Vec::new()).await.unwrap();
    f.service.create(Item::new("fourth")).await.unwrap();
    assert!(f.cache.is_empty().await);
    let items = f.service.list_all().await.unwrap();
    assert_eq!(items.len(), 4);
}

#[tokio::test]
async fn test_create_ignores_supplied_position() {
    let f = fixture(Vec::new());
    let mut item = Item::new("only");
    item.position = Some(17);
    let created = f.service.create(item).await.unwrap();
    assert_eq!(created.position, Some(0));
}

#[tokio::test]
async fn test_update_patches_cache_in_place() {
    let f = fixture(three_items());
    f.service.list_all().await.unwrap();
    f.service
        .update(Item::stored(2, 1, "renamed"))
        .await
        .unwrap();
    let cached = f.cache.get("items").await.unwrap().unwrap();
    assert_eq!(cached[1], Item::stored(2, 1, "renamed"));
    assert_eq!(f.repository.list_calls(), 1);
    let stored = f.repository.stored().await;
    assert_eq!(stored[1].name, "renamed");
}

#[tokio::test]
async fn test_update_on_cache_miss() {
    let f = fixture(three_items());
    f.service
        .update(Item::stored(1, 0, "renamed"))
        .await
        .unwrap();
    let cached = f.cache.get("items").await.unwrap().unwrap();
    assert_eq!(cached.len(), 3);
    assert_eq!(cached[0].name, "renamed");
}

#[tokio::test]
async fn test_update_without_id() {
    let f = fixture(three_items());
    let result = f.service.update(Item::new("x")).await;
    assert!(matches!(result, Err(ServiceError::NullArgument("id"))));
}

#[tokio::test]
async fn test_delete_removes_from_cache_and_repository() {
    let f = fixture(three_items());
    f.service.list_all().await.unwrap();
    f.service
        .delete(&Item::stored(2, 1, "second"))
        .await
        .unwrap();
    let items = f.service.list_all().await.unwrap();
    assert_eq!(positions(&items), vec![(Some(1), Some(0)), (Some(3), Some(2))]);
    assert_eq!(f.repository.stored().await.len(), 2);
    assert_eq!(f.repository.list_calls(), 1);
}

#[tokio::test]
async fn test_delete_without_id() {
    let f = fixture(three_items());
    let result = f.service.delete(&Item::new("x")).await;
    assert!(matches!(result, Err(ServiceError::NullArgument("id"))));
}
