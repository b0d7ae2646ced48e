//! File-backed slot behavior across process restarts.

use std::sync::Arc;

use rocket_shoes_cart::{CART_SLOT_KEY, CartStore, JsonFileSlot, NullNotifier, SlotStore};
use rocket_shoes_core::ProductId;
use rocket_shoes_integration_tests::ScriptedCatalog;

fn catalog() -> Arc<ScriptedCatalog> {
    Arc::new(
        ScriptedCatalog::new()
            .with_product(1, "Tenis de Caminhada", 17990, 3)
            .with_product(2, "Tenis de Corrida", 13990, 5),
    )
}

#[tokio::test]
async fn test_cart_survives_restart_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog();

    {
        let slot = JsonFileSlot::new(dir.path());
        let mut store = CartStore::open(Arc::clone(&catalog), slot, NullNotifier).await;
        store.add_product(ProductId::new(1)).await.expect("add");
        store.add_product(ProductId::new(2)).await.expect("add");
        store.add_product(ProductId::new(1)).await.expect("add");
    }

    let slot = JsonFileSlot::new(dir.path());
    let store = CartStore::open(catalog, slot, NullNotifier).await;

    let summary: Vec<(i32, u32)> = store
        .items()
        .iter()
        .map(|i| (i.id.as_i32(), i.amount))
        .collect();
    assert_eq!(summary, vec![(1, 2), (2, 1)]);
}

#[tokio::test]
async fn test_snapshot_on_disk_is_plain_json() {
    let dir = tempfile::tempdir().expect("tempdir");

    let slot = JsonFileSlot::new(dir.path());
    let mut store = CartStore::open(catalog(), slot, NullNotifier).await;
    store.add_product(ProductId::new(1)).await.expect("add");

    let slot = JsonFileSlot::new(dir.path());
    let snapshot = slot
        .read(CART_SLOT_KEY)
        .await
        .expect("read")
        .expect("present");
    let value: serde_json::Value = serde_json::from_str(&snapshot).expect("valid json");

    let items = value.as_array().expect("array of line items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["amount"], 1);
    assert_eq!(items[0]["price"], 179.9);
}

#[tokio::test]
async fn test_corrupt_file_opens_empty_and_recovers() {
    let dir = tempfile::tempdir().expect("tempdir");

    let slot = JsonFileSlot::new(dir.path());
    slot.write(CART_SLOT_KEY, "][ nonsense").await.expect("write");

    let mut store = CartStore::open(catalog(), JsonFileSlot::new(dir.path()), NullNotifier).await;
    assert!(store.is_empty());

    // The next successful mutation replaces the bad snapshot.
    store.add_product(ProductId::new(1)).await.expect("add");

    let snapshot = JsonFileSlot::new(dir.path())
        .read(CART_SLOT_KEY)
        .await
        .expect("read")
        .expect("present");
    assert!(serde_json::from_str::<serde_json::Value>(&snapshot).is_ok());
}

#[tokio::test]
async fn test_missing_directory_opens_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("never-created");

    let store = CartStore::open(catalog(), JsonFileSlot::new(&missing), NullNotifier).await;
    assert!(store.is_empty());
}
