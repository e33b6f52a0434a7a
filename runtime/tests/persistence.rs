//! Integration tests for the persistence boundary: restore on startup,
//! save gating, failure absorption, and the file-backed adapter.

use trolley_core::{
    CartAction, CartEnvironment, CartSnapshot, CartState, Clock, Money, PaymentMethod, ProductId,
};
use trolley_runtime::{CartStore, JsonFileStore};
use trolley_testing::fixtures::{line_item, product, sample_order, shipping_details};
use trolley_testing::mocks::{FixedClock, RecordingSnapshotStore, test_clock};

type TestStore = CartStore<RecordingSnapshotStore, FixedClock>;

fn store_over(snapshots: RecordingSnapshotStore) -> TestStore {
    CartStore::new(CartEnvironment::new(snapshots, test_clock()))
}

fn pid(id: &str) -> ProductId {
    ProductId::new(id.to_string())
}

#[test]
fn startup_restores_rows_and_history_and_recomputes_aggregates() {
    let snapshots = RecordingSnapshotStore::with_snapshot(CartSnapshot {
        items: vec![line_item("p1", 100, 2), line_item("p2", 50, 1)],
        orders: vec![sample_order(test_clock().now())],
    });

    let store = store_over(snapshots);

    store.state(|s| {
        assert_eq!(s.items().len(), 2);
        assert_eq!(s.total_items(), 3);
        assert_eq!(s.total_price(), Money::from_cents(250));
        assert_eq!(s.orders().len(), 1);
        assert!(s.selected().is_empty());
    });
}

#[test]
fn load_failure_degrades_to_an_empty_cart() {
    let snapshots = RecordingSnapshotStore::failing();
    let store = store_over(snapshots.clone());

    assert!(store.state(CartState::is_empty));

    // The session keeps working once storage recovers
    snapshots.set_failing(false);
    store.send(CartAction::add_one(product("p1", 100)));
    assert_eq!(store.state(|s| s.total_items()), 1);
    assert_eq!(snapshots.saves(), 1);
}

#[test]
fn each_durable_mutation_saves_once() {
    let snapshots = RecordingSnapshotStore::new();
    let store = store_over(snapshots.clone());

    store.send(CartAction::add_one(product("p1", 100)));
    assert_eq!(snapshots.saves(), 1);

    store.send(CartAction::UpdateQuantity {
        id: pid("p1"),
        quantity: 4,
    });
    assert_eq!(snapshots.saves(), 2);

    store.send(CartAction::RemoveItem { id: pid("p1") });
    assert_eq!(snapshots.saves(), 3);
}

#[test]
fn ineffective_actions_do_not_save() {
    let snapshots = RecordingSnapshotStore::new();
    let store = store_over(snapshots.clone());

    store.send(CartAction::RemoveItem { id: pid("ghost") });
    store.send(CartAction::ClearCart);
    store.send(CartAction::AddItem {
        product: product("p1", 100),
        quantity: 0,
    });
    store.send(CartAction::UpdateQuantity {
        id: pid("ghost"),
        quantity: 3,
    });

    assert_eq!(snapshots.saves(), 0);
}

#[test]
fn selection_changes_are_never_written_out() {
    let snapshots = RecordingSnapshotStore::new();
    let store = store_over(snapshots.clone());

    store.send(CartAction::add_one(product("p1", 100)));
    assert_eq!(snapshots.saves(), 1);

    // Selecting is transient; only the row removal that follows is durable
    store.send(CartAction::SetSelected {
        ids: vec![pid("p1")],
    });
    assert_eq!(snapshots.saves(), 1);

    store.send(CartAction::RemoveSelected);
    assert_eq!(snapshots.saves(), 2);
}

#[test]
#[allow(clippy::unwrap_used)]
fn saved_document_carries_rows_and_history_only() {
    let snapshots = RecordingSnapshotStore::new();
    let store = store_over(snapshots.clone());

    store.send(CartAction::AddItem {
        product: product("p1", 100),
        quantity: 2,
    });
    store.send(CartAction::AddOrder {
        order: sample_order(test_clock().now()),
    });

    let saved = snapshots.last_snapshot().unwrap();
    store.state(|s| {
        assert_eq!(saved.items, s.items().to_vec());
        assert_eq!(saved.orders, s.orders().to_vec());
    });
}

#[test]
#[allow(clippy::unwrap_used)]
fn save_failures_never_block_mutations_and_recovery_catches_up() {
    let snapshots = RecordingSnapshotStore::new();
    let store = store_over(snapshots.clone());

    store.send(CartAction::add_one(product("p1", 100)));
    assert_eq!(snapshots.saves(), 1);

    // Storage goes down; the in-memory cart keeps moving
    snapshots.set_failing(true);
    store.send(CartAction::add_one(product("p2", 200)));
    assert_eq!(store.state(|s| s.items().len()), 2);
    assert_eq!(snapshots.saves(), 1);
    assert_eq!(snapshots.last_snapshot().unwrap().items.len(), 1);

    // First durable mutation after recovery writes the current state
    snapshots.set_failing(false);
    store.send(CartAction::add_one(product("p3", 300)));
    assert_eq!(snapshots.saves(), 2);
    assert_eq!(snapshots.last_snapshot().unwrap().items.len(), 3);
}

#[test]
#[allow(clippy::unwrap_used)]
fn cart_and_history_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");

    // Session one: shop, confirm an order, clear the cart
    {
        let store = CartStore::new(CartEnvironment::new(JsonFileStore::new(&path), test_clock()));
        store.send(CartAction::AddItem {
            product: product("p1", 10_000),
            quantity: 2,
        });
        let order = trolley_core::Order::place(
            store.state(|s| s.items().to_vec()),
            shipping_details(),
            PaymentMethod::CashOnDelivery,
            Money::from_cents(5_000),
            test_clock().now(),
        );
        store.send(CartAction::AddOrder { order });
        store.send(CartAction::ClearCart);
    }

    // Session two: the history is back, the cart is not
    let store = CartStore::new(CartEnvironment::new(JsonFileStore::new(&path), test_clock()));
    store.state(|s| {
        assert!(s.is_empty());
        assert_eq!(s.orders().len(), 1);
        assert_eq!(s.orders()[0].order_total, Money::from_cents(25_000));
        assert_eq!(s.orders()[0].payment_method, PaymentMethod::CashOnDelivery);
    });
}

#[test]
#[allow(clippy::unwrap_used)]
fn hand_edited_document_is_sanitized_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    std::fs::write(
        &path,
        r#"{
            "items": [
                { "id": "p1", "name": "A", "price": 100, "quantity": 1 },
                { "id": "p1", "name": "A", "price": 100, "quantity": 2 },
                { "id": "p2", "name": "B", "price": 50, "quantity": 0 }
            ],
            "orders": []
        }"#,
    )
    .unwrap();

    let store = CartStore::new(CartEnvironment::new(JsonFileStore::new(&path), test_clock()));
    store.state(|s| {
        assert_eq!(s.items().len(), 1);
        assert_eq!(s.quantity_of(&pid("p1")), 3);
        assert_eq!(s.total_price(), Money::from_cents(300));
    });
}
