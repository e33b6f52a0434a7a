//! Integration tests for snapshot publication: wake discipline and the
//! consistency of every received value.

use tokio_test::{assert_pending, assert_ready, task};
use trolley_core::{CartAction, CartEnvironment, Money, ProductId};
use trolley_runtime::CartStore;
use trolley_testing::fixtures::product;
use trolley_testing::mocks::{FixedClock, RecordingSnapshotStore, test_clock};

type TestStore = CartStore<RecordingSnapshotStore, FixedClock>;

fn create_test_store() -> TestStore {
    CartStore::new(CartEnvironment::new(
        RecordingSnapshotStore::new(),
        test_clock(),
    ))
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn subscriber_wakes_on_commit_with_a_consistent_snapshot() {
    let store = create_test_store();
    let mut rx = store.subscribe();

    store.send(CartAction::AddItem {
        product: product("p1", 250),
        quantity: 4,
    });
    rx.changed().await.unwrap();

    let snapshot = rx.borrow_and_update();
    assert_eq!(snapshot.items().len(), 1);
    assert_eq!(snapshot.total_items(), 4);
    assert_eq!(snapshot.total_price(), Money::from_cents(1_000));
}

#[test]
#[allow(clippy::unwrap_used)]
fn ineffective_actions_never_wake_subscribers() {
    let store = create_test_store();
    let mut rx = store.subscribe();
    let mut waiting = task::spawn(rx.changed());
    assert_pending!(waiting.poll());

    store.send(CartAction::RemoveItem {
        id: ProductId::new("ghost".to_string()),
    });
    assert_pending!(waiting.poll());

    store.send(CartAction::add_one(product("p1", 100)));
    assert!(waiting.is_woken());
    assert_ready!(waiting.poll()).unwrap();
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn rapid_mutations_coalesce_to_the_latest_snapshot() {
    let store = create_test_store();
    let mut rx = store.subscribe();

    store.send(CartAction::add_one(product("p1", 100)));
    store.send(CartAction::add_one(product("p1", 100)));
    store.send(CartAction::UpdateQuantity {
        id: ProductId::new("p1".to_string()),
        quantity: 7,
    });

    rx.changed().await.unwrap();
    {
        let snapshot = rx.borrow_and_update();
        assert_eq!(snapshot.total_items(), 7);
        assert_eq!(snapshot.total_price(), Money::from_cents(700));
    }
    // Intermediate states were coalesced away; nothing else is pending
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn every_subscriber_receives_the_same_committed_state() {
    let store = create_test_store();
    let mut rx_a = store.subscribe();
    let mut rx_b = store.subscribe();

    store.send(CartAction::AddItem {
        product: product("p1", 100),
        quantity: 3,
    });
    rx_a.changed().await.unwrap();
    rx_b.changed().await.unwrap();

    assert_eq!(*rx_a.borrow(), *rx_b.borrow());
}

#[test]
#[allow(clippy::unwrap_used)]
fn late_subscribers_start_from_the_current_state() {
    let store = create_test_store();
    store.send(CartAction::AddItem {
        product: product("p1", 100),
        quantity: 2,
    });

    let rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());
    assert_eq!(rx.borrow().total_items(), 2);
}
