//! Checkout example binary
//!
//! Walks a cart session end to end: add and adjust items, watch committed
//! snapshots arrive, confirm an order, clear the cart, and restore a second
//! session from the persisted document.

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trolley_core::{
    CartAction, CartEnvironment, Clock, Money, Order, PaymentMethod, Product, ProductId,
    ShippingDetails, SystemClock,
};
use trolley_runtime::{CartStore, JsonFileStore};

fn catalog_product(id: &str, name: &str, cents: i64) -> Product {
    Product::new(
        ProductId::new(id.to_string()),
        name.to_string(),
        Money::from_cents(cents),
    )
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checkout=info,trolley_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Checkout Example: Trolley Cart Engine ===\n");

    // One JSON document backs the whole session: first CLI argument, or a
    // default in the temp dir. Remove any leftover from a previous run so
    // the walkthrough starts clean.
    let path = std::env::args().nth(1).map_or_else(
        || std::env::temp_dir().join("trolley-checkout-demo.json"),
        std::path::PathBuf::from,
    );
    let _ = std::fs::remove_file(&path);
    tracing::info!(path = %path.display(), "session document");

    let store = CartStore::new(CartEnvironment::new(JsonFileStore::new(&path), SystemClock));

    // A UI surface: prints the cart badge on every committed snapshot
    let mut updates = store.subscribe();
    let badge = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let (items, price) = {
                let snapshot = updates.borrow_and_update();
                (snapshot.total_items(), snapshot.total_price())
            };
            println!("    [badge] {items} items, {price}");
        }
    });

    println!(">>> Adding two canvas totes");
    store.send(CartAction::AddItem {
        product: catalog_product("tote-01", "Canvas Tote", 1_900),
        quantity: 2,
    });

    println!(">>> Adding one enamel mug");
    store.send(CartAction::add_one(catalog_product("mug-07", "Enamel Mug", 1_400)));

    println!(">>> One more tote (merges into the existing row)");
    store.send(CartAction::add_one(catalog_product("tote-01", "Canvas Tote", 1_900)));

    println!(">>> Setting the mug quantity to 3");
    store.send(CartAction::UpdateQuantity {
        id: ProductId::new("mug-07".to_string()),
        quantity: 3,
    });

    store.state(|s| {
        println!("\nCart: {} rows, {} items, {}", s.items().len(), s.total_items(), s.total_price());
        for line in s.items() {
            println!(
                "  {} x{} @ {} = {}",
                line.name,
                line.quantity,
                line.unit_price,
                line.line_total()
            );
        }
    });

    // Confirm the order, then clear the cart as its own step
    let shipping_fee = Money::from_cents(500);
    let order = Order::place(
        store.state(|s| s.items().to_vec()),
        ShippingDetails {
            full_name: "Jordan Vance".to_string(),
            street: "12 Canal St".to_string(),
            city: "Portland".to_string(),
            zip_code: "97201".to_string(),
            country: "US".to_string(),
            phone: "+1 555 0100".to_string(),
        },
        PaymentMethod::Online,
        shipping_fee,
        store.environment().clock.now(),
    );
    println!(
        "\n>>> Confirming order {} ({} + {} shipping = {})",
        order.id, order.total_amount, shipping_fee, order.order_total
    );
    store.send(CartAction::AddOrder { order });

    println!(">>> Clearing the cart");
    store.send(CartAction::ClearCart);

    // Let the badge task drain its queue before the walkthrough moves on
    tokio::time::sleep(Duration::from_millis(50)).await;
    badge.abort();

    // A fresh store over the same document: the history is back, the cart is not
    let restored = CartStore::new(CartEnvironment::new(JsonFileStore::new(&path), SystemClock));
    restored.state(|s| {
        println!("\nRestored session from {}", path.display());
        println!("  cart rows: {}", s.items().len());
        println!("  orders:    {}", s.orders().len());
        for order in s.orders() {
            println!(
                "    {} [{}] placed {} for {}",
                order.id,
                order.status,
                order.order_date.format("%Y-%m-%d %H:%M"),
                order.order_total
            );
        }
    });

    println!("\n=== Walkthrough Complete ===");
    println!("\nKey concepts demonstrated:");
    println!("  • State: CartState (rows, history, derived totals)");
    println!("  • Action: CartAction (every mutation a surface can request)");
    println!("  • Reducer: pure function (state, action) → (new state, effects)");
    println!("  • Store: serializes mutations, publishes consistent snapshots");
    println!("  • Environment: injected persistence adapter and clock");
}
