//! Deterministic fixtures for cart scenarios.
//!
//! These build the smallest valid value of each domain type so tests read
//! as scenario descriptions rather than constructor noise.

use chrono::{DateTime, Utc};
use trolley_core::{
    LineItem, Money, Order, PaymentMethod, Product, ProductId, ShippingDetails,
};

/// A product with the given id and unit price in cents.
#[must_use]
pub fn product(id: &str, cents: i64) -> Product {
    Product::new(
        ProductId::new(id.to_string()),
        format!("Item {id}"),
        Money::from_cents(cents),
    )
}

/// A product carrying the pass-through display metadata.
#[must_use]
pub fn product_with_metadata(id: &str, cents: i64) -> Product {
    product(id, cents)
        .with_category("apparel".to_string())
        .with_image(format!("https://cdn.example.com/{id}.jpg"))
        .with_selected_color("navy".to_string())
        .with_selected_size("M".to_string())
}

/// A cart row for the given product id, unit price, and quantity.
#[must_use]
pub fn line_item(id: &str, cents: i64, quantity: u32) -> LineItem {
    LineItem::new(product(id, cents), quantity)
}

/// A filled-in shipping form.
#[must_use]
pub fn shipping_details() -> ShippingDetails {
    ShippingDetails {
        full_name: "Jordan Vance".to_string(),
        street: "12 Canal St".to_string(),
        city: "Portland".to_string(),
        zip_code: "97201".to_string(),
        country: "US".to_string(),
        phone: "+1 555 0100".to_string(),
    }
}

/// A one-row online order placed at the given instant.
#[must_use]
pub fn sample_order(placed_at: DateTime<Utc>) -> Order {
    Order::place(
        vec![line_item("p1", 10_000, 1)],
        shipping_details(),
        PaymentMethod::Online,
        Money::from_cents(5_000),
        placed_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::test_clock;
    use trolley_core::{Clock, OrderStatus};

    #[test]
    fn fixtures_build_consistent_values() {
        assert_eq!(line_item("p1", 100, 2).line_total(), Money::from_cents(200));

        let order = sample_order(test_clock().now());
        assert_eq!(order.total_amount, Money::from_cents(10_000));
        assert_eq!(order.order_total, Money::from_cents(15_000));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn metadata_fixture_fills_every_optional() {
        let product = product_with_metadata("p9", 100);
        assert!(product.category.is_some());
        assert!(product.image.is_some());
        assert!(product.selected_color.is_some());
        assert!(product.selected_size.is_some());
    }
}
