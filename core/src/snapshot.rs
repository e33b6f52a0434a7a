//! The persisted snapshot: what survives a session.
//!
//! Only the line items and the order history are written out. The selection
//! set is transient by contract, and the aggregates are derived, so a loaded
//! snapshot always goes through [`CartState::from_parts`] to be sanitized
//! and recomputed rather than trusted.

use crate::state::{CartState, LineItem};
use crate::orders::Order;
use serde::{Deserialize, Serialize};

/// One JSON document under one storage key.
///
/// Both fields default to empty so partially written blobs still load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Live cart rows at capture time.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Order history at capture time, most recent first.
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl CartSnapshot {
    /// Whether the snapshot carries no rows and no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.orders.is_empty()
    }
}

impl From<&CartState> for CartSnapshot {
    /// Captures the durable parts of a state. Selection and aggregates are
    /// intentionally unrepresentable here.
    fn from(state: &CartState) -> Self {
        Self {
            items: state.items().to_vec(),
            orders: state.orders().to_vec(),
        }
    }
}

impl From<CartSnapshot> for CartState {
    fn from(snapshot: CartSnapshot) -> Self {
        Self::from_parts(snapshot.items, snapshot.orders)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::state::{Product, ProductId};

    fn line(id: &str, cents: i64, quantity: u32) -> LineItem {
        LineItem::new(
            Product::new(
                ProductId::new(id.to_string()),
                format!("Item {id}"),
                Money::from_cents(cents),
            ),
            quantity,
        )
    }

    #[test]
    fn document_has_only_items_and_orders() {
        let state = CartState::from_parts(vec![line("p1", 100, 2)], Vec::new());
        let value = serde_json::to_value(CartSnapshot::from(&state)).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["items", "orders"]);
        assert_eq!(value["items"][0]["id"], "p1");
        assert_eq!(value["items"][0]["price"], 100);
    }

    #[test]
    fn restore_recomputes_aggregates() {
        let snapshot = CartSnapshot {
            items: vec![line("p1", 100, 2), line("p2", 50, 1)],
            orders: Vec::new(),
        };
        let state = CartState::from(snapshot);

        assert_eq!(state.total_items(), 3);
        assert_eq!(state.total_price(), Money::from_cents(250));
        assert!(state.selected().is_empty());
    }

    #[test]
    fn restore_sanitizes_tampered_rows() {
        // A hand-edited blob with a duplicate id and a zero-quantity row.
        let snapshot: CartSnapshot = serde_json::from_value(serde_json::json!({
            "items": [
                { "id": "p1", "name": "A", "price": 100, "quantity": 1 },
                { "id": "p1", "name": "A", "price": 100, "quantity": 2 },
                { "id": "p2", "name": "B", "price": 50, "quantity": 0 },
            ],
            "orders": [],
        }))
        .unwrap();
        let state = CartState::from(snapshot);

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.quantity_of(&ProductId::new("p1".to_string())), 3);
        assert_eq!(state.total_price(), Money::from_cents(300));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let snapshot: CartSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
