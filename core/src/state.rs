//! Cart state: products, line items, and the aggregate root.
//!
//! `CartState` owns the line-item collection, the order history, the
//! transient selection set, and the two derived aggregates. The collections
//! are private: consumers read through accessors and mutate only by sending
//! actions through a store, so the aggregates can never drift from the rows
//! they summarize.

use crate::money::Money;
use crate::orders::Order;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Stable identifier a catalog assigns to a product.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new `ProductId` from a string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product descriptor consumers pass when adding to the cart.
///
/// Carries the identifier, the unit price, and the display fields the cart
/// snapshots at add time. The cart never consults the catalog again after
/// the copy is taken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Product name for display.
    pub name: String,
    /// Price per unit in cents.
    pub price: Money,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional image reference.
    pub image: Option<String>,
    /// Color variant chosen by the shopper, if any.
    pub selected_color: Option<String>,
    /// Size variant chosen by the shopper, if any.
    pub selected_size: Option<String>,
}

impl Product {
    /// Creates a product descriptor with no variant metadata.
    ///
    /// A negative unit price is sanitized to zero here; price validation
    /// belongs to the catalog, not the cart.
    #[must_use]
    pub const fn new(id: ProductId, name: String, price: Money) -> Self {
        let price = if price.cents() < 0 { Money::ZERO } else { price };
        Self {
            id,
            name,
            price,
            category: None,
            image: None,
            selected_color: None,
            selected_size: None,
        }
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image: String) -> Self {
        self.image = Some(image);
        self
    }

    /// Sets the chosen color variant.
    #[must_use]
    pub fn with_selected_color(mut self, color: String) -> Self {
        self.selected_color = Some(color);
        self
    }

    /// Sets the chosen size variant.
    #[must_use]
    pub fn with_selected_size(mut self, size: String) -> Self {
        self.selected_size = Some(size);
        self
    }
}

/// A single cart row: one product and the quantity of it held.
///
/// Serializes with the persisted wire spelling (`id`, `price`, camelCase
/// variant fields). A `LineItem` at rest always has `quantity >= 1`; rows
/// that would reach zero are removed instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product name for display.
    pub name: String,
    /// Price per unit in cents.
    #[serde(rename = "price")]
    pub unit_price: Money,
    /// Quantity held in the cart.
    pub quantity: u32,
    /// Optional category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Color variant chosen by the shopper, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    /// Size variant chosen by the shopper, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl LineItem {
    /// Creates a line item by snapshotting a product's display fields.
    #[must_use]
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            unit_price: product.price,
            quantity,
            category: product.category,
            image: product.image,
            selected_color: product.selected_color,
            selected_size: product.selected_size,
        }
    }

    /// Calculates the total price for this line item.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// The aggregate root: live cart rows, order history, transient selection,
/// and the derived totals.
///
/// Invariants:
/// - `total_items() == Σ quantity` and `total_price() == Σ price × quantity`
///   over the current rows, recomputed inside every mutation.
/// - At most one row per [`ProductId`]; additions merge.
/// - No row rests with `quantity == 0`.
/// - `orders()` is most-recent-first and survives cart clears.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CartState {
    pub(crate) items: Vec<LineItem>,
    pub(crate) orders: Vec<Order>,
    pub(crate) selected: HashSet<ProductId>,
    pub(crate) total_items: u64,
    pub(crate) total_price: Money,
}

impl CartState {
    /// Creates an empty cart with no order history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a state from raw rows and an order history, enforcing the
    /// row invariants along the way: zero-quantity rows are dropped,
    /// duplicate product ids are merged, and both aggregates are recomputed.
    /// Stored aggregates are never trusted.
    #[must_use]
    pub fn from_parts(items: Vec<LineItem>, orders: Vec<Order>) -> Self {
        let mut merged: Vec<LineItem> = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match merged
                .iter_mut()
                .find(|line| line.product_id == item.product_id)
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => merged.push(item),
            }
        }

        let mut state = Self {
            items: merged,
            orders,
            selected: HashSet::new(),
            total_items: 0,
            total_price: Money::ZERO,
        };
        state.recalculate();
        state
    }

    /// Current cart rows, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Order history, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The transient selection set used by bulk operations.
    #[must_use]
    pub const fn selected(&self) -> &HashSet<ProductId> {
        &self.selected
    }

    /// Sum of all row quantities.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of `price × quantity` over all rows.
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// Whether the cart holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The row for a product, if present.
    #[must_use]
    pub fn item(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.product_id == *id)
    }

    /// Quantity held for a product, or 0 when absent.
    ///
    /// Pure read; UIs use it to choose between "Add to Cart" and a stepper.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.item(id).map_or(0, |line| line.quantity)
    }

    /// Recomputes both aggregates from the current rows. Called inside every
    /// mutation that touches the row collection, so readers never observe a
    /// stale total next to fresh rows.
    pub(crate) fn recalculate(&mut self) {
        self.total_items = self.items.iter().map(|line| u64::from(line.quantity)).sum();
        self.total_price = self.items.iter().map(LineItem::line_total).sum();
    }
}
