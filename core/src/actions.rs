//! Cart actions: every mutation consumers can request, as data.

use crate::orders::Order;
use crate::state::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// All inputs the cart reducer processes.
///
/// Invalid requests degrade to no-ops rather than errors: this state backs
/// interactive UI, and a rejected click must never break rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartAction {
    /// Add a product to the cart, merging into an existing row for the same
    /// id. UIs without a quantity stepper send `quantity: 1`; a zero
    /// quantity is a no-op.
    AddItem {
        /// Product descriptor to snapshot.
        product: Product,
        /// How many units to add.
        quantity: u32,
    },

    /// Replace (not increment) a row's quantity. A target of zero or below
    /// removes the row entirely; an unknown id is a no-op, since decrement
    /// buttons race with removal.
    UpdateQuantity {
        /// Row to update.
        id: ProductId,
        /// Target quantity; zero or negative removes.
        quantity: i64,
    },

    /// Remove a row if present; no-op otherwise.
    RemoveItem {
        /// Row to remove.
        id: ProductId,
    },

    /// Remove every row in the current selection, then clear the selection.
    RemoveSelected,

    /// Replace the transient selection set wholesale. Never touches rows or
    /// aggregates, and is never persisted.
    SetSelected {
        /// The new selection.
        ids: Vec<ProductId>,
    },

    /// Empty the rows and the selection, zero the aggregates. The order
    /// history is untouched.
    ClearCart,

    /// Prepend a fully-formed order to the history (most recent first).
    /// Does not clear the cart: recording the order and clearing the cart
    /// are separate failure domains, so the checkout flow sends
    /// [`CartAction::ClearCart`] on its own once the order is durably
    /// recorded upstream.
    AddOrder {
        /// The confirmed order.
        order: Order,
    },
}

impl CartAction {
    /// Adds a single unit of a product, the common product-card case.
    #[must_use]
    pub const fn add_one(product: Product) -> Self {
        Self::AddItem {
            product,
            quantity: 1,
        }
    }

    /// Short label for log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddItem { .. } => "add_item",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::RemoveItem { .. } => "remove_item",
            Self::RemoveSelected => "remove_selected",
            Self::SetSelected { .. } => "set_selected",
            Self::ClearCart => "clear_cart",
            Self::AddOrder { .. } => "add_order",
        }
    }
}
