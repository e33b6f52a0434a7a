//! # Trolley Core
//!
//! Domain types and pure mutation logic for the cart/order state engine.
//!
//! This crate is the functional core: it knows nothing about locks, channels,
//! files, or logging. The runtime crate drives it.
//!
//! ## Core Concepts
//!
//! - **State**: [`CartState`], the rows, order history, transient selection,
//!   and the two derived aggregates, kept consistent inside every mutation
//! - **Action**: [`CartAction`], every mutation consumers can request
//! - **Reducer**: [`CartReducer`], pure function
//!   `(State, Action, Environment) → Effects`
//! - **Effect**: [`Effect`], side effect descriptions (not execution)
//! - **Environment**: [`CartEnvironment`], injected dependencies via traits
//!
//! ## Invariants
//!
//! - At most one row per product id; additions merge
//! - No row rests with quantity zero; removal is the only path to zero
//! - `total_items`/`total_price` are projections of the rows, never
//!   independently settable
//! - Orders are append-only, most recent first, and survive cart clears
//!
//! ## Example
//!
//! ```
//! use trolley_core::{
//!     CartAction, CartEnvironment, CartReducer, CartState, Money, Product, ProductId, Reducer,
//! };
//!
//! let reducer = CartReducer::new();
//! let env = CartEnvironment::in_memory();
//! let mut state = CartState::new();
//!
//! let product = Product::new(
//!     ProductId::new("p1".to_string()),
//!     "Canvas Tote".to_string(),
//!     Money::from_cents(1_900),
//! );
//! reducer.reduce(
//!     &mut state,
//!     CartAction::AddItem { product, quantity: 2 },
//!     &env,
//! );
//!
//! assert_eq!(state.total_items(), 2);
//! assert_eq!(state.total_price(), Money::from_cents(3_800));
//! ```

pub mod actions;
pub mod effects;
pub mod environment;
pub mod error;
pub mod money;
pub mod orders;
pub mod reducer;
pub mod snapshot;
pub mod state;

// Re-export main types for convenience
pub use actions::CartAction;
pub use effects::Effect;
pub use environment::{CartEnvironment, Clock, MemorySnapshotStore, SnapshotStore, SystemClock};
pub use error::{Result, SnapshotError};
pub use money::Money;
pub use orders::{Order, OrderId, OrderStatus, PaymentMethod, ShippingDetails};
pub use reducer::{CartReducer, Reducer};
pub use snapshot::CartSnapshot;
pub use state::{CartState, LineItem, Product, ProductId};

// Re-export commonly used types
pub use smallvec::{SmallVec, smallvec};
