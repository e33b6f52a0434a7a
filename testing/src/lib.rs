//! # Trolley Testing
//!
//! Testing utilities and helpers for Trolley reducers and stores.
//!
//! This crate provides:
//! - Mock implementations of environment traits
//! - Deterministic fixtures for products, line items, and orders
//! - A fluent Given-When-Then harness for reducer tests
//!
//! ## Example
//!
//! ```
//! use trolley_testing::{ReducerTest, fixtures, harness::assertions};
//! use trolley_core::{CartAction, CartEnvironment, CartReducer, CartState};
//!
//! ReducerTest::new(CartReducer::new())
//!     .with_env(CartEnvironment::in_memory())
//!     .given_state(CartState::new())
//!     .when_action(CartAction::add_one(fixtures::product("p1", 100)))
//!     .then_state(|state| assert_eq!(state.total_items(), 1))
//!     .then_effects(assertions::assert_persists)
//!     .run();
//! ```

pub mod fixtures;
pub mod harness;
pub mod mocks;

// Re-export commonly used items
pub use harness::ReducerTest;
pub use mocks::{FixedClock, RecordingSnapshotStore, test_clock};
