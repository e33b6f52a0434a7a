//! Side effects as values.
//!
//! The reducer never performs I/O. It describes what should happen next and
//! the runtime executes it after the state change is committed, so a failing
//! side effect can never tear or roll back the in-memory state.

use serde::{Deserialize, Serialize};

/// A side effect requested by the reducer.
///
/// The cart has exactly one side channel: writing the durable snapshot.
/// Actions that leave the durable state untouched (selection changes,
/// no-ops) produce an empty effect list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Capture the current snapshot and hand it to the persistence adapter.
    Persist,
}
