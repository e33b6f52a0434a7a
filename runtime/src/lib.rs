//! # Trolley Runtime
//!
//! The imperative shell around [`trolley_core`]: a store that serializes
//! mutations, publishes consistent snapshots, and executes persistence
//! effects.
//!
//! ## Guarantees
//!
//! - **Atomic mutations**: each action reduces a draft of the current state
//!   under a single write lock and commits it as one assignment, so readers
//!   and subscribers never observe fresh rows next to stale aggregates.
//! - **Synchronous visibility**: `send` returns with the in-memory state
//!   already updated; persistence happens after the commit, outside the
//!   state lock, and its latency or failure never delays a read.
//! - **Absorbed failures**: adapter errors are logged and dropped. The
//!   in-memory state stays authoritative for the rest of the session.
//!
//! ## Example
//!
//! ```
//! use trolley_core::{CartAction, CartEnvironment, Money, Product, ProductId};
//! use trolley_runtime::CartStore;
//!
//! let store = CartStore::new(CartEnvironment::in_memory());
//! store.send(CartAction::AddItem {
//!     product: Product::new(
//!         ProductId::new("p1".to_string()),
//!         "Canvas Tote".to_string(),
//!         Money::from_cents(1_900),
//!     ),
//!     quantity: 2,
//! });
//!
//! assert_eq!(store.state(|state| state.total_items()), 2);
//! ```

pub mod persist;

pub use persist::JsonFileStore;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::watch;
use trolley_core::{
    CartAction, CartEnvironment, CartReducer, CartSnapshot, CartState, Clock, Effect, ProductId,
    Reducer, SnapshotStore,
};

/// The store: single source of truth for the live cart and the order
/// history.
///
/// Cheap to clone; clones share state, publication channel, and persistence
/// bookkeeping, so every UI surface can hold its own handle.
pub struct CartStore<S, C>
where
    S: SnapshotStore + Clone,
    C: Clock + Clone,
{
    state: Arc<RwLock<CartState>>,
    reducer: CartReducer<S, C>,
    environment: CartEnvironment<S, C>,
    /// Bumped under the state write lock on every committed change.
    revision: Arc<AtomicU64>,
    /// Revision of the last snapshot the adapter accepted. Guards save
    /// ordering so a slow save can never overwrite a newer one.
    last_saved: Arc<Mutex<u64>>,
    snapshot_tx: Arc<watch::Sender<CartState>>,
}

impl<S, C> CartStore<S, C>
where
    S: SnapshotStore + Clone,
    C: Clock + Clone,
{
    /// Creates a store initialized from the persistence adapter.
    ///
    /// A missing snapshot starts an empty cart. A failing or undecodable
    /// snapshot is logged and also starts an empty cart; construction never
    /// fails, because an interactive session must work even when storage
    /// does not.
    #[must_use]
    pub fn new(environment: CartEnvironment<S, C>) -> Self {
        let initial = match environment.snapshots.load() {
            Ok(Some(snapshot)) => {
                let state = CartState::from(snapshot);
                tracing::info!(
                    items = state.items().len(),
                    orders = state.orders().len(),
                    "cart state restored"
                );
                state
            }
            Ok(None) => CartState::new(),
            Err(error) => {
                tracing::warn!(error = %error, "failed to load cart snapshot, starting empty");
                CartState::new()
            }
        };
        Self::with_state(initial, environment)
    }

    /// Creates a store over a known state, skipping the adapter load.
    #[must_use]
    pub fn with_state(initial: CartState, environment: CartEnvironment<S, C>) -> Self {
        let (snapshot_tx, _) = watch::channel(initial.clone());
        Self {
            state: Arc::new(RwLock::new(initial)),
            reducer: CartReducer::new(),
            environment,
            revision: Arc::new(AtomicU64::new(0)),
            last_saved: Arc::new(Mutex::new(0)),
            snapshot_tx: Arc::new(snapshot_tx),
        }
    }

    /// Processes one action synchronously.
    ///
    /// When `send` returns, the state (rows plus both aggregates) is already
    /// committed and published. Invalid requests degrade to no-ops and
    /// publish nothing.
    pub fn send(&self, action: CartAction) {
        let kind = action.kind();

        let (effects, committed, revision) = {
            // A panicking reducer can only have poisoned a discarded draft,
            // so recovering the guard is sound.
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let mut draft = guard.clone();
            let effects = self.reducer.reduce(&mut draft, action, &self.environment);
            if draft == *guard {
                tracing::debug!(action = kind, "cart action left state unchanged");
                return;
            }
            *guard = draft.clone();
            let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
            // Publish while still holding the write lock so subscribers see
            // commits in order.
            self.snapshot_tx.send_replace(draft.clone());
            (effects, draft, revision)
        };

        tracing::debug!(
            action = kind,
            revision,
            items = committed.items().len(),
            total_items = committed.total_items(),
            "cart action committed"
        );

        for effect in effects {
            match effect {
                Effect::Persist => self.persist(&committed, revision),
            }
        }
    }

    fn persist(&self, state: &CartState, revision: u64) {
        let snapshot = CartSnapshot::from(state);
        let mut last_saved = self
            .last_saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *last_saved >= revision {
            tracing::debug!(
                revision,
                last_saved = *last_saved,
                "skipping save of outdated snapshot"
            );
            return;
        }
        match self.environment.snapshots.save(&snapshot) {
            Ok(()) => *last_saved = revision,
            Err(error) => {
                // In-memory state stays authoritative; leaving last_saved
                // behind lets the next successful save catch up.
                tracing::warn!(error = %error, revision, "failed to persist cart snapshot");
            }
        }
    }

    /// Reads current state via a closure, so the lock is released promptly.
    ///
    /// ```
    /// # use trolley_core::CartEnvironment;
    /// # use trolley_runtime::CartStore;
    /// # let store = CartStore::new(CartEnvironment::in_memory());
    /// let count = store.state(|state| state.orders().len());
    /// ```
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&CartState) -> T,
    {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Quantity held for a product, or 0 when absent.
    #[must_use]
    pub fn item_quantity(&self, id: &ProductId) -> u32 {
        self.state(|state| state.quantity_of(id))
    }

    /// Subscribes to committed snapshots.
    ///
    /// Every received value is one complete, internally consistent state;
    /// no-op actions never wake subscribers.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.snapshot_tx.subscribe()
    }

    /// The injected dependencies, for collaborators that share them (the
    /// checkout flow stamps orders from the same clock).
    #[must_use]
    pub const fn environment(&self) -> &CartEnvironment<S, C> {
        &self.environment
    }
}

impl<S, C> Clone for CartStore<S, C>
where
    S: SnapshotStore + Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: CartReducer::new(),
            environment: self.environment.clone(),
            revision: Arc::clone(&self.revision),
            last_saved: Arc::clone(&self.last_saved),
            snapshot_tx: Arc::clone(&self.snapshot_tx),
        }
    }
}
