//! Injected dependencies: time and snapshot persistence.
//!
//! External capabilities are abstracted behind traits and handed to the
//! store through [`CartEnvironment`], so the cart's invariants can be tested
//! without a real storage backend and with a deterministic clock.

use crate::error::Result;
use crate::snapshot::CartSnapshot;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

/// Abstracts time operations for testability.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Key-value persistence adapter for the cart snapshot.
///
/// Synchronous from the store's point of view: the runtime calls `save`
/// after a mutation commits, outside the state lock, and absorbs failures.
/// Implementations must not block mutation visibility on their own latency
/// guarantees; in-memory state stays authoritative either way.
pub trait SnapshotStore: Send + Sync {
    /// Loads the persisted snapshot, or `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`](crate::error::SnapshotError) when the
    /// backing storage fails or the stored document cannot be decoded.
    fn load(&self) -> Result<Option<CartSnapshot>>;

    /// Replaces the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`](crate::error::SnapshotError) when the
    /// snapshot cannot be encoded or the backing storage rejects the write.
    fn save(&self, snapshot: &CartSnapshot) -> Result<()>;
}

/// Volatile in-process adapter.
///
/// The default when no durable storage is available (tests, demos, server
/// rendering): the cart works normally and simply starts empty next session.
#[derive(Clone, Debug, Default)]
pub struct MemorySnapshotStore {
    inner: Arc<Mutex<Option<CartSnapshot>>>,
}

impl MemorySnapshotStore {
    /// Creates an empty volatile store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<CartSnapshot>> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| crate::error::SnapshotError::Storage("snapshot lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| crate::error::SnapshotError::Storage("snapshot lock poisoned".to_string()))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }
}

/// Dependencies injected into the cart store.
#[derive(Clone, Debug)]
pub struct CartEnvironment<S, C>
where
    S: SnapshotStore + Clone,
    C: Clock + Clone,
{
    /// Persistence adapter for the durable snapshot.
    pub snapshots: S,
    /// Clock used by checkout collaborators to stamp orders.
    pub clock: C,
}

impl<S, C> CartEnvironment<S, C>
where
    S: SnapshotStore + Clone,
    C: Clock + Clone,
{
    /// Creates a new environment.
    #[must_use]
    pub const fn new(snapshots: S, clock: C) -> Self {
        Self { snapshots, clock }
    }
}

impl CartEnvironment<MemorySnapshotStore, SystemClock> {
    /// Environment with volatile storage and the system clock.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemorySnapshotStore::new(), SystemClock)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemorySnapshotStore::new();
        assert_eq!(store.load().unwrap(), None);

        let snapshot = CartSnapshot::default();
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn memory_store_clones_share_contents() {
        let store = MemorySnapshotStore::new();
        let other = store.clone();
        store.save(&CartSnapshot::default()).unwrap();
        assert!(other.load().unwrap().is_some());
    }
}
