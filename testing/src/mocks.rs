//! Mock implementations of environment traits.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use trolley_core::{CartSnapshot, Clock, Result, SnapshotError, SnapshotStore};

/// Fixed clock for deterministic tests.
///
/// Always returns the same time, making tests reproducible.
///
/// # Example
///
/// ```
/// use trolley_testing::mocks::FixedClock;
/// use trolley_core::Clock;
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// let time1 = clock.now();
/// let time2 = clock.now();
/// assert_eq!(time1, time2); // Always the same!
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
///
/// # Panics
///
/// This function will panic if the hardcoded timestamp fails to parse,
/// which should never happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

#[derive(Debug, Default)]
struct Recording {
    snapshot: Option<CartSnapshot>,
    saves: usize,
    fail_saves: bool,
    fail_loads: bool,
}

/// Snapshot store that records every save for assertions.
///
/// Failure injection covers both directions so tests can exercise the
/// absorb-and-continue path: a failing load must produce an empty start,
/// a failing save must never surface to the caller.
///
/// # Example
///
/// ```
/// use trolley_testing::mocks::RecordingSnapshotStore;
/// use trolley_core::{CartSnapshot, SnapshotStore};
///
/// let store = RecordingSnapshotStore::new();
/// store.save(&CartSnapshot::default()).unwrap();
/// assert_eq!(store.saves(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingSnapshotStore {
    inner: Arc<RwLock<Recording>>,
}

impl RecordingSnapshotStore {
    /// Create an empty store that accepts every load and save
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with a snapshot, as if a prior session saved it
    #[must_use]
    pub fn with_snapshot(snapshot: CartSnapshot) -> Self {
        let store = Self::new();
        store.inner.write().unwrap().snapshot = Some(snapshot);
        store
    }

    /// Create a store whose loads and saves all fail
    #[must_use]
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    /// Flip failure injection at runtime, for outage-then-recovery tests
    pub fn set_failing(&self, failing: bool) {
        let mut inner = self.inner.write().unwrap();
        inner.fail_saves = failing;
        inner.fail_loads = failing;
    }

    /// Number of successful saves so far
    ///
    /// Useful for asserting which actions persist and which do not.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.inner.read().unwrap().saves
    }

    /// The most recently saved snapshot, if any save has succeeded
    #[must_use]
    pub fn last_snapshot(&self) -> Option<CartSnapshot> {
        self.inner.read().unwrap().snapshot.clone()
    }
}

impl SnapshotStore for RecordingSnapshotStore {
    fn load(&self) -> Result<Option<CartSnapshot>> {
        let inner = self.inner.read().unwrap();
        if inner.fail_loads {
            return Err(SnapshotError::Storage(
                "simulated storage failure".to_string(),
            ));
        }
        Ok(inner.snapshot.clone())
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.fail_saves {
            return Err(SnapshotError::Storage(
                "simulated storage failure".to_string(),
            ));
        }
        inner.snapshot = Some(snapshot.clone());
        inner.saves += 1;
        Ok(())
    }
}
