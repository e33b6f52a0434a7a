//! Error types for snapshot persistence.

use thiserror::Error;

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors produced by a [`SnapshotStore`](crate::environment::SnapshotStore)
/// implementation.
///
/// Variants carry plain strings so adapters stay decoupled from their
/// underlying I/O and codec error types, and so tests can compare errors
/// directly.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Serialization(String),

    /// The backing storage rejected or failed the operation
    /// (quota exceeded, missing permissions, poisoned lock).
    #[error("snapshot storage failed: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_cause() {
        let err = SnapshotError::Storage("quota exceeded".to_string());
        assert_eq!(err.to_string(), "snapshot storage failed: quota exceeded");

        let err = SnapshotError::Serialization("bad json".to_string());
        assert_eq!(
            err.to_string(),
            "snapshot serialization failed: bad json"
        );
    }
}
