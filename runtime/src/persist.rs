//! File-backed snapshot adapter.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use trolley_core::{CartSnapshot, Result, SnapshotError, SnapshotStore};

/// Persists the snapshot as one JSON document at a fixed path.
///
/// Saves write a sibling temp file and move it into place with a rename, so
/// a crash mid-write never leaves a truncated document behind. A missing
/// file loads as `None` (first session).
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates an adapter for the given document path. The parent directory
    /// must exist; a save into a missing directory surfaces as a storage
    /// error and is absorbed by the store.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<CartSnapshot>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(SnapshotError::Storage(error.to_string())),
        };
        let snapshot = serde_json::from_str(&contents)
            .map_err(|error| SnapshotError::Serialization(error.to_string()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<()> {
        let contents = serde_json::to_string(snapshot)
            .map_err(|error| SnapshotError::Serialization(error.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).map_err(|error| SnapshotError::Storage(error.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|error| SnapshotError::Storage(error.to_string()))?;
        Ok(())
    }
}
