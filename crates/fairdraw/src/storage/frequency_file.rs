//! Participant persistence — the whole collection in one JSON file.
//!
//! File format (a bare array, rewritten in full on every save):
//! ```json
//! [
//!     {
//!         "id": 1,
//!         "name": "Aline",
//!         "alias": "",
//!         "dates": ["2024-05-02"],
//!         "balanceamento": 0
//!     }
//! ]
//! ```

use std::path::{Path, PathBuf};

use crate::error::{DrawError, Result};
use crate::ledger::ParticipantRecord;

use super::to_pretty_json;

/// File name used when no path is configured.
pub const DEFAULT_FILE_NAME: &str = "frequencies.json";

// ── FrequencyStore ────────────────────────────────────────────────────────────

/// Filesystem-backed store for the participant collection.
///
/// Saves overwrite the whole file ("last write wins"). Concurrent writers
/// are not coordinated and there is no versioning.
#[derive(Debug, Clone)]
pub struct FrequencyStore {
    path: PathBuf,
}

impl FrequencyStore {
    /// Create a store backed by `path`. Nothing is touched on disk yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `frequencies.json` in the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the full collection.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, records: &[ParticipantRecord]) -> Result<()> {
        let json = to_pretty_json(&records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.path, json.as_bytes()).map_err(|e| {
            DrawError::StorageError(format!("failed to write {}: {e}", self.path.display()))
        })?;

        log::info!(
            "saved {} participant(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Load the collection, treating a missing or unreadable file as empty.
    ///
    /// Never fails; problems are logged.
    pub fn load(&self) -> Vec<ParticipantRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("{e}; starting with an empty collection");
                Vec::new()
            }
        }
    }

    /// Load the collection, reporting malformed content as an error.
    ///
    /// A missing file is still an empty collection.
    pub fn try_load(&self) -> Result<Vec<ParticipantRecord>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "file not found at {}; returning an empty collection",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DrawError::StorageError(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            DrawError::SerializationError(format!(
                "failed to parse {}: {e}",
                self.path.display()
            ))
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
