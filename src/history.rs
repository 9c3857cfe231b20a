//! Locally persisted log of past predictions.
//!
//! The store is a plain load/save pair over one JSON file. It never fails the
//! caller: unreadable history loads as empty and failed writes are logged and
//! dropped. Capacity is the controller's concern.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app_dirs;

/// Namespace key the history is stored under.
pub const HISTORY_KEY: &str = "incomeLens.history.v1";

/// One past prediction outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the prediction completed, in epoch milliseconds.
    #[serde(alias = "t")]
    pub timestamp: i64,
    /// Predicted label.
    pub label: String,
    /// Positive-class probability, zero when the model gave none.
    pub probability: f64,
    /// Model that produced the prediction.
    pub model: String,
}

/// File-backed history persistence.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Store the history at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the history in the application directory.
    pub fn in_app_dir() -> Result<Self, app_dirs::AppDirError> {
        Ok(Self::new(app_dirs::AppPaths::resolve()?.history_file()))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted history, newest first. Missing or corrupt data loads as empty.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!("Failed to read history {}: {err}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Ignoring corrupt history {}: {err}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Replace the persisted history. Failures are logged and otherwise ignored.
    pub fn save(&self, entries: &[HistoryEntry]) {
        if let Err(err) = self.write(entries) {
            tracing::warn!("Failed to save history {}: {err}", self.path.display());
        }
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<(), String> {
        let data = serde_json::to_vec(entries).map_err(|err| err.to_string())?;
        let dir = self
            .path
            .parent()
            .ok_or_else(|| "history path has no parent directory".to_string())?;
        std::fs::create_dir_all(dir).map_err(|err| err.to_string())?;
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|err| err.to_string())?;
        temp.write_all(&data).map_err(|err| err.to_string())?;
        temp.as_file().sync_all().map_err(|err| err.to_string())?;
        temp.persist(&self.path)
            .map_err(|err| format!("Failed to persist history: {err}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(timestamp: i64, label: &str) -> HistoryEntry {
        HistoryEntry {
            timestamp,
            label: label.to_string(),
            probability: 0.23,
            model: "logreg".to_string(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        let entries = vec![entry(2, ">50K"), entry(1, "<=50K")];
        store.save(&entries);
        assert_eq!(store.load(), entries);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(HistoryStore::new(&path).load().is_empty());
        std::fs::write(&path, br#"[{"label":"x"}]"#).unwrap();
        assert!(HistoryStore::new(&path).load().is_empty());
    }

    #[test]
    fn saving_empty_clears_previous_entries() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        store.save(&[entry(1, ">50K")]);
        store.save(&[]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();
        let store = HistoryStore::new(blocker.join("history.json"));
        store.save(&[entry(1, ">50K")]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn reads_short_timestamp_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            br#"[{"t":1700000000000,"label":"<=50K","probability":0.1,"model":"m"}]"#,
        )
        .unwrap();
        let loaded = HistoryStore::new(&path).load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].timestamp, 1_700_000_000_000);
    }
}
