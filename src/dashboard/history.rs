//! Recent-search history.
//!
//! Most recent first, at most [`MAX_HISTORY_ENTRIES`] terms, no two entries
//! equal ignoring case. Persisted as a JSON array of strings under
//! [`HISTORY_KEY`].

use std::fs;
use std::path::{Path, PathBuf};

/// Storage key for the persisted list.
pub const HISTORY_KEY: &str = "weather_history";

pub const MAX_HISTORY_ENTRIES: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("History I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("History is not a JSON array of strings: {0}")]
    Format(#[from] serde_json::Error),
}

/// Backing storage for the history list.
pub trait HistoryStore {
    /// Stored list; an empty list when nothing has been stored yet.
    fn load(&self) -> Result<Vec<String>, HistoryError>;
    fn save(&self, entries: &[String]) -> Result<(), HistoryError>;
}

/// `<dir>/weather_history.json`
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{HISTORY_KEY}.json")),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| HistoryError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| HistoryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let raw = serde_json::to_string(entries)?;
        fs::write(&self.path, raw).map_err(|source| HistoryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-process store for tests that should not touch disk.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryHistoryStore {
    entries: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.entries.lock().map(|e| e.clone()).unwrap_or_default())
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        if let Ok(mut stored) = self.entries.lock() {
            *stored = entries.to_vec();
        }
        Ok(())
    }
}

/// Insert `term` at the front, dropping case-insensitive duplicates and
/// truncating to the cap.
pub fn push_term(entries: &[String], term: &str) -> Vec<String> {
    let lowered = term.to_lowercase();
    std::iter::once(term.to_string())
        .chain(
            entries
                .iter()
                .filter(|e| e.to_lowercase() != lowered)
                .cloned(),
        )
        .take(MAX_HISTORY_ENTRIES)
        .collect()
}

/// History list bound to its store.
#[derive(Debug)]
pub struct SearchHistory<S> {
    store: S,
    entries: Vec<String>,
}

impl<S: HistoryStore> SearchHistory<S> {
    /// Load the stored list. Unreadable storage starts an empty list.
    pub fn open(store: S) -> Self {
        let entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Ignoring unreadable search history: {}", e);
                Vec::new()
            }
        };
        Self { store, entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Record a successful search and persist the new list.
    pub fn push(&mut self, term: &str) -> Result<&[String], HistoryError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(self.entries.as_slice());
        }
        let updated = push_term(&self.entries, term);
        self.store.save(&updated)?;
        self.entries = updated;
        Ok(self.entries.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_dedup_keeps_latest_spelling() {
        let mut history = SearchHistory::open(MemoryHistoryStore::default());
        history.push("Chennai").unwrap();
        let entries = history.push("chennai").unwrap();
        assert_eq!(entries, ["chennai"]);
    }

    #[test]
    fn test_cap_keeps_six_most_recent() {
        let mut history = SearchHistory::open(MemoryHistoryStore::default());
        for city in ["Oslo", "Lima", "Pune", "Rome", "Kyiv", "Baku", "Doha"] {
            history.push(city).unwrap();
        }
        assert_eq!(
            history.entries(),
            ["Doha", "Baku", "Kyiv", "Rome", "Pune", "Lima"]
        );
    }

    #[test]
    fn test_repeat_moves_entry_to_front() {
        let entries = vec!["Mumbai".to_string(), "Delhi".to_string(), "Pune".to_string()];
        assert_eq!(push_term(&entries, "DELHI"), ["DELHI", "Mumbai", "Pune"]);
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let mut history = SearchHistory::open(MemoryHistoryStore::default());
        history.push("Chennai").unwrap();
        history.push("   ").unwrap();
        assert_eq!(history.entries(), ["Chennai"]);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut history = SearchHistory::open(FileHistoryStore::in_dir(dir.path()));
            history.push("Mumbai").unwrap();
            history.push("Chennai").unwrap();
        }

        let path = dir.path().join("weather_history.json");
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"["Chennai","Mumbai"]"#);

        let reopened = SearchHistory::open(FileHistoryStore::at(path));
        assert_eq!(reopened.entries(), ["Chennai", "Mumbai"]);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileHistoryStore::in_dir(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();

        let mut history = SearchHistory::open(store);
        assert!(history.entries().is_empty());
        history.push("Lima").unwrap();
        assert_eq!(history.entries(), ["Lima"]);
    }
}
