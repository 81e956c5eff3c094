//! Guestbook storage - a small JSON list kept on the local machine
//!
//! The whole list is rewritten on every save. There is a single writer (the
//! running page), so no merging is attempted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed storage key; the file is `<key>.json` in the data directory
pub const GUESTBOOK_KEY: &str = "wedding-guestbook";

#[derive(Debug, Error)]
pub enum GuestbookError {
    #[error("Could not determine data directory")]
    NoDataDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    pub name: String,
    pub message: String,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
}

impl GuestbookEntry {
    /// Build an entry from form input; blank names or messages are rejected
    pub fn new(name: &str, message: &str, now: DateTime<Utc>) -> Option<Self> {
        let name = name.trim();
        let message = message.trim();
        if name.is_empty() || message.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            message: message.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// Newest entries go first
pub fn prepend(entries: &mut Vec<GuestbookEntry>, entry: GuestbookEntry) {
    entries.insert(0, entry);
}

/// Result of reading stored entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<GuestbookEntry>),
    /// Nothing stored yet
    Missing,
    /// Stored data could not be read or parsed
    Malformed(String),
}

pub struct GuestbookStore {
    path: PathBuf,
}

impl GuestbookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the shared data directory using the fixed key
    pub fn in_data_dir() -> Result<Self, GuestbookError> {
        let dir = crate::config::data_dir().ok_or(GuestbookError::NoDataDir)?;
        Ok(Self::new(dir.join(format!("{}.json", GUESTBOOK_KEY))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> LoadOutcome {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(e) => return LoadOutcome::Malformed(e.to_string()),
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => LoadOutcome::Loaded(entries),
            Err(e) => LoadOutcome::Malformed(e.to_string()),
        }
    }

    /// Load, treating missing or malformed data as an empty guestbook
    pub fn load_or_empty(&self) -> Vec<GuestbookEntry> {
        match self.load() {
            LoadOutcome::Loaded(entries) => entries,
            LoadOutcome::Missing => Vec::new(),
            LoadOutcome::Malformed(reason) => {
                tracing::error!(path = %self.path.display(), %reason, "Failed to parse guestbook entries");
                Vec::new()
            }
        }
    }

    /// Replace the stored list. An empty list leaves storage untouched.
    pub fn save(&self, entries: &[GuestbookEntry]) -> Result<(), GuestbookError> {
        if entries.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
