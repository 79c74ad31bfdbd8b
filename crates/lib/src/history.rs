//! # Generation History
//!
//! A bounded, most-recent-first list of past results. The pipeline never touches
//! it; callers record successful runs through a [`HistoryStore`].

use crate::{
    constants::DEFAULT_HISTORY_CAPACITY,
    errors::HistoryError,
    types::{RepurposedContent, ToneOption},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    fmt::Debug,
    fs,
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, warn};

/// One recorded generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub url: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub tone: ToneOption,
    pub preview_title: String,
    pub result: RepurposedContent,
}

impl HistoryEntry {
    /// Builds an entry, titling it after the post or the URL when the title is blank.
    pub fn from_result(
        url: impl Into<String>,
        tone: ToneOption,
        result: RepurposedContent,
        timestamp: i64,
    ) -> Self {
        let url = url.into();
        let preview_title = if result.blog_meta.title.trim().is_empty() {
            url.clone()
        } else {
            result.blog_meta.title.clone()
        };
        Self {
            url,
            timestamp,
            tone,
            preview_title,
            result,
        }
    }
}

/// Persistence for generation history.
pub trait HistoryStore: Send + Sync + Debug {
    /// All entries, most recent first.
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    /// Prepends `entry`, dropping the oldest entries beyond capacity.
    fn save(&self, entry: HistoryEntry) -> Result<(), HistoryError>;
    fn clear(&self) -> Result<(), HistoryError>;
}

#[derive(Debug)]
pub struct MemoryHistoryStore {
    entries: Mutex<VecDeque<HistoryEntry>>,
    capacity: usize,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.entries.lock().map_err(|_| HistoryError::Poisoned)?;
        Ok(entries.iter().cloned().collect())
    }

    fn save(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.entries.lock().map_err(|_| HistoryError::Poisoned)?;
        entries.push_front(entry);
        entries.truncate(self.capacity);
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.entries
            .lock()
            .map_err(|_| HistoryError::Poisoned)?
            .clear();
        Ok(())
    }
}

/// History kept as a JSON array on disk. Concurrent writers: last one wins.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
    capacity: usize,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "History file unreadable, starting empty");
                return Ok(Vec::new());
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "History file is corrupt, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        entries.insert(0, entry);
        entries.truncate(self.capacity);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!(path = %self.path.display(), count = entries.len(), "History saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
