//! Persistent key-value state used for the daily dedup marker.
//!
//! The store holds a tiny JSON document on disk. The only key the
//! application uses today is [`LAST_MESSAGE_SENT_KEY`], written after a
//! notification goes out so a later run the same day stays quiet.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StateError;

/// Key under which the date of the last sent notification is stored.
pub const LAST_MESSAGE_SENT_KEY: &str = "last_message_sent";

/// Key-value accessor backing the dedup marker.
pub trait StateStore {
    /// Read a value, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StateError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError>;
}

/// File-backed store: one JSON object, read on open, rewritten on set.
#[derive(Debug)]
pub struct JsonStateStore {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl JsonStateStore {
    /// Open the store at `path`, loading existing contents if present.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StateError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StateError::Read(e)),
        };

        Ok(Self { path, data })
    }

    fn persist(&self) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StateError::Write)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, contents).map_err(StateError::Write)
    }
}

impl StateStore for JsonStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        self.data.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    data: BTreeMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
