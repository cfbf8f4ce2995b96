//! State store for pm
//!
//! Owns the single JSON document holding the whole project state. Each
//! command loads a fresh copy, mutates it in memory, and hands it back for
//! saving; nothing survives between invocations except the file itself.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::model::Document;

/// Store bound to one state file
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    lock_timeout_ms: u64,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    /// Path to the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to the sidecar lock file
    pub fn lock_path(&self) -> PathBuf {
        lock::lock_path_for(&self.path)
    }

    /// Write the default document if the state file does not exist yet.
    ///
    /// Returns `true` when the file was created. An existing file is never
    /// touched.
    pub fn ensure_initialized(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        let _lock = FileLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        // Another invocation may have won the race while we waited.
        if self.path.exists() {
            return Ok(false);
        }

        self.save(&Document::default())?;
        tracing::info!(path = %self.path.display(), "initialized state file");
        Ok(true)
    }

    /// Read and parse the state file
    pub fn load(&self) -> Result<Document> {
        let content = fs::read_to_string(&self.path).map_err(|source| Error::StateRead {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::StateParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the state file with `doc`, pretty-printed
    pub fn save(&self, doc: &Document) -> Result<()> {
        let mut content = serde_json::to_string_pretty(doc)?;
        content.push('\n');
        lock::write_atomic(&self.path, content.as_bytes())
    }

    /// Run one locked read-modify-write cycle.
    ///
    /// The document is saved only when `apply` succeeds, so a rejected
    /// operation leaves the file exactly as it was.
    pub fn update<T>(&self, apply: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let _lock = FileLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        let mut doc = self.load()?;
        let outcome = apply(&mut doc)?;
        self.save(&doc)?;
        Ok(outcome)
    }
}
