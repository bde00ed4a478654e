//! Durable snapshot storage for the cart.
//!
//! The cart persists as one serialized snapshot under a single fixed key,
//! written whole after every mutation. Writes are last-write-wins: a second
//! writer sharing the same backing file races, and the loser's snapshot is
//! overwritten.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors from the storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
}

/// The single-key snapshot store backing a [`CartStore`](super::CartStore).
///
/// `read` returns `None` when no snapshot has ever been written (or it was
/// cleared), which callers treat as an empty cart.
pub trait CartStorage {
    /// Read the current snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store is unreadable.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn write(&mut self, snapshot: &str) -> Result<(), StorageError>;

    /// Remove the snapshot entirely.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the removal.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON file per browsing profile.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store snapshots at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, snapshot: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, snapshot)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory storage for tests and for sessions whose durable store is
/// unavailable.
///
/// Clones share the same cell, like two tabs sharing one storage key.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    snapshot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot string.
    #[must_use]
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(Some(snapshot.into()))),
        }
    }

    /// The current raw snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock().clone())
    }

    fn write(&mut self, snapshot: &str) -> Result<(), StorageError> {
        *self.lock() = Some(snapshot.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        *self.lock() = None;
        Ok(())
    }
}
