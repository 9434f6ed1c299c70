//! Durable key-value slot holding the serialized form snapshot

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Name of the single slot the snapshot lives in
pub const SNAPSHOT_SLOT: &str = "formData";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read snapshot at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write snapshot at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove snapshot at {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot slot rejected the write")]
    Rejected,
}

/// One named slot of durable storage.
///
/// Writes are synchronous and last-writer-wins.
pub trait SnapshotSlot: Send {
    /// Stored contents, or `None` when the slot is empty
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the slot
    fn write(&self, contents: &str) -> Result<(), StorageError>;

    /// Empty the slot; removing an empty slot succeeds
    fn remove(&self) -> Result<(), StorageError>;
}

/// Slot backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/formData.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{SNAPSHOT_SLOT}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, contents).map_err(write_err)
    }

    fn remove(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// In-memory slot. Clones share the same contents, so a clone kept by a
/// test observes what a session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Arc<Mutex<Option<String>>>,
    reject_writes: Arc<AtomicBool>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `contents`
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let slot = Self::new();
        *slot.lock() = Some(contents.into());
        slot
    }

    /// Make subsequent writes fail with `StorageError::Rejected`
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Current contents without going through the trait
    pub fn contents(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SnapshotSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected);
        }
        *self.lock() = Some(contents.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_slot_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(temp_dir.path());
        assert!(slot.read().unwrap().is_none());
        assert!(slot.path().ends_with("formData.json"));
    }

    #[test]
    fn test_file_slot_write_read_remove() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(&temp_dir.path().join("nested").join("state"));

        slot.write(r#"{"personal":{}}"#).unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some(r#"{"personal":{}}"#));

        slot.write("second").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("second"));

        slot.remove().unwrap();
        assert!(slot.read().unwrap().is_none());
        // Removing again is fine
        slot.remove().unwrap();
    }

    #[test]
    fn test_memory_slot_clones_share_contents() {
        let slot = MemorySlot::new();
        let observer = slot.clone();

        slot.write("data").unwrap();
        assert_eq!(observer.contents().as_deref(), Some("data"));

        observer.remove().unwrap();
        assert!(slot.read().unwrap().is_none());
    }

    #[test]
    fn test_memory_slot_rejects_writes_when_asked() {
        let slot = MemorySlot::with_contents("old");
        slot.reject_writes(true);

        assert!(matches!(slot.write("new"), Err(StorageError::Rejected)));
        assert_eq!(slot.contents().as_deref(), Some("old"));
    }
}
