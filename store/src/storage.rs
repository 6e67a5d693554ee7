//! Durable key-value storage.
//!
//! String keys to string values, the same shape as a browser's local storage.
//! The auth store writes here; the API client reads the bearer token from here
//! on every request.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::*;

use crate::error::{poisoned, Error};

/// File name of the storage document inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

/// Key-value storage shared between the stores and the API client.
///
/// Implementations must be safe to read from any task; writes are rare
/// (login and logout) and need no coordination beyond a lock.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

/// Storage persisted as a single JSON object on disk.
///
/// The file is read once when opened and rewritten on every change. A change
/// reaches the in-memory copy only once it is on disk.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens `storage.json` inside `dir`, creating the directory if needed.
    /// A missing file starts empty.
    pub fn open(dir: &Path) -> Result<Self, Error> {
        fs::create_dir_all(dir)?;
        let path = dir.join(STORAGE_FILE);

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened storage at {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Writes to a sibling temp file first so a crash never leaves a torn document.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }
}

/// Storage that lives only as long as the process. Used in tests and when no
/// data directory is writable.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = TempDir::new().unwrap();

        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("token", "abc").unwrap();
        drop(storage);

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("token").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_file_storage_remove_is_persisted() {
        let dir = TempDir::new().unwrap();

        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("token", "abc").unwrap();
        storage.remove("token").unwrap();
        storage.remove("never-set").unwrap();
        drop(storage);

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let storage = FileStorage::open(&nested).unwrap();
        storage.set("k", "v").unwrap();

        assert!(nested.join(STORAGE_FILE).exists());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), "{not json").unwrap();

        let result = FileStorage::open(dir.path());
        assert_eq!(
            result.err().map(|e| e.error_kind),
            Some(StoreErrorKind::Serialization)
        );
    }

    #[test]
    fn test_failed_write_leaves_previous_value() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("token", "abc").unwrap();

        // A directory where the temp file goes makes every flush fail.
        fs::create_dir(dir.path().join("storage.json.tmp")).unwrap();

        assert!(storage.set("token", "xyz").is_err());
        assert_eq!(storage.get("token").unwrap(), Some("abc".to_string()));
        assert!(storage.remove("token").is_err());
        assert_eq!(storage.get("token").unwrap(), Some("abc".to_string()));

        fs::remove_dir(dir.path().join("storage.json.tmp")).unwrap();
        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("token").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("missing").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("v".to_string()));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
