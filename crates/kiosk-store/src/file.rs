//! File-backed store backend.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use crate::{KvStore, StoreError};

/// A store persisted as a single JSON object file (`{key: value}`).
///
/// The whole image is loaded at open and rewritten on every `set`, which is
/// plenty for a store holding two small records. Writes go through a sibling
/// temp file and a rename so an interrupted write never leaves a half-written
/// store behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    cells: Arc<Mutex<HashMap<String, String>>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store. A file that exists but does not
    /// parse as a JSON string map is treated as corrupt persisted state and
    /// recovered to an empty store with a warning; the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Open(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let cells = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt store file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Open(format!("{}: {}", path.display(), e))),
        };

        Ok(Self {
            path,
            cells: Arc::new(Mutex::new(cells)),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, cells: &HashMap<String, String>) -> Result<(), StoreError> {
        let image = serde_json::to_string_pretty(cells)?;
        let tmp = self.path.with_extension("tmp");

        fs::write(&tmp, image)
            .map_err(|e| StoreError::Write(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Write(format!("{}: {}", self.path.display(), e)))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut cells = self.lock();
        cells.insert(key.to_string(), value.to_string());
        self.persist(&cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert_eq!(store.get("cart_ids").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        store.set("prefs_v1", r#"{"name":"Iris"}"#).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("prefs_v1").unwrap().as_deref(),
            Some(r#"{"name":"Iris"}"#)
        );
    }

    #[test]
    fn test_corrupt_file_recovers_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all {{{").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("cart_ids").unwrap(), None);

        // The next write replaces the corrupt image with a valid one.
        store.set("cart_ids", "[]").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("cart_ids").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("store.json");
        let store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        assert!(!path.with_extension("tmp").exists());
    }
}
