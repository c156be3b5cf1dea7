//! File-backed store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::{CacheError, KeyValueStore};

/// A store persisted as a single JSON object file, `{"key": "value", ...}`.
///
/// The file is re-read on every access, so clearing it from outside the
/// process is observed. Writes go to a sibling temp file that is renamed
/// over the original. A file that is not a JSON object of strings fails
/// every access with [`CacheError::StoreError`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                CacheError::StoreError(format!("corrupt store file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = temp_path(&self.path);
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        tracing::trace!(path = %self.path.display(), keys = entries.len(), "store file written");
        Ok(())
    }
}

/// Sibling path for the pending write: the file name with `.tmp` appended,
/// so it never equals `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_differs_from_target() {
        assert_eq!(temp_path(Path::new("/data/cart.json")), Path::new("/data/cart.json.tmp"));
        assert_eq!(temp_path(Path::new("/data/cart.tmp")), Path::new("/data/cart.tmp.tmp"));
        assert_eq!(temp_path(Path::new("cart")), Path::new("cart.tmp"));
    }

    #[test]
    fn test_store_named_tmp_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.tmp");

        let store = FileStore::open(&path).unwrap();
        store.set("@RocketShoes:cart", "[]").unwrap();

        assert!(!dir.path().join("cart.tmp.tmp").exists());
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("@RocketShoes:cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("cart.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cart.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set("@RocketShoes:cart", "[]").unwrap();
            store.set("other", "x").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("@RocketShoes:cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_delete_removes_only_that_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("cart.json")).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        store.delete("a").unwrap();
        store.delete("missing").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_corrupt_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(matches!(
            store.get("k"),
            Err(CacheError::StoreError(_))
        ));
    }
}
