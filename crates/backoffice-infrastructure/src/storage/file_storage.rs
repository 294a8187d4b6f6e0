//! File-backed implementation of [`KeyValueStorage`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use backoffice_core::Result;
use backoffice_core::storage::{KeyValueStorage, StorageOp};

use super::atomic_json::AtomicJsonFile;

type Items = BTreeMap<String, String>;

/// Key/value storage persisted as a single JSON object on disk.
///
/// The whole map is cached in memory; every write rewrites the file
/// atomically, so a crash never leaves a half-written store behind.
pub struct FileStorage {
    file: AtomicJsonFile<Items>,
    items: Mutex<Items>,
}

impl FileStorage {
    /// Opens the store at `path`.
    ///
    /// A missing file starts empty. A file that cannot be parsed is logged
    /// and treated as empty; it is overwritten on the next write.
    pub fn open(path: PathBuf) -> Self {
        let file = AtomicJsonFile::new(path);
        let items = match file.load() {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "[FileStorage] Discarding unreadable store {}: {}",
                    file.path().display(),
                    e
                );
                Items::new()
            }
        };

        tracing::debug!(
            "[FileStorage] Opened {} with {} keys",
            file.path().display(),
            items.len()
        );

        Self {
            file,
            items: Mutex::new(items),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Items> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Writes `next` to disk, then swaps it into the cache.
    fn commit(&self, items: &mut Items, next: Items) -> Result<()> {
        self.file.save(&next)?;
        *items = next;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.apply(&[StorageOp::set(key, value)])
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.apply(&[StorageOp::remove(key)])
    }

    fn apply(&self, ops: &[StorageOp]) -> Result<()> {
        let mut items = self.lock();
        let mut next = items.clone();
        for op in ops {
            match op {
                StorageOp::Set(key, value) => {
                    next.insert(key.clone(), value.clone());
                }
                StorageOp::Remove(key) => {
                    next.remove(key);
                }
            }
        }

        if next == *items {
            return Ok(());
        }

        self.commit(&mut items, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::storage::{AUTH_TOKEN_KEY, AUTH_USER_KEY, LOCALE_KEY};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let storage = FileStorage::open(path.clone());
        storage.set_item(AUTH_TOKEN_KEY, "abc").unwrap();
        storage.set_item(LOCALE_KEY, "vi").unwrap();
        drop(storage);

        let reopened = FileStorage::open(path);
        assert_eq!(reopened.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get_item(LOCALE_KEY).unwrap().as_deref(), Some("vi"));
    }

    #[test]
    fn test_apply_is_one_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let storage = FileStorage::open(path.clone());

        storage
            .apply(&[
                StorageOp::set(AUTH_TOKEN_KEY, "t1"),
                StorageOp::set(AUTH_USER_KEY, "{\"username\":\"admin\"}"),
            ])
            .unwrap();

        let on_disk: Items = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 2);
        assert_eq!(on_disk[AUTH_TOKEN_KEY], "t1");
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("storage.json"));
        storage.set_item(AUTH_TOKEN_KEY, "abc").unwrap();
        storage.remove_item(AUTH_TOKEN_KEY).unwrap();
        assert!(storage.get_item(AUTH_TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_noop_write_does_not_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let storage = FileStorage::open(path.clone());
        storage.remove_item(AUTH_TOKEN_KEY).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let storage = FileStorage::open(path.clone());
        assert!(storage.get_item(AUTH_TOKEN_KEY).unwrap().is_none());

        storage.set_item(AUTH_TOKEN_KEY, "fresh").unwrap();
        let reopened = FileStorage::open(path);
        assert_eq!(reopened.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
    }
}
