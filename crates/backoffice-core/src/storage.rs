//! Durable key/value storage abstraction.
//!
//! The client keeps a handful of string values across restarts (token, user
//! record, settings, locale). Reads are synchronous so that the navigation
//! guard never has to suspend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::Result;

/// Key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Key holding the JSON-serialized user profile.
pub const AUTH_USER_KEY: &str = "auth_user";
/// Key holding the JSON-serialized settings object.
pub const SETTINGS_KEY: &str = "app-settings";
/// Key holding the active locale code.
pub const LOCALE_KEY: &str = "app-locale";
/// Key holding the language picked from the backend language list.
pub const LANGUAGE_KEY: &str = "language";

/// A single write applied by [`KeyValueStorage::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Set(String, String),
    Remove(String),
}

impl StorageOp {
    pub fn set(key: &str, value: impl Into<String>) -> Self {
        Self::Set(key.to_string(), value.into())
    }

    pub fn remove(key: &str) -> Self {
        Self::Remove(key.to_string())
    }
}

/// String key/value storage with the semantics of browser local storage.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    /// Applies several writes as one unit.
    ///
    /// Implementations backed by a single file should override this so that
    /// either every operation lands or none does.
    fn apply(&self, ops: &[StorageOp]) -> Result<()> {
        for op in ops {
            match op {
                StorageOp::Set(key, value) => self.set_item(key, value)?,
                StorageOp::Remove(key) => self.remove_item(key)?,
            }
        }
        Ok(())
    }
}

/// Process-local storage, used in tests and when no config dir is available.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }

    fn apply(&self, ops: &[StorageOp]) -> Result<()> {
        let mut items = self.lock();
        for op in ops {
            match op {
                StorageOp::Set(key, value) => {
                    items.insert(key.clone(), value.clone());
                }
                StorageOp::Remove(key) => {
                    items.remove(key);
                }
            }
        }
        Ok(())
    }
}
