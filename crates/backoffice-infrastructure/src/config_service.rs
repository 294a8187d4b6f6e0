//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` in the config directory and then
//! applies environment overrides.

use crate::paths::BackofficePaths;
use backoffice_core::config::AppConfig;
use backoffice_core::{BackofficeError, Result};
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: BackofficePaths,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(paths: BackofficePaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it if not cached.
    ///
    /// A missing or unreadable file yields the defaults; environment
    /// overrides apply either way.
    pub fn get_config(&self) -> AppConfig {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return cached.clone();
        }

        let mut loaded = match self.load_file() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[ConfigService] Using default config: {}", e);
                AppConfig::default()
            }
        };
        loaded.apply_env(|key| std::env::var(key).ok());

        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded.clone());

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    fn load_file(&self) -> Result<AppConfig> {
        let path = self
            .paths
            .config_file()
            .map_err(|e| BackofficeError::config(e.to_string()))?;
        load_from(&path)
    }
}

/// Reads `path` as TOML; a missing file is the default config.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!("[ConfigService] No config at {}", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
