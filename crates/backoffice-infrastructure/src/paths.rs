//! Unified path management for backoffice configuration files.
//!
//! This ensures consistency across all platforms (Linux, macOS, Windows).

use std::path::{Path, PathBuf};

const APP_DIR: &str = "backoffice";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for backoffice.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/backoffice/        # Config directory (or the override)
/// ├── config.toml              # Client configuration
/// ├── storage.json             # Durable key/value state (token, settings, locale)
/// └── logs/                    # Application logs
///     └── backoffice.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, Default)]
pub struct BackofficePaths {
    base: Option<PathBuf>,
}

impl BackofficePaths {
    /// Creates path management rooted at `base`, or at the platform config
    /// dir when `None`.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the backoffice configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/backoffice/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the durable key/value store.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("storage.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
