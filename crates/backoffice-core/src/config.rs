//! Client configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every field has a
//! default so an empty or partial file is valid.

use serde::{Deserialize, Serialize};

use crate::sidebar::DESKTOP_BREAKPOINT;
use crate::tabs::DEFAULT_MAX_TABS;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "BACKOFFICE_API_URL";
/// Environment variable overriding `api.timeout_ms`.
pub const ENV_API_TIMEOUT_MS: &str = "BACKOFFICE_API_TIMEOUT_MS";
/// Environment variable overriding `server.port`.
pub const ENV_PORT: &str = "BACKOFFICE_PORT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub max_tabs: usize,
    pub desktop_breakpoint: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_tabs: DEFAULT_MAX_TABS,
            desktop_breakpoint: DESKTOP_BREAKPOINT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl AppConfig {
    /// Applies environment overrides read through `lookup`.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            self.api.base_url = url;
        }

        if let Some(raw) = lookup(ENV_API_TIMEOUT_MS) {
            match raw.parse() {
                Ok(timeout) => self.api.timeout_ms = timeout,
                Err(e) => tracing::warn!("[Config] Ignoring {}={:?}: {}", ENV_API_TIMEOUT_MS, raw, e),
            }
        }

        if let Some(raw) = lookup(ENV_PORT) {
            match raw.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("[Config] Ignoring {}={:?}: {}", ENV_PORT, raw, e),
            }
        }
    }
}
