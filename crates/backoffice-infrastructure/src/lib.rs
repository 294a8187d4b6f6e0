//! Infrastructure layer: platform paths, file-backed storage, configuration
//! loading and the HTTP client for the backend.

pub mod api;
pub mod config_service;
pub mod paths;
pub mod storage;

pub use crate::api::ApiClient;
pub use crate::config_service::ConfigService;
pub use crate::paths::BackofficePaths;
pub use crate::storage::FileStorage;
