//! Domain layer of the backoffice client.
//!
//! Holds the state the UI shell is built on: the session and its durable
//! mirror, the router with its authentication guard, open tabs, display
//! settings, locales, the sidebar and toast notifications. Backend access is
//! expressed as gateway traits implemented by the infrastructure crate.

pub mod config;
pub mod error;
pub mod gateway;
pub mod locale;
pub mod notification;
pub mod routing;
pub mod session;
pub mod settings;
pub mod sidebar;
pub mod storage;
pub mod tabs;

// Re-export common error type
pub use error::{BackofficeError, Result};
