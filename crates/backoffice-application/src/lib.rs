//! Application layer: use cases built on the core stores and the
//! infrastructure adapters.

pub mod app_service;
pub mod auth_flow;
pub mod auth_service;
pub mod context;
pub mod dso_service;
pub mod locale_service;
pub mod message_service;
pub mod session_expiry;
pub mod settings_service;

pub use app_service::{AppService, AppState};
pub use auth_flow::AuthFlow;
pub use auth_service::AuthService;
pub use context::AppContext;
pub use dso_service::DsoService;
pub use locale_service::LocaleService;
pub use message_service::MessageService;
pub use session_expiry::SessionExpiryHandler;
pub use settings_service::SettingsService;
