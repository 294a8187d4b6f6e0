//! Tab management for the workspace area.

mod manager;
mod model;

pub use manager::{DEFAULT_MAX_TABS, TabManager};
pub use model::{MenuItem, Tab};
