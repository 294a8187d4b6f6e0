//! Display settings: model, color helpers and theme side effects.

pub mod color;
pub mod model;
pub mod theme;

pub use model::Settings;
pub use theme::{DocumentTheme, ThemeTarget};
