//! Locales and translation catalogs.

pub mod catalog;
pub mod format;
pub mod model;

pub use catalog::Translator;
pub use model::{AVAILABLE_LOCALES, DEFAULT_LOCALE, LocaleInfo};
