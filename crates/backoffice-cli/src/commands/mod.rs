pub mod auth;
pub mod call;
pub mod languages;
pub mod locale;
pub mod navigate;
pub mod settings;
