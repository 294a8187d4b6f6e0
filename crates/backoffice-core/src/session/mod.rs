//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: session, user profile and login payloads
//! - `store`: the authoritative session store mirrored to durable storage

pub mod model;
pub mod store;

pub use model::{LoginOutcome, LoginRequest, Session, UserProfile};
pub use store::SessionStore;

/// Reacts to a 401 response from any endpoint.
///
/// Installed on the API client; implementations end the session and move
/// the user to the login route.
pub trait UnauthorizedHandler: Send + Sync {
    fn on_unauthorized(&self);
}
