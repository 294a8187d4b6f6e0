//! Routing: route table, authentication guard and router.

pub mod guard;
pub mod route;
pub mod router;

pub use guard::GuardDecision;
pub use route::{HOME_PATH, LOGIN_PATH, RouteRecord};
pub use router::{Navigation, Router};
