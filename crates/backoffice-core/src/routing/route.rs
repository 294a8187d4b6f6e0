//! Route table.

use serde::Serialize;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// A named entry in the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: LOGIN_PATH,
        name: "Login",
        requires_auth: false,
    },
    RouteRecord {
        path: HOME_PATH,
        name: "Home",
        requires_auth: true,
    },
];

/// All declared routes.
pub fn routes() -> &'static [RouteRecord] {
    ROUTES
}

/// Resolves a path against the table.
///
/// Unknown paths fall through to the catch-all, which redirects home.
/// Query strings and fragments are ignored, as is a trailing slash.
pub fn resolve(path: &str) -> &'static RouteRecord {
    let normalized = normalize(path);
    ROUTES
        .iter()
        .find(|route| route.path == normalized)
        .unwrap_or(&ROUTES[1])
}

pub fn is_login(path: &str) -> bool {
    normalize(path) == LOGIN_PATH
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { HOME_PATH } else { trimmed }
}
