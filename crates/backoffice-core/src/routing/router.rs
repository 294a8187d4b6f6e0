//! Client-side router with a single before-each authentication guard.

use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::error::{BackofficeError, Result};
use crate::routing::guard::{self, GuardDecision};
use crate::routing::route::{self, LOGIN_PATH};
use crate::session::SessionStore;

/// Upper bound on guard redirects for one navigation.
const MAX_REDIRECTS: usize = 4;

/// Outcome of a completed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Path the caller asked for
    pub requested: String,
    /// Path the router settled on
    pub path: String,
    /// Name of the settled route
    pub name: &'static str,
    /// Whether the catch-all or the guard changed the destination
    pub redirected: bool,
}

#[derive(Debug, Default)]
struct RouterState {
    current: Option<String>,
    history: Vec<String>,
}

/// Router over the fixed route table.
///
/// Authentication is read synchronously from the session store before every
/// navigation, so no protected route is ever entered unauthenticated.
#[derive(Clone)]
pub struct Router {
    session: SessionStore,
    state: Arc<RwLock<RouterState>>,
}

impl Router {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            state: Arc::new(RwLock::new(RouterState::default())),
        }
    }

    /// Navigates and appends to history.
    pub fn push(&self, path: &str) -> Result<Navigation> {
        let navigation = self.resolve_with_guard(path)?;
        let mut state = self.write();
        state.history.push(navigation.path.clone());
        state.current = Some(navigation.path.clone());
        Ok(navigation)
    }

    /// Navigates and overwrites the current history entry.
    pub fn replace(&self, path: &str) -> Result<Navigation> {
        let navigation = self.resolve_with_guard(path)?;
        let mut state = self.write();
        match state.history.last_mut() {
            Some(last) => *last = navigation.path.clone(),
            None => state.history.push(navigation.path.clone()),
        }
        state.current = Some(navigation.path.clone());
        Ok(navigation)
    }

    /// Moves to the login route unless already there.
    ///
    /// Returns `true` when a navigation happened.
    pub fn redirect_to_login(&self) -> bool {
        if self.current_path().as_deref().is_some_and(route::is_login) {
            return false;
        }
        match self.replace(LOGIN_PATH) {
            Ok(navigation) => {
                tracing::info!("[Router] Redirected to {}", navigation.path);
                true
            }
            Err(e) => {
                tracing::error!("[Router] Failed to redirect to login: {}", e);
                false
            }
        }
    }

    pub fn current_path(&self) -> Option<String> {
        self.read().current.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.read().history.clone()
    }

    /// Runs the catch-all and the guard until the destination is stable.
    fn resolve_with_guard(&self, requested: &str) -> Result<Navigation> {
        let mut record = route::resolve(requested);
        let mut redirected = record.path != requested;

        for _ in 0..=MAX_REDIRECTS {
            let authenticated = self.session.is_authenticated();
            tracing::debug!(
                "[Router] Guard: to={} authenticated={} token={}",
                record.path,
                authenticated,
                self.session.snapshot().token_preview()
            );

            match guard::evaluate(record.path, authenticated) {
                GuardDecision::Proceed => {
                    return Ok(Navigation {
                        requested: requested.to_string(),
                        path: record.path.to_string(),
                        name: record.name,
                        redirected,
                    });
                }
                GuardDecision::Redirect(target) => {
                    record = route::resolve(target);
                    redirected = true;
                }
            }
        }

        Err(BackofficeError::navigation(format!(
            "Too many redirects while navigating to '{}'",
            requested
        )))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RouterState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, RouterState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
