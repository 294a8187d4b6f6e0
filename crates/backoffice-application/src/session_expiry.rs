//! Reaction to a 401 from any endpoint.

use backoffice_core::routing::Router;
use backoffice_core::session::{SessionStore, UnauthorizedHandler};

/// Ends the session and sends the user to the login route.
///
/// Installed on the API client, which has already dropped its default
/// authorization header when this runs.
pub struct SessionExpiryHandler {
    session: SessionStore,
    router: Router,
}

impl SessionExpiryHandler {
    pub fn new(session: SessionStore, router: Router) -> Self {
        Self { session, router }
    }
}

impl UnauthorizedHandler for SessionExpiryHandler {
    fn on_unauthorized(&self) {
        tracing::warn!(
            "[SessionExpiry] Session rejected by backend, token={}",
            self.session.snapshot().token_preview()
        );
        self.session.clear();
        self.router.redirect_to_login();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::routing::LOGIN_PATH;
    use backoffice_core::session::UserProfile;
    use backoffice_core::storage::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_clears_session_and_redirects() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        session.establish("tok".into(), UserProfile::default());
        let router = Router::new(session.clone());
        router.push("/").unwrap();

        let handler = SessionExpiryHandler::new(session.clone(), router.clone());
        handler.on_unauthorized();

        assert!(!session.is_authenticated());
        assert!(storage.is_empty());
        assert_eq!(router.current_path().as_deref(), Some(LOGIN_PATH));
    }

    #[test]
    fn test_no_redirect_when_already_on_login() {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        let router = Router::new(session.clone());
        router.push(LOGIN_PATH).unwrap();
        let before = router.history();

        SessionExpiryHandler::new(session, router.clone()).on_unauthorized();
        assert_eq!(router.history(), before);
    }
}
