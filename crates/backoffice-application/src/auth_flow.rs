//! Login and logout as the login screen and the shell header drive them.

use backoffice_core::Result;
use backoffice_core::routing::{HOME_PATH, LOGIN_PATH, Navigation, Router};
use backoffice_core::session::LoginOutcome;

use crate::auth_service::AuthService;

/// Couples authentication with navigation.
#[derive(Clone)]
pub struct AuthFlow {
    auth: AuthService,
    router: Router,
}

impl AuthFlow {
    pub fn new(auth: AuthService, router: Router) -> Self {
        Self { auth, router }
    }

    /// Logs in and, on success, replaces the current route with home.
    ///
    /// Navigation waits for the session to settle, so the guard always sees
    /// the committed token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let outcome = self.auth.login(username, password).await;
        if !outcome.is_success() {
            return Ok(outcome);
        }

        let session = self.auth.session().settled().await;
        if session.is_authenticated() {
            let navigation = self.router.replace(HOME_PATH)?;
            tracing::info!("[AuthFlow] Navigated to {}", navigation.path);
        } else {
            tracing::error!("[AuthFlow] Login succeeded but token not found in session");
        }

        Ok(outcome)
    }

    /// Logs out and pushes the login route.
    pub fn logout(&self) -> Result<Navigation> {
        self.auth.logout();
        self.router.push(LOGIN_PATH)
    }
}
