//! Authentication use cases.
//!
//! `AuthService` talks to the backend through [`AuthGateway`] and commits
//! results to the [`SessionStore`]. Login never returns an error: failures
//! are recorded on the session and reported as [`LoginOutcome::Failure`].

use std::sync::Arc;

use backoffice_core::Result;
use backoffice_core::error::message_from_body;
use backoffice_core::gateway::AuthGateway;
use backoffice_core::session::{LoginOutcome, LoginRequest, SessionStore, UserProfile};
use serde_json::Value;

/// Shown when the server rejects the credentials without a message.
pub const LOGIN_REJECTED_MESSAGE: &str = "Login failed. Please check your credentials.";
/// Shown when the request itself fails without any message.
pub const LOGIN_ERROR_MESSAGE: &str = "Login failed. Please try again.";

#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    session: SessionStore,
}

/// What a successful login commits.
struct Credentials {
    token: String,
    user: UserProfile,
    message: Option<String>,
}

impl AuthService {
    /// Creates the service and aligns the default authorization header with
    /// the (already rehydrated) session.
    pub fn new(gateway: Arc<dyn AuthGateway>, session: SessionStore) -> Self {
        let service = Self { gateway, session };
        service.sync_authorization();
        service
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Reloads the session from durable storage. Idempotent.
    pub fn init_auth(&self) {
        self.session.init_auth();
        self.sync_authorization();
    }

    /// Whether a token is present. No backend round trip is made.
    pub fn check_auth(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Logs in with one request to the login endpoint.
    ///
    /// Success is decided by the response body (`success == true` or
    /// `user.STATUS == "OK"`), not by the HTTP status. The token is read from
    /// `data.token` and the profile is fetched with it before anything is
    /// committed, so every failure leaves the previous session untouched.
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        self.session.begin_login();
        tracing::info!("[AuthService] Login attempt for '{}'", username);

        match self.authenticate(username, password).await {
            Ok(credentials) => {
                self.session
                    .establish(credentials.token.clone(), credentials.user);
                self.gateway.set_authorization(Some(&credentials.token));
                tracing::info!(
                    "[AuthService] Login succeeded, token={}",
                    self.session.snapshot().token_preview()
                );
                LoginOutcome::Success {
                    message: credentials.message,
                }
            }
            Err(error) => {
                tracing::warn!("[AuthService] Login failed: {}", error);
                self.session.fail_login(error.clone());
                LoginOutcome::Failure { error }
            }
        }
    }

    /// Clears the session and the default authorization header.
    pub fn logout(&self) {
        self.session.clear();
        self.gateway.set_authorization(None);
        tracing::info!("[AuthService] Logged out");
    }

    /// Refreshes the stored profile from the current-user endpoint.
    pub async fn get_user_info(&self) -> Result<UserProfile> {
        let response = self.gateway.fetch_current_user(None).await?;
        let user = UserProfile::from_backend(&response.data);
        self.session.set_user(user.clone());
        Ok(user)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<Credentials, String> {
        let request = LoginRequest {
            user_id: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .gateway
            .login(&request)
            .await
            .map_err(|e| e.describe(LOGIN_ERROR_MESSAGE))?;

        if !is_login_success(&response.data) {
            return Err(message_from_body(&response.data)
                .unwrap_or_else(|| LOGIN_REJECTED_MESSAGE.to_string()));
        }

        let token = extract_token(&response.data).ok_or_else(|| {
            tracing::error!("[AuthService] Login succeeded but no token in response");
            LOGIN_REJECTED_MESSAGE.to_string()
        })?;

        let profile = self
            .gateway
            .fetch_current_user(Some(&token))
            .await
            .map_err(|e| e.describe(LOGIN_ERROR_MESSAGE))?;

        Ok(Credentials {
            token,
            user: UserProfile::from_backend(&profile.data),
            message: response
                .data
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    fn sync_authorization(&self) {
        self.gateway
            .set_authorization(self.session.token().as_deref());
    }
}

/// `success == true` or `user.STATUS == "OK"`.
fn is_login_success(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(true)
        || body.pointer("/user/STATUS").and_then(Value::as_str) == Some("OK")
}

fn extract_token(body: &Value) -> Option<String> {
    body.pointer("/data/token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use backoffice_core::BackofficeError;
    use backoffice_core::gateway::ApiResponse;
    use backoffice_core::storage::{AUTH_TOKEN_KEY, KeyValueStorage, MemoryStorage};
    use serde_json::json;
    use std::sync::Mutex;

    /// Gateway answering from canned results.
    struct FakeGateway {
        login: Mutex<Option<Result<ApiResponse>>>,
        user: Mutex<Option<Result<ApiResponse>>>,
        authorization: Mutex<Option<String>>,
        user_tokens: Mutex<Vec<Option<String>>>,
    }

    impl FakeGateway {
        fn new(login: Result<ApiResponse>, user: Result<ApiResponse>) -> Arc<Self> {
            Arc::new(Self {
                login: Mutex::new(Some(login)),
                user: Mutex::new(Some(user)),
                authorization: Mutex::new(None),
                user_tokens: Mutex::new(Vec::new()),
            })
        }

        fn authorization(&self) -> Option<String> {
            self.authorization.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuthGateway for FakeGateway {
        async fn login(&self, _request: &LoginRequest) -> Result<ApiResponse> {
            self.login.lock().unwrap().take().expect("login called once")
        }

        async fn fetch_current_user(&self, token: Option<&str>) -> Result<ApiResponse> {
            self.user_tokens.lock().unwrap().push(token.map(str::to_string));
            self.user
                .lock()
                .unwrap()
                .take()
                .expect("fetch_current_user called once")
        }

        fn set_authorization(&self, token: Option<&str>) {
            *self.authorization.lock().unwrap() = token.map(str::to_string);
        }
    }

    fn ok(data: Value) -> Result<ApiResponse> {
        Ok(ApiResponse::new(200, data))
    }

    fn user_record() -> Result<ApiResponse> {
        ok(json!({ "PK": 1, "USER_NAME": "Admin", "SYSADMIN_YN": "Y" }))
    }

    fn service(gateway: Arc<FakeGateway>) -> (AuthService, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        (AuthService::new(gateway, session), storage)
    }

    #[tokio::test]
    async fn test_login_success_flag() {
        let gateway = FakeGateway::new(
            ok(json!({ "success": true, "message": "Welcome", "data": { "token": "tok-1" } })),
            user_record(),
        );
        let (auth, storage) = service(gateway.clone());

        let outcome = auth.login("admin", "pw").await;
        assert_eq!(
            outcome,
            LoginOutcome::Success {
                message: Some("Welcome".into())
            }
        );

        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        assert!(auth.check_auth());
        assert_eq!(auth.session().user().unwrap().display_name(), "Admin");
        assert_eq!(gateway.authorization().as_deref(), Some("tok-1"));
        assert_eq!(
            gateway.user_tokens.lock().unwrap().as_slice(),
            &[Some("tok-1".to_string())]
        );
        assert!(!auth.session().is_loading());
    }

    #[tokio::test]
    async fn test_login_status_ok_flag() {
        let gateway = FakeGateway::new(
            ok(json!({ "user": { "STATUS": "OK" }, "data": { "token": "tok-2" } })),
            user_record(),
        );
        let (auth, _) = service(gateway);
        assert!(auth.login("admin", "pw").await.is_success());
        assert_eq!(auth.session().token().as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_prior_session() {
        let gateway = FakeGateway::new(
            ok(json!({ "success": false, "MESSAGE": "Wrong password" })),
            user_record(),
        );
        let (auth, storage) = service(gateway);
        auth.session().establish("old".into(), UserProfile::default());

        let outcome = auth.login("admin", "bad").await;
        assert_eq!(outcome.error(), Some("Wrong password"));
        assert_eq!(auth.session().error().as_deref(), Some("Wrong password"));
        assert_eq!(auth.session().token().as_deref(), Some("old"));
        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_rejected_login_without_message() {
        let gateway = FakeGateway::new(ok(json!({ "success": false })), user_record());
        let (auth, _) = service(gateway);
        let outcome = auth.login("admin", "bad").await;
        assert_eq!(outcome.error(), Some(LOGIN_REJECTED_MESSAGE));
    }

    #[tokio::test]
    async fn test_success_without_token_is_failure() {
        let gateway = FakeGateway::new(ok(json!({ "success": true, "data": {} })), user_record());
        let (auth, _) = service(gateway);
        let outcome = auth.login("admin", "pw").await;
        assert_eq!(outcome.error(), Some(LOGIN_REJECTED_MESSAGE));
        assert!(!auth.check_auth());
    }

    #[tokio::test]
    async fn test_transport_error_message() {
        let gateway = FakeGateway::new(
            Err(BackofficeError::Transport("connection refused".into())),
            user_record(),
        );
        let (auth, _) = service(gateway);
        let outcome = auth.login("admin", "pw").await;
        assert_eq!(outcome.error(), Some("Network Error: connection refused"));
    }

    #[tokio::test]
    async fn test_profile_failure_commits_nothing() {
        let gateway = FakeGateway::new(
            ok(json!({ "success": true, "data": { "token": "tok-3" } })),
            Err(BackofficeError::http(500, Some(json!({ "message": "db down" })))),
        );
        let (auth, storage) = service(gateway.clone());

        let outcome = auth.login("admin", "pw").await;
        assert_eq!(outcome.error(), Some("db down"));
        assert!(storage.get_item(AUTH_TOKEN_KEY).unwrap().is_none());
        assert!(!auth.check_auth());
        assert!(gateway.authorization().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let gateway = FakeGateway::new(
            ok(json!({ "success": true, "data": { "token": "tok-4" } })),
            user_record(),
        );
        let (auth, storage) = service(gateway.clone());
        auth.login("admin", "pw").await;

        auth.logout();
        assert!(!auth.check_auth());
        assert!(auth.session().user().is_none());
        assert!(storage.is_empty());
        assert!(gateway.authorization().is_none());
    }

    #[test]
    fn test_new_restores_authorization_header() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(AUTH_TOKEN_KEY, "stored").unwrap();
        let gateway = FakeGateway::new(ok(json!({})), ok(json!({})));

        let auth = AuthService::new(gateway.clone(), SessionStore::new(storage));
        assert!(auth.check_auth());
        assert_eq!(gateway.authorization().as_deref(), Some("stored"));
    }

    #[tokio::test]
    async fn test_get_user_info_updates_profile() {
        let gateway = FakeGateway::new(ok(json!({})), user_record());
        let (auth, _) = service(gateway.clone());

        let user = auth.get_user_info().await.unwrap();
        assert!(user.is_sysadmin());
        assert_eq!(auth.session().user(), Some(user));
        assert_eq!(gateway.user_tokens.lock().unwrap().as_slice(), &[None]);
    }

    #[test]
    fn test_success_shape() {
        assert!(is_login_success(&json!({ "success": true })));
        assert!(is_login_success(&json!({ "user": { "STATUS": "OK" } })));
        assert!(!is_login_success(&json!({ "success": "true" })));
        assert!(!is_login_success(&json!({ "user": { "STATUS": "LOCKED" } })));
    }
}
