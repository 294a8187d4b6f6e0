//! HTTP client for the backoffice backend.
//!
//! Wraps a `reqwest::Client` configured with the base URL and timeout from
//! [`ApiConfig`]. Every request carries the default `Authorization` header
//! when one is set; a 401 from any endpoint clears that header and notifies
//! the installed [`UnauthorizedHandler`].

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use backoffice_core::config::ApiConfig;
use backoffice_core::gateway::{ApiResponse, AuthGateway, ProcRequest, ProcedureGateway};
use backoffice_core::session::{LoginRequest, UnauthorizedHandler};
use backoffice_core::{BackofficeError, Result};
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::Serialize;
use serde_json::Value;

use super::endpoints;

pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout_ms: u64,
    authorization: RwLock<Option<String>>,
    unauthorized_handler: RwLock<Option<Arc<dyn UnauthorizedHandler>>>,
}

impl ApiClient {
    /// Builds a client for `config.base_url` with `config.timeout_ms`.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| BackofficeError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
            authorization: RwLock::new(None),
            unauthorized_handler: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Installs the handler invoked on every 401 response.
    pub fn set_unauthorized_handler(&self, handler: Arc<dyn UnauthorizedHandler>) {
        *self
            .unauthorized_handler
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(handler);
    }

    /// Whether a default `Authorization` header is set.
    pub fn has_authorization(&self) -> bool {
        self.authorization
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Sends a GET request to `path`.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        let request = self.client.get(self.url(path));
        self.send(self.authorize(request, None)).await
    }

    /// Sends a JSON POST request to `path`.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send(self.authorize(request, None)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the bearer header: `token` when given, else the default.
    fn authorize(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let value = match token {
            Some(token) => Some(format!("Bearer {}", token)),
            None => self
                .authorization
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
        };

        let request = request.header(header::ACCEPT, "application/json");
        match value {
            Some(value) => request.header(header::AUTHORIZATION, value),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await.map_err(|e| self.map_reqwest_error(e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let body = parse_body(&text);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("[ApiClient] 401 from backend, ending session");
            self.handle_unauthorized();
            return Err(BackofficeError::Unauthorized { body });
        }

        if !status.is_success() {
            tracing::debug!("[ApiClient] Request failed with status {}", status);
            return Err(BackofficeError::http(status.as_u16(), body));
        }

        Ok(ApiResponse::new(status.as_u16(), body.unwrap_or(Value::Null)))
    }

    fn handle_unauthorized(&self) {
        self.set_authorization(None);

        let handler = self
            .unauthorized_handler
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        if let Some(handler) = handler {
            handler.on_unauthorized();
        }
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> BackofficeError {
        if error.is_timeout() {
            tracing::warn!("[ApiClient] Request timed out after {}ms", self.timeout_ms);
            BackofficeError::Timeout(self.timeout_ms)
        } else {
            tracing::warn!("[ApiClient] Transport error: {}", error);
            BackofficeError::Transport(error.to_string())
        }
    }
}

/// Parses a response body as JSON, keeping non-JSON text as a string.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse> {
        self.post(endpoints::LOGIN, request).await
    }

    async fn fetch_current_user(&self, token: Option<&str>) -> Result<ApiResponse> {
        let request = self.client.get(self.url(endpoints::USER_INFO));
        self.send(self.authorize(request, token)).await
    }

    fn set_authorization(&self, token: Option<&str>) {
        *self
            .authorization
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) =
            token.map(|token| format!("Bearer {}", token));
    }
}

#[async_trait]
impl ProcedureGateway for ApiClient {
    async fn call_proc(&self, request: &ProcRequest) -> Result<ApiResponse> {
        tracing::debug!("[ApiClient] callproc {}", request.proc_name);
        self.post(endpoints::CALL_PROC, request).await
    }
}
