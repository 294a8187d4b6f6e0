//! Backend gateway traits.
//!
//! The application layer talks to the backend only through these traits; the
//! infrastructure crate implements them over HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::session::LoginRequest;

/// A successful backend response: status and JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

impl ApiResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// The nested `data` field most procedure responses wrap their rows in.
    pub fn payload(&self) -> Option<&Value> {
        self.data.get("data").filter(|value| !value.is_null())
    }
}

/// Body of a named-procedure call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcRequest {
    pub proc_name: String,
    pub params: Value,
}

impl ProcRequest {
    pub fn new(proc_name: impl Into<String>, params: Value) -> Self {
        Self {
            proc_name: proc_name.into(),
            params,
        }
    }
}

/// Authentication endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Posts credentials to the login endpoint.
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse>;

    /// Fetches the current user's record.
    ///
    /// `token` overrides the default authorization header for this one
    /// request; `None` uses the default header.
    async fn fetch_current_user(&self, token: Option<&str>) -> Result<ApiResponse>;

    /// Sets or removes the default `Authorization: Bearer` header.
    fn set_authorization(&self, token: Option<&str>);
}

/// The generic named-procedure endpoint.
#[async_trait]
pub trait ProcedureGateway: Send + Sync {
    async fn call_proc(&self, request: &ProcRequest) -> Result<ApiResponse>;
}
