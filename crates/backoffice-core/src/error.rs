//! Error types for the backoffice client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A shared error type for the entire backoffice client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BackofficeError {
    /// The server answered with a non-success HTTP status.
    #[error("Request failed with status code {status}")]
    Http {
        status: u16,
        /// Parsed response body, when the server sent JSON
        body: Option<Value>,
    },

    /// The server answered 401; the session is no longer valid.
    #[error("Unauthorized")]
    Unauthorized { body: Option<Value> },

    /// Connection, DNS or TLS failure before a response arrived
    #[error("Network Error: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout
    #[error("timeout of {0}ms exceeded")]
    Timeout(u64),

    /// Durable key/value storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication error reported by the login flow
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Navigation could not settle on a route
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackofficeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an HTTP status error
    pub fn http(status: u16, body: Option<Value>) -> Self {
        Self::Http { status, body }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Navigation error
    pub fn navigation(message: impl Into<String>) -> Self {
        Self::Navigation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Inspection
    // ============================================================================

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Check if this error means the session is no longer valid
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns the response body the server sent with this error, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Http { body, .. } | Self::Unauthorized { body } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns the message the server put in the error body.
    ///
    /// Checks `message` first, then the upper-case `MESSAGE` the procedure
    /// backend uses.
    pub fn server_message(&self) -> Option<String> {
        self.body().and_then(message_from_body)
    }

    /// Normalizes this error into a human-readable message.
    ///
    /// Order: server `message`, server `MESSAGE`, this error's own text,
    /// then `fallback`.
    pub fn describe(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message;
        }
        let own = self.to_string();
        if own.trim().is_empty() {
            fallback.to_string()
        } else {
            own
        }
    }
}

/// Extracts a non-empty `message` / `MESSAGE` string from a response body.
pub fn message_from_body(body: &Value) -> Option<String> {
    ["message", "MESSAGE"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for BackofficeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BackofficeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BackofficeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for BackofficeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for BackofficeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, BackofficeError>`.
pub type Result<T> = std::result::Result<T, BackofficeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_prefers_server_message() {
        let err = BackofficeError::http(500, Some(json!({ "message": "boom" })));
        assert_eq!(err.describe("fallback"), "boom");
    }

    #[test]
    fn test_describe_uses_upper_case_message() {
        let err = BackofficeError::http(400, Some(json!({ "MESSAGE": "Wrong password" })));
        assert_eq!(err.describe("fallback"), "Wrong password");
    }

    #[test]
    fn test_describe_falls_back_to_error_text() {
        let err = BackofficeError::http(502, None);
        assert_eq!(err.describe("fallback"), "Request failed with status code 502");

        let err = BackofficeError::Transport("connection refused".into());
        assert_eq!(err.describe("fallback"), "Network Error: connection refused");
    }

    #[test]
    fn test_empty_server_message_is_skipped() {
        let err = BackofficeError::http(400, Some(json!({ "message": "", "MESSAGE": "x" })));
        assert_eq!(err.server_message(), Some("x".to_string()));
    }

    #[test]
    fn test_status() {
        assert_eq!(BackofficeError::Unauthorized { body: None }.status(), Some(401));
        assert_eq!(BackofficeError::http(404, None).status(), Some(404));
        assert_eq!(BackofficeError::Timeout(10_000).status(), None);
        assert!(BackofficeError::Unauthorized { body: None }.is_unauthorized());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BackofficeError = io.into();
        assert!(matches!(err, BackofficeError::Io { .. }));
    }
}
