//! Session domain models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authenticated-user state kept in memory and mirrored to durable storage.
///
/// `is_authenticated()` is true exactly when a token is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued by the login endpoint
    pub token: Option<String>,
    /// Profile of the signed-in user
    pub user: Option<UserProfile>,
    /// True while a login request is in flight
    pub loading: bool,
    /// Message of the last failed login
    pub error: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// First 20 characters of the token, for log lines.
    pub fn token_preview(&self) -> String {
        match &self.token {
            Some(token) => format!("{}...", token.chars().take(20).collect::<String>()),
            None => "none".to_string(),
        }
    }
}

/// Profile of the signed-in user.
///
/// Built from the upper-case record returned by the current-user endpoint.
/// The raw record is kept under `_raw` for fields this struct does not name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "PK")]
    pub pk_upper: Option<String>,
    pub username: Option<String>,
    pub user_name: Option<String>,
    pub thr_abemp_pk: Option<String>,
    pub org_nm: Option<String>,
    pub role_nm: Option<String>,
    pub sysadmin_yn: Option<String>,
    pub tco_company_pk: Option<String>,
    pub tco_org_pk: Option<String>,
    pub hr_level: Option<String>,
    pub user_language: Option<String>,
    pub emp_id: Option<String>,
    pub announce_yn: Option<String>,
    pub org_id: Option<String>,
    pub pk: Option<String>,
    pub pr_level: Option<String>,
    pub salary_security: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "_raw", default)]
    pub raw: Value,
}

impl UserProfile {
    /// Maps the backend's user record onto the profile.
    ///
    /// Numbers and booleans are kept in their string form; `null` and
    /// missing fields become `None`.
    pub fn from_backend(record: &Value) -> Self {
        let field = |name: &str| -> Option<String> {
            match record.get(name) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            }
        };

        Self {
            pk_upper: field("PK"),
            username: field("USER_NAME"),
            user_name: field("USER_NAME"),
            thr_abemp_pk: field("THR_ABEMP_PK"),
            org_nm: field("ORG_NM"),
            role_nm: field("ROLE_NM"),
            sysadmin_yn: field("SYSADMIN_YN"),
            tco_company_pk: field("TCO_COMPANY_PK"),
            tco_org_pk: field("TCO_ORG_PK"),
            hr_level: field("HR_LEVEL"),
            user_language: field("USER_LANGUAGE"),
            emp_id: field("EMP_ID"),
            announce_yn: field("ANNOUNCE_YN"),
            org_id: field("ORG_ID"),
            pk: field("PK"),
            pr_level: field("PR_LEVEL"),
            salary_security: field("SALARY_SECURITY"),
            logo: field("LOGO"),
            raw: record.clone(),
        }
    }

    /// Whether the user has the system administrator flag.
    pub fn is_sysadmin(&self) -> bool {
        self.sysadmin_yn.as_deref() == Some("Y")
    }

    /// Name to show in the shell header.
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("")
    }
}

/// Body of the login request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum LoginOutcome {
    /// The server accepted the credentials
    Success { message: Option<String> },
    /// The server rejected the credentials or the request failed
    Failure { error: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success { .. } => None,
        }
    }
}
