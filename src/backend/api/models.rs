//! Wire types of the remote API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Administrator profile returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_superadmin: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

impl UserProfile {
    /// Name shown in the UI, falling back to the email.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

/// Timestamps as the API writes them. The backend stores naive UTC values,
/// so most arrive without an offset; those are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(at) => Ok(at.with_timezone(&Utc)),
            Err(_) => raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()),
        }
    }

    fn parse_field<E: serde::de::Error>(raw: &str) -> Result<DateTime<Utc>, E> {
        parse(raw).map_err(|e| E::custom(format!("invalid timestamp '{raw}': {e}")))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_field(&String::deserialize(deserializer)?)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_field(&raw))
            .transpose()
    }
}

/// Error body of the API. `detail` is a message string for most errors and a
/// list of field errors for request validation failures.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Parses an error body and returns its message, if it carries one.
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}
