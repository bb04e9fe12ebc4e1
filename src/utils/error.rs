//! Error handling.

use std::fmt;

/// Broad classification of a failure, as seen by the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad credentials, expired or invalid token (HTTP 401/403).
    Authentication,
    /// Transport failures and any other non-success API response.
    Network,
    /// Durable token storage could not be read or written.
    Storage,
    Config,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    detail: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    /// Builds an error for a non-success API response.
    ///
    /// `detail` is the human-readable message the server put in its error
    /// body, if any.
    pub fn api(status: u16, detail: Option<String>) -> Self {
        let kind = match status {
            401 | 403 => ErrorKind::Authentication,
            _ => ErrorKind::Network,
        };
        let message = match &detail {
            Some(detail) => format!("API error {status}: {detail}"),
            None => format!("API error {status}"),
        };
        Self {
            kind,
            message,
            detail,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Server-provided message, present only for API errors that carried one.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(format!("JSON error: {err}"))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::api(status.as_u16(), None),
            None => Self::new(ErrorKind::Network, format!("HTTP error: {err}")),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! simple_error {
    ($kind:ident, $msg:literal) => {
        $crate::utils::error::Error::new($crate::utils::error::ErrorKind::$kind, $msg)
    };
    ($kind:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::utils::error::Error::new(
            $crate::utils::error::ErrorKind::$kind,
            format!($fmt, $($arg)*),
        )
    };
}
