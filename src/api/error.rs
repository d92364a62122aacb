//! Normalized API errors
//!
//! Every failure of a gateway call ends up as one `ApiError`. Its `Display`
//! is a short string fit to show the user; the raw server body is only
//! logged. The failure kind is kept so callers can still tell a rejected
//! login from an unreachable server if they want to.

use std::fmt;

use tracing::error;

use super::transport::TransportError;
use crate::storage::StorageError;

/// Message shown when nothing more specific is available
pub const GENERIC_MESSAGE: &str = "Something bad happened; please try again later.";

/// Longest server body that is shown to the user verbatim
const MAX_DISPLAY_LEN: usize = 120;

/// Kind of failure behind an `ApiError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network unreachable, timeout, or a response that could not be decoded
    Transport,
    /// 401/403, or no token stored for an endpoint that needs one
    Auth,
    /// Other 4xx: the request was rejected as invalid
    Validation,
    /// 5xx or any other unexpected status
    Server,
    /// The call succeeded but the session could not be written locally
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Auth => write!(f, "auth"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Server => write!(f, "server"),
            ErrorKind::Storage => write!(f, "storage"),
        }
    }
}

/// Normalized gateway error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Failure kind
    pub kind: ErrorKind,
    /// HTTP status, when the server answered
    pub status: Option<u16>,
    /// Short, human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// Build an error from a non-2xx response
    pub fn from_status(status: u16, body: &str) -> Self {
        error!(status, body = %body, "API request failed");
        let kind = match status {
            401 | 403 => ErrorKind::Auth,
            400..=499 => ErrorKind::Validation,
            _ => ErrorKind::Server,
        };
        Self::new(kind, Some(status), display_message(body))
    }

    /// Build an error for a body that does not match the expected schema
    pub fn malformed(status: Option<u16>, reason: impl fmt::Display) -> Self {
        error!(status = ?status, reason = %reason, "malformed API response");
        Self::new(ErrorKind::Transport, status, GENERIC_MESSAGE)
    }

    /// Build an error for a call that needs a token when none is stored
    pub fn not_logged_in() -> Self {
        Self::new(ErrorKind::Auth, None, "Please log in first.")
    }

    /// Check if this error is an authentication failure
    pub fn is_auth(&self) -> bool {
        self.kind == ErrorKind::Auth
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        error!(error = %e, "API request did not complete");
        Self::new(ErrorKind::Transport, None, GENERIC_MESSAGE)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!(error = %e, "API request task did not finish");
        Self::new(ErrorKind::Transport, None, GENERIC_MESSAGE)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        error!(error = %e, "failed to persist session");
        Self::new(ErrorKind::Storage, None, "Could not save your session; please try again.")
    }
}

/// Pick what the user sees for a failed response body.
///
/// Short plain-text bodies (like `alice already exists`) are shown as
/// they are; JSON documents, HTML pages and long bodies are replaced by
/// the generic message.
pub fn display_message(body: &str) -> String {
    let body = body.trim();

    // A JSON string literal is plain text in disguise
    let text = match serde_json::from_str::<String>(body) {
        Ok(inner) => inner,
        Err(_) => body.to_string(),
    };
    let text = text.trim();

    let structured = text.starts_with('{') || text.starts_with('[') || text.starts_with('<');
    if text.is_empty()
        || structured
        || text.contains('\n')
        || text.chars().count() > MAX_DISPLAY_LEN
    {
        return GENERIC_MESSAGE.to_string();
    }
    text.to_string()
}
