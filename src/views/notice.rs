//! Transient user-facing messages

use std::fmt;
use std::time::Duration;

use crate::api::ApiError;

/// Display time for messages shown from dialogs (login, registration)
pub const SHORT: Duration = Duration::from_millis(2000);

/// Display time for messages shown from pages (movie list, profile)
pub const LONG: Duration = Duration::from_millis(3000);

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A dismissible message for the user, shown for `duration`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Label of the dismiss action
    pub action: &'static str,
    pub duration: Duration,
}

impl Notice {
    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            action: "OK",
            duration,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            action: "OK",
            duration,
        }
    }

    /// Notice for a failed gateway call
    pub fn from_api_error(error: &ApiError, duration: Duration) -> Self {
        Self::error(error.to_string(), duration)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Outcome of a view action: a success notice or an error notice
pub type ViewResult<T = Notice> = Result<T, Notice>;

/// Check required form fields, in order.
///
/// Returns an error notice naming the first empty field.
pub fn require(fields: &[(&str, &str)], duration: Duration) -> ViewResult<()> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(Notice::error(format!("{} is required", name), duration)),
        None => Ok(()),
    }
}
