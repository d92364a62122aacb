//! Session model

use super::UserRecord;

/// Snapshot of the client-side session: auth token plus cached user.
///
/// A session is live only when `token` is present and non-empty; a cached
/// user without a token is stale data, not a logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Bearer token issued by `POST /login`
    pub token: Option<String>,
    /// Cached user record
    pub user: Option<UserRecord>,
}

impl Session {
    /// Check if this snapshot represents a logged-in user
    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
