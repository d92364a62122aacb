//! User model
//!
//! The user record as the movie API returns it, plus the request payloads
//! sent when registering, logging in and editing a profile.
//!
//! Field names on the wire are PascalCase (`Username`, `FavouriteMovies`)
//! and the identifier is `_id`; the Rust side uses snake_case.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User record owned by the session store.
///
/// Replaced wholesale whenever the server answers with an updated user.
/// Extra fields the server sends (such as the password hash) are dropped
/// on deserialization and never reach local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-side identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Username, also the key for every user endpoint
    #[serde(rename = "Username")]
    pub username: String,
    /// Email address
    #[serde(rename = "Email", default)]
    pub email: String,
    /// Birthday as the server formats it (date or full timestamp)
    #[serde(rename = "Birthday", default)]
    pub birthday: String,
    /// Favorited movie ids, in the order the server keeps them
    #[serde(rename = "FavouriteMovies", default)]
    pub favourite_movies: Vec<String>,
}

impl UserRecord {
    /// Create a user record with no favorites
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        birthday: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            birthday: birthday.into(),
            favourite_movies: Vec::new(),
        }
    }

    /// Check whether `movie_id` is in the favorites list
    pub fn has_favourite(&self, movie_id: &str) -> bool {
        self.favourite_movies.iter().any(|id| id == movie_id)
    }

    /// Parse the birthday into a calendar date.
    ///
    /// Accepts both `YYYY-MM-DD` and RFC 3339 timestamps
    /// (`1990-04-01T00:00:00.000Z`), which is what the API stores.
    /// Timestamps are read as their UTC calendar date.
    pub fn birthday_date(&self) -> Option<NaiveDate> {
        let raw = self.birthday.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    }
}

/// Payload for `POST /users`
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationDetails {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday")]
    pub birthday: String,
}

impl fmt::Debug for RegistrationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDetails")
            .field("username", &self.username)
            .field("password", &"***")
            .field("email", &self.email)
            .field("birthday", &self.birthday)
            .finish()
    }
}

/// Payload for `POST /login`
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginDetails {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl LoginDetails {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDetails")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Payload for `PUT /users/{username}`: a full replacement of the
/// editable profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdateDetails {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday")]
    pub birthday: String,
}
