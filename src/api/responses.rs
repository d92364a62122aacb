//! Response schemas per endpoint
//!
//! Each endpoint's body is decoded into one of these types at the
//! boundary, so nothing downstream handles untyped JSON.

use serde::{Deserialize, Serialize};

use crate::models::UserRecord;

/// Body of `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserRecord,
    pub token: String,
}

/// Body of `POST /users`: the created user, or a plain message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterResponse {
    Created(UserRecord),
    Message(String),
}

impl RegisterResponse {
    /// Decode a registration body.
    ///
    /// The API echoes the created user as JSON; some deployments answer
    /// with a bare or JSON-quoted message instead.
    pub fn from_body(body: &str) -> Self {
        if let Ok(user) = serde_json::from_str::<UserRecord>(body) {
            return RegisterResponse::Created(user);
        }
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::String(message)) => RegisterResponse::Message(message),
            Ok(serde_json::Value::Object(fields)) => RegisterResponse::Message(
                fields
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
            ),
            Ok(_) => RegisterResponse::Message(String::new()),
            Err(_) => RegisterResponse::Message(body.trim().to_string()),
        }
    }

    /// Text for the success notice
    pub fn message(&self) -> String {
        match self {
            RegisterResponse::Created(user) => {
                format!("User {} registered successfully", user.username)
            }
            RegisterResponse::Message(message) if message.is_empty() => {
                "User registered successfully".to_string()
            }
            RegisterResponse::Message(message) => message.clone(),
        }
    }
}
