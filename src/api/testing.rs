//! Scripted transport for tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use super::ApiClient;
use crate::models::UserRecord;
use crate::session::SessionStore;
use crate::storage::MemoryStorage;

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    delay: Mutex<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    pub fn respond_json(&self, status: u16, body: serde_json::Value) {
        self.respond(status, body.to_string());
    }

    pub fn fail(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Hold every response for `delay` after the request is recorded
    pub fn delay_responses(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_string())))
    }
}

/// Client over a scripted transport and an in-memory session
pub fn scripted_client() -> (ApiClient, Arc<ScriptedTransport>, Arc<SessionStore>) {
    let transport = ScriptedTransport::new();
    let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
    let client = ApiClient::new(transport.clone(), session.clone());
    (client, transport, session)
}

pub fn alice() -> UserRecord {
    UserRecord::new("u1", "alice", "alice@example.com", "1990-04-01T00:00:00.000Z")
}

pub fn alice_with(favourites: &[&str]) -> UserRecord {
    let mut user = alice();
    user.favourite_movies = favourites.iter().map(|id| id.to_string()).collect();
    user
}

pub fn user_json(user: &UserRecord) -> serde_json::Value {
    serde_json::to_value(user).unwrap()
}

pub fn movie_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "Title": title,
        "Description": format!("About {}", title),
        "ImagePath": format!("https://img.example/{}.jpg", id),
        "Director": { "Name": "Some Director", "Bio": "Bio", "Birth": 1970 },
        "Genre": { "Name": "Drama", "Description": "Drama" },
        "Featured": false
    })
}
