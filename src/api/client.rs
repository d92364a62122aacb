//! API gateway client
//!
//! Wraps every call to the movie API:
//! - attaches `Authorization: Bearer <token>` from the session store on
//!   every endpoint except register and login
//! - normalizes every failure into one `ApiError`
//! - writes the session store after calls that return session data
//!
//! The client never retries and never deduplicates concurrent calls. On any
//! failure the session store is left exactly as it was.
//!
//! Calls that write the store (login, favorites, profile edits) run on their
//! own task. A caller that stops waiting, such as a view being torn down,
//! does not cancel them, so the store always learns what the server applied.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::error::ApiError;
use super::responses::{LoginResponse, RegisterResponse};
use super::transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
use crate::config::ApiConfig;
use crate::models::{LoginDetails, MovieRecord, RegistrationDetails, UserRecord, UserUpdateDetails};
use crate::session::SessionStore;

/// Gateway to the movie API
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client over any transport
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    /// Create a client talking HTTP to `config.base_url`
    pub fn from_config(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config.base_url, config.timeout())?;
        Ok(Self::new(Arc::new(transport), session))
    }

    /// The session store this client writes to
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// `POST /users`
    pub async fn register(&self, details: &RegistrationDetails) -> Result<RegisterResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, "/users").json(to_json(details)?);
        let response = execute(self.transport.as_ref(), request).await?;
        info!(username = %details.username, "user registered");
        Ok(RegisterResponse::from_body(&response.body))
    }

    /// `POST /login`; on success stores token and user together.
    ///
    /// Runs detached: once sent, the login completes and is stored even if
    /// the caller stops waiting.
    pub async fn login(&self, credentials: &LoginDetails) -> Result<LoginResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, "/login").json(to_json(credentials)?);
        let transport = Arc::clone(&self.transport);
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            let response: LoginResponse = call(transport.as_ref(), request).await?;
            session.begin(&response.token, &response.user)?;
            Ok::<_, ApiError>(response)
        })
        .await?
    }

    /// `GET /movies`
    pub async fn list_movies(&self) -> Result<Vec<MovieRecord>, ApiError> {
        let request = self.authorized(Method::Get, "/movies".to_string())?;
        let movies: Vec<MovieRecord> = call(self.transport.as_ref(), request).await?;
        debug!(count = movies.len(), "movies listed");
        Ok(movies)
    }

    /// `GET /movies/{id}`
    pub async fn get_movie(&self, movie_id: &str) -> Result<MovieRecord, ApiError> {
        let request = self.authorized(Method::Get, format!("/movies/{}", segment(movie_id)))?;
        call(self.transport.as_ref(), request).await
    }

    /// `GET /users/{username}`; read-through, the cache is not touched
    pub async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError> {
        let request = self.authorized(Method::Get, user_path(username))?;
        call(self.transport.as_ref(), request).await
    }

    /// `POST /users/{username}/movies/{movieId}`; caches the returned user
    pub async fn add_favorite(&self, username: &str, movie_id: &str) -> Result<UserRecord, ApiError> {
        let request = self.authorized(Method::Post, favorite_path(username, movie_id))?;
        let user = self.store_user_from(request).await?;
        info!(username = %username, movie_id = %movie_id, "favorite added");
        Ok(user)
    }

    /// `DELETE /users/{username}/movies/{movieId}`; caches the returned user.
    ///
    /// Issued even when `movie_id` is not a favorite; the server's answer
    /// is taken as is.
    pub async fn remove_favorite(&self, username: &str, movie_id: &str) -> Result<UserRecord, ApiError> {
        let request = self.authorized(Method::Delete, favorite_path(username, movie_id))?;
        let user = self.store_user_from(request).await?;
        info!(username = %username, movie_id = %movie_id, "favorite removed");
        Ok(user)
    }

    /// `PUT /users/{username}`; caches the returned user.
    ///
    /// `username` is the key of the account to edit, which may differ from
    /// `details.username` when the username itself is being changed.
    pub async fn update_user(&self, username: &str, details: &UserUpdateDetails) -> Result<UserRecord, ApiError> {
        let request = self
            .authorized(Method::Put, user_path(username))?
            .json(to_json(details)?);
        let user = self.store_user_from(request).await?;
        info!(from = %username, to = %user.username, "profile updated");
        Ok(user)
    }

    /// `DELETE /users/{username}`; returns the server's confirmation text.
    ///
    /// Does not clear the session: the caller shows its confirmation and
    /// then calls `SessionStore::clear`.
    pub async fn delete_user(&self, username: &str) -> Result<String, ApiError> {
        let request = self.authorized(Method::Delete, user_path(username))?;
        let response = execute(self.transport.as_ref(), request).await?;
        info!(username = %username, "account deleted");
        Ok(response.body.trim().to_string())
    }

    /// Build a request carrying the stored token
    fn authorized(&self, method: Method, path: String) -> Result<ApiRequest, ApiError> {
        let token = self.session.token().ok_or_else(ApiError::not_logged_in)?;
        Ok(ApiRequest::new(method, path).bearer(token))
    }

    /// Send on a detached task and cache the user record it returns.
    ///
    /// Dropping the returned future does not cancel the request; the store
    /// write still happens when the server answers.
    async fn store_user_from(&self, request: ApiRequest) -> Result<UserRecord, ApiError> {
        let transport = Arc::clone(&self.transport);
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            let user: UserRecord = call(transport.as_ref(), request).await?;
            session.set_user(&user)?;
            Ok::<_, ApiError>(user)
        })
        .await?
    }
}

/// Send and decode a JSON body
async fn call<T: DeserializeOwned>(transport: &dyn Transport, request: ApiRequest) -> Result<T, ApiError> {
    let response = execute(transport, request).await?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::malformed(Some(response.status), e))
}

/// Send and return a 2xx response
async fn execute(transport: &dyn Transport, request: ApiRequest) -> Result<ApiResponse, ApiError> {
    let method = request.method;
    let path = request.path.clone();
    let response = transport.send(request).await?;
    if !response.is_success() {
        debug!(method = %method, path = %path, status = response.status, "request rejected");
        return Err(ApiError::from_status(response.status, &response.body));
    }
    Ok(response)
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::malformed(None, e))
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn user_path(username: &str) -> String {
    format!("/users/{}", segment(username))
}

fn favorite_path(username: &str, movie_id: &str) -> String {
    format!("/users/{}/movies/{}", segment(username), segment(movie_id))
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::api::testing::{scripted_client, user_json};
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// After a successful login both halves of the session are the new values.
        #[test]
        fn login_is_atomic(
            token in "[a-zA-Z0-9]{1,32}",
            username in "[a-z][a-z0-9]{0,11}",
            favourites in prop::collection::vec("[a-f0-9]{24}", 0..5),
        ) {
            let (client, transport, session) = scripted_client();
            session.begin("old-token", &UserRecord::new("u0", "old", "", "")).unwrap();

            let mut user = UserRecord::new("u1", username.clone(), "x@example.com", "1990-04-01");
            user.favourite_movies = favourites;
            transport.respond_json(200, json!({ "user": user_json(&user), "token": token.clone() }));

            tokio_test::block_on(client.login(&LoginDetails::new(username, "pw"))).unwrap();

            let snapshot = session.snapshot();
            prop_assert_eq!(snapshot.token, Some(token));
            prop_assert_eq!(snapshot.user, Some(user));
        }
    }
}
