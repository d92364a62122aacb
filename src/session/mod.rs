//! Session store
//!
//! Owns the durable client-side session: the auth token and the cached user
//! record, kept in two storage entries (`token` and `userData`).
//!
//! The store is constructed once at startup and shared by handle
//! (`Arc<SessionStore>`) with the API client and every view. Absence of a
//! token or user is a normal state and is reported as `None`, never as an
//! error; only failures to write the backing storage are errors.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{Session, UserRecord};
use crate::storage::{StorageBackend, StorageError};

/// Storage key of the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key of the JSON-serialized user record
pub const USER_KEY: &str = "userData";

/// Top-level screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Unauthenticated landing view with register/login entry points
    #[default]
    Welcome,
    /// Movie list
    Movies,
    /// Profile editor
    Profile,
}

/// Process-wide session store
pub struct SessionStore {
    storage: Arc<dyn StorageBackend>,
    /// Held for reading by getters and for writing by compound mutations,
    /// so token and user are always observed as a pair.
    guard: RwLock<()>,
    route: watch::Sender<Route>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("logged_in", &self.is_logged_in())
            .field("route", &*self.route.borrow())
            .finish()
    }
}

impl SessionStore {
    /// Create a store over the given storage backend
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let (route, _) = watch::channel(Route::Welcome);
        Self {
            storage,
            guard: RwLock::new(()),
            route,
        }
    }

    /// Get the stored token, `None` when absent or empty
    pub fn token(&self) -> Option<String> {
        let _read = self.guard.read().unwrap_or_else(|e| e.into_inner());
        self.read_token()
    }

    /// Get the cached user record, `None` when absent or unreadable
    pub fn user(&self) -> Option<UserRecord> {
        let _read = self.guard.read().unwrap_or_else(|e| e.into_inner());
        self.read_user()
    }

    /// Read token and user together
    pub fn snapshot(&self) -> Session {
        let _read = self.guard.read().unwrap_or_else(|e| e.into_inner());
        Session {
            token: self.read_token(),
            user: self.read_user(),
        }
    }

    /// Cached user of the live session.
    ///
    /// `None` when no token is stored, even if a stale user record is.
    pub fn live_user(&self) -> Option<UserRecord> {
        let session = self.snapshot();
        if session.is_logged_in() {
            session.user
        } else {
            None
        }
    }

    /// True iff a non-empty token is stored.
    ///
    /// A cached user without a token does not count as a live session.
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store the token
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        let _write = self.guard.write().unwrap_or_else(|e| e.into_inner());
        self.storage.set(TOKEN_KEY, token)
    }

    /// Replace the cached user record wholesale
    pub fn set_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let data = serde_json::to_string(user)?;
        let _write = self.guard.write().unwrap_or_else(|e| e.into_inner());
        self.storage.set(USER_KEY, &data)?;
        debug!(username = %user.username, favourites = user.favourite_movies.len(), "cached user updated");
        Ok(())
    }

    /// Store token and user as one mutation.
    ///
    /// No reader can observe the new token with the old user or the
    /// other way round.
    pub fn begin(&self, token: &str, user: &UserRecord) -> Result<(), StorageError> {
        let data = serde_json::to_string(user)?;
        let _write = self.guard.write().unwrap_or_else(|e| e.into_inner());
        self.storage
            .set_many(&[(TOKEN_KEY, token), (USER_KEY, data.as_str())])?;
        info!(username = %user.username, "session started");
        Ok(())
    }

    /// Drop token and user, then navigate to the landing view
    pub fn clear(&self) -> Result<(), StorageError> {
        {
            let _write = self.guard.write().unwrap_or_else(|e| e.into_inner());
            self.storage.clear()?;
        }
        info!("session cleared");
        self.navigate(Route::Welcome);
        Ok(())
    }

    /// Current route
    pub fn route(&self) -> Route {
        *self.route.borrow()
    }

    /// Switch to `route` and notify subscribers
    pub fn navigate(&self, route: Route) {
        self.route.send_replace(route);
    }

    /// Subscribe to route changes
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }

    fn read_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read token from storage");
                None
            }
        }
    }

    fn read_user(&self) -> Option<UserRecord> {
        let data = match self.storage.get(USER_KEY) {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read user from storage");
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "corrupted user entry in storage, ignoring");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    fn alice() -> UserRecord {
        UserRecord::new("u1", "alice", "alice@example.com", "1990-04-01")
    }

    #[test]
    fn test_cold_start_is_empty() {
        let store = store();
        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
        assert!(!store.is_logged_in());
        assert_eq!(store.snapshot(), Session::default());
        assert_eq!(store.route(), Route::Welcome);
    }

    #[test]
    fn test_begin_sets_token_and_user() {
        let store = store();
        store.begin("abc123", &alice()).unwrap();

        assert_eq!(store.token(), Some("abc123".to_string()));
        assert_eq!(store.user(), Some(alice()));
        assert!(store.is_logged_in());
    }

    #[test]
    fn test_empty_token_is_logged_out() {
        let store = store();
        store.set_token("").unwrap();
        assert_eq!(store.token(), None);
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_stale_user_without_token_is_logged_out() {
        let store = store();
        store.set_user(&alice()).unwrap();
        assert!(!store.is_logged_in());
        assert_eq!(store.user(), Some(alice()));
        assert_eq!(store.live_user(), None);

        store.set_token("abc123").unwrap();
        assert_eq!(store.live_user(), Some(alice()));
    }

    #[test]
    fn test_set_user_replaces_wholesale() {
        let store = store();
        let mut user = alice();
        user.favourite_movies = vec!["m1".to_string()];
        store.set_user(&user).unwrap();

        let replacement = UserRecord::new("u1", "alice", "new@example.com", "1990-04-01");
        store.set_user(&replacement).unwrap();

        let cached = store.user().unwrap();
        assert_eq!(cached.email, "new@example.com");
        assert!(cached.favourite_movies.is_empty());
    }

    #[test]
    fn test_clear_drops_everything_and_navigates_home() {
        let store = store();
        let mut routes = store.subscribe();
        store.navigate(Route::Profile);
        assert!(routes.has_changed().unwrap());
        routes.mark_unchanged();

        store.begin("abc123", &alice()).unwrap();
        store.clear().unwrap();

        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
        assert!(!store.is_logged_in());
        assert_eq!(store.route(), Route::Welcome);
        assert!(routes.has_changed().unwrap());
        assert_eq!(*routes.borrow_and_update(), Route::Welcome);
    }

    #[test]
    fn test_clear_on_empty_store_is_fine() {
        let store = store();
        store.clear().unwrap();
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_corrupted_user_entry_reads_as_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(USER_KEY, "{not json").unwrap();
        let store = SessionStore::new(storage);
        assert_eq!(store.user(), None);
    }

    #[test]
    fn test_user_entry_uses_api_field_names() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.set_user(&alice()).unwrap();

        let raw = storage.get(USER_KEY).unwrap().unwrap();
        assert!(raw.contains("\"Username\":\"alice\""));
        assert!(raw.contains("\"FavouriteMovies\":[]"));
    }
}
