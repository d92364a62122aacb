//! Navigation bar

use std::sync::Arc;

use super::notice::{Notice, ViewResult, LONG};
use crate::api::ApiError;
use crate::session::{Route, SessionStore};

/// Navigation bar: route switching and logout
pub struct AppNav {
    session: Arc<SessionStore>,
}

impl AppNav {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Open `route`; pages behind login fall back to the landing view
    pub fn open(&self, route: Route) -> Route {
        let target = match route {
            Route::Movies | Route::Profile if !self.session.is_logged_in() => Route::Welcome,
            other => other,
        };
        self.session.navigate(target);
        target
    }

    /// End the session and return to the landing view
    pub fn logout(&self) -> ViewResult<()> {
        self.session
            .clear()
            .map_err(|e| Notice::from_api_error(&ApiError::from(e), LONG))
    }
}
