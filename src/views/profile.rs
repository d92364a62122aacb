//! Profile view model
//!
//! Edits and deletes the logged-in user's account. The form is keyed by
//! the username captured when the profile was loaded, so renaming the
//! account sends the request to the old name.

use super::notice::{require, Notice, ViewResult, LONG};
use crate::api::{ApiClient, ApiError};
use crate::models::UserUpdateDetails;

/// Profile screen
pub struct ProfileView {
    client: ApiClient,
    form: UserUpdateDetails,
    current_username: String,
}

impl ProfileView {
    /// Build the view from the cached user
    pub fn new(client: ApiClient) -> Self {
        let mut view = Self {
            client,
            form: UserUpdateDetails::default(),
            current_username: String::new(),
        };
        view.refresh();
        view
    }

    /// Reload form fields and key from the user of the live session.
    ///
    /// The birthday is shown as `YYYY-MM-DD` whatever format the server
    /// stored it in.
    pub fn refresh(&mut self) {
        if let Some(user) = self.client.session().live_user() {
            let birthday = user
                .birthday_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| user.birthday.clone());
            self.form = UserUpdateDetails {
                username: user.username.clone(),
                email: user.email.clone(),
                birthday,
            };
            self.current_username = user.username;
        }
    }

    /// Form values as currently edited
    pub fn form(&self) -> &UserUpdateDetails {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserUpdateDetails {
        &mut self.form
    }

    /// Username the profile was loaded for
    pub fn current_username(&self) -> &str {
        &self.current_username
    }

    /// Submit the form.
    ///
    /// On success the form is rebuilt from the user the server returned,
    /// not from what was typed. On failure edits and key are kept.
    pub async fn update(&mut self) -> ViewResult {
        self.ensure_loaded()?;
        require(
            &[
                ("Username", self.form.username.as_str()),
                ("Email", self.form.email.as_str()),
                ("Birthday", self.form.birthday.as_str()),
            ],
            LONG,
        )?;

        self.client
            .update_user(&self.current_username, &self.form)
            .await
            .map_err(|e| Notice::from_api_error(&e, LONG))?;

        self.refresh();
        Ok(Notice::info("Profile data updated successfully", LONG))
    }

    /// Delete the account, then end the session.
    ///
    /// On failure the session is left untouched.
    pub async fn deregister(&mut self) -> ViewResult {
        self.ensure_loaded()?;

        self.client
            .delete_user(&self.current_username)
            .await
            .map_err(|e| Notice::from_api_error(&e, LONG))?;

        let notice = Notice::info("Profile data deleted successfully", LONG);
        self.client
            .session()
            .clear()
            .map_err(|e| Notice::from_api_error(&ApiError::from(e), LONG))?;
        Ok(notice)
    }

    fn ensure_loaded(&self) -> ViewResult<()> {
        if self.current_username.is_empty() {
            return Err(Notice::from_api_error(&ApiError::not_logged_in(), LONG));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{alice, scripted_client, user_json};
    use crate::api::{Method, TransportError};
    use crate::models::Session;
    use crate::session::Route;

    #[tokio::test]
    async fn test_loads_from_store_with_normalized_birthday() {
        let (client, _transport, session) = scripted_client();
        session.begin("abc123", &alice()).unwrap();

        let view = ProfileView::new(client);

        assert_eq!(view.current_username(), "alice");
        assert_eq!(view.form().username, "alice");
        assert_eq!(view.form().email, "alice@example.com");
        assert_eq!(view.form().birthday, "1990-04-01");
    }

    #[tokio::test]
    async fn test_rename_uses_pre_edit_username() {
        let (client, transport, session) = scripted_client();
        session.begin("abc123", &alice()).unwrap();
        let mut renamed = alice();
        renamed.username = "alicia".to_string();
        renamed.birthday = "1990-04-02T00:00:00.000Z".to_string();
        transport.respond_json(200, user_json(&renamed));

        let mut view = ProfileView::new(client);
        view.form_mut().username = "alicia".to_string();
        view.form_mut().birthday = "1990-04-02".to_string();
        let notice = view.update().await.unwrap();

        assert_eq!(notice.message, "Profile data updated successfully");
        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/users/alice");
        assert_eq!(request.body.unwrap()["Username"], "alicia");

        // Key follows the refreshed store for the next edit
        assert_eq!(view.current_username(), "alicia");
        assert_eq!(session.user().unwrap().username, "alicia");
    }

    #[tokio::test]
    async fn test_update_shows_server_normalized_values() {
        let (client, transport, session) = scripted_client();
        session.begin("abc123", &alice()).unwrap();
        let mut normalized = alice();
        normalized.email = "alice@example.com".to_string();
        transport.respond_json(200, user_json(&normalized));

        let mut view = ProfileView::new(client);
        view.form_mut().email = "  ALICE@example.com ".to_string();
        view.update().await.unwrap();

        assert_eq!(view.form().email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_update_failure_keeps_edits() {
        let (client, transport, session) = scripted_client();
        session.begin("abc123", &alice()).unwrap();
        transport.respond(400, "Email is not valid");

        let mut view = ProfileView::new(client);
        view.form_mut().email = "nope".to_string();
        let notice = view.update().await.unwrap_err();

        assert_eq!(notice.message, "Email is not valid");
        assert_eq!(view.form().email, "nope");
        assert_eq!(view.current_username(), "alice");
        assert_eq!(session.user(), Some(alice()));
    }

    #[tokio::test]
    async fn test_update_requires_fields() {
        let (client, transport, session) = scripted_client();
        session.begin("abc123", &alice()).unwrap();

        let mut view = ProfileView::new(client);
        view.form_mut().email.clear();
        let notice = view.update().await.unwrap_err();

        assert_eq!(notice.message, "Email is required");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_deregister_clears_session() {
        let (client, transport, session) = scripted_client();
        session.begin("abc123", &alice()).unwrap();
        session.navigate(Route::Profile);
        transport.respond(200, "alice was deleted.");

        let mut view = ProfileView::new(client);
        let notice = view.deregister().await.unwrap();

        assert_eq!(notice.message, "Profile data deleted successfully");
        assert!(!session.is_logged_in());
        assert_eq!(session.snapshot(), Session::default());
        assert_eq!(session.route(), Route::Welcome);
        assert_eq!(transport.last_request().method, Method::Delete);
    }

    #[tokio::test]
    async fn test_deregister_failure_keeps_session() {
        let (client, transport, session) = scripted_client();
        session.begin("abc123", &alice()).unwrap();
        transport.fail(TransportError::Timeout);

        let mut view = ProfileView::new(client);
        assert!(view.deregister().await.is_err());

        assert!(session.is_logged_in());
        assert_eq!(session.user(), Some(alice()));
    }

    #[tokio::test]
    async fn test_stale_user_without_token_is_not_loaded() {
        let (client, transport, session) = scripted_client();
        session.set_user(&alice()).unwrap();

        let mut view = ProfileView::new(client);

        assert_eq!(view.current_username(), "");
        assert_eq!(view.form(), &UserUpdateDetails::default());
        assert!(view.deregister().await.is_err());
        assert!(transport.requests().is_empty());
        assert_eq!(session.user(), Some(alice()));
    }

    #[tokio::test]
    async fn test_actions_need_a_loaded_user() {
        let (client, transport, _session) = scripted_client();

        let mut view = ProfileView::new(client);
        assert!(view.update().await.is_err());
        assert!(view.deregister().await.is_err());
        assert!(transport.requests().is_empty());
    }
}
