//! Registration and login forms

use super::notice::{require, Notice, ViewResult, SHORT};
use crate::api::ApiClient;
use crate::models::{LoginDetails, RegistrationDetails};
use crate::session::Route;

/// Registration dialog
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub details: RegistrationDetails,
}

impl RegistrationForm {
    pub fn new(details: RegistrationDetails) -> Self {
        Self { details }
    }

    /// Register the account; the success notice carries the server's message
    pub async fn submit(&self, client: &ApiClient) -> ViewResult {
        let d = &self.details;
        require(
            &[
                ("Username", d.username.as_str()),
                ("Password", d.password.as_str()),
                ("Email", d.email.as_str()),
                ("Birthday", d.birthday.as_str()),
            ],
            SHORT,
        )?;

        let response = client
            .register(d)
            .await
            .map_err(|e| Notice::from_api_error(&e, SHORT))?;
        Ok(Notice::info(response.message(), SHORT))
    }
}

/// Login dialog
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub details: LoginDetails,
}

impl LoginForm {
    pub fn new(details: LoginDetails) -> Self {
        Self { details }
    }

    /// Log in and move to the movie list
    pub async fn submit(&self, client: &ApiClient) -> ViewResult {
        require(
            &[
                ("Username", self.details.username.as_str()),
                ("Password", self.details.password.as_str()),
            ],
            SHORT,
        )?;

        client
            .login(&self.details)
            .await
            .map_err(|e| Notice::from_api_error(&e, SHORT))?;
        client.session().navigate(Route::Movies);
        Ok(Notice::info("User logged in successfully", SHORT))
    }
}
