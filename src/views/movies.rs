//! Movie list view model
//!
//! Lists all movies and lets the logged-in user toggle favorites. The
//! favorite state of a movie is always read from the user currently cached
//! in the session store, never from a flag kept here, so changes made
//! elsewhere (another window, the profile page) are picked up.

use tracing::debug;

use super::favorites::{favourite_movies, FavoriteState};
use super::notice::{Notice, ViewResult, LONG};
use crate::api::{ApiClient, ApiError};
use crate::models::MovieRecord;

/// Data shown in the movie details dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetails {
    pub title: String,
    pub description: String,
}

/// Movie list screen
pub struct MoviesListView {
    client: ApiClient,
    movies: Vec<MovieRecord>,
}

impl MoviesListView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            movies: Vec::new(),
        }
    }

    /// Fetch the movie list.
    ///
    /// On failure the previously loaded list is kept.
    pub async fn load(&mut self) -> ViewResult<()> {
        let movies = self.client.list_movies().await.map_err(notice)?;
        self.movies = movies;
        Ok(())
    }

    /// Loaded movies, in server order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Username of the logged-in user
    pub fn username(&self) -> Option<String> {
        self.client.session().live_user().map(|u| u.username)
    }

    /// Favorite state of `movie_id`, read from the session store
    pub fn favorite_state(&self, movie_id: &str) -> FavoriteState {
        FavoriteState::of(self.client.session().live_user().as_ref(), movie_id)
    }

    pub fn is_favourite_movie(&self, movie_id: &str) -> bool {
        self.favorite_state(movie_id).is_favorited()
    }

    /// Loaded movies that are favorites of the logged-in user
    pub fn favourite_movies(&self) -> Vec<&MovieRecord> {
        match self.client.session().live_user() {
            Some(user) => favourite_movies(&self.movies, &user.favourite_movies),
            None => Vec::new(),
        }
    }

    /// Add `movie_id` to favorites if it is not one, remove it otherwise.
    ///
    /// Returns the state confirmed by the server. On failure nothing
    /// changes and the error is returned as a notice.
    pub async fn toggle_favourite(&self, movie_id: &str) -> ViewResult<FavoriteState> {
        let user = self
            .client
            .session()
            .live_user()
            .ok_or_else(|| notice(ApiError::not_logged_in()))?;

        let updated = match FavoriteState::of(Some(&user), movie_id) {
            FavoriteState::Favorited => self.client.remove_favorite(&user.username, movie_id).await,
            FavoriteState::NotFavorited => self.client.add_favorite(&user.username, movie_id).await,
        }
        .map_err(notice)?;

        let state = FavoriteState::of(Some(&updated), movie_id);
        debug!(movie_id = %movie_id, ?state, "favorite toggled");
        Ok(state)
    }

    /// Title and description for the details dialog
    pub fn movie_details(&self, movie_id: &str) -> Option<MovieDetails> {
        self.movies
            .iter()
            .find(|m| m.id == movie_id)
            .map(|m| MovieDetails {
                title: m.title.clone(),
                description: m.description.clone(),
            })
    }

    /// Fetch one movie with director and genre expanded
    pub async fn fetch_movie(&self, movie_id: &str) -> ViewResult<MovieRecord> {
        self.client.get_movie(movie_id).await.map_err(notice)
    }
}

fn notice(error: ApiError) -> Notice {
    Notice::from_api_error(&error, LONG)
}
