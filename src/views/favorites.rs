//! Favorites derivation
//!
//! The favorites view is never stored: it is recomputed from the current
//! movie list and the current favorites id list every time it is needed,
//! since either can change without the other.

use std::collections::{HashMap, HashSet};

use crate::models::{MovieRecord, UserRecord};

/// Favorite state of one movie for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Favorited,
    NotFavorited,
}

impl FavoriteState {
    /// State of `movie_id` in `user`'s favorites; no user means not favorited
    pub fn of(user: Option<&UserRecord>, movie_id: &str) -> Self {
        match user {
            Some(user) if user.has_favourite(movie_id) => FavoriteState::Favorited,
            _ => FavoriteState::NotFavorited,
        }
    }

    pub fn is_favorited(self) -> bool {
        self == FavoriteState::Favorited
    }
}

/// Movies whose id appears in `favourite_ids`.
///
/// Result order follows `favourite_ids`; ids without a matching movie are
/// skipped and repeated ids yield the movie once. The order of `movies`
/// does not matter.
pub fn favourite_movies<'a>(movies: &'a [MovieRecord], favourite_ids: &[String]) -> Vec<&'a MovieRecord> {
    let by_id: HashMap<&str, &MovieRecord> = movies.iter().map(|m| (m.id.as_str(), m)).collect();
    let mut seen = HashSet::new();

    favourite_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect()
}
