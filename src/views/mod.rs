//! View models
//!
//! Screen logic of the client, independent of any rendering:
//! - Movie list with favorite toggling
//! - Profile editing and account deletion
//! - Registration and login forms
//! - Navigation and logout
//!
//! Views read "who is logged in" and "what is favorited" from the session
//! store, drive the API client for mutations, and report results as
//! `Notice`s.

pub mod favorites;
pub mod forms;
pub mod movies;
pub mod nav;
pub mod notice;
pub mod profile;

pub use favorites::{favourite_movies, FavoriteState};
pub use forms::{LoginForm, RegistrationForm};
pub use movies::{MovieDetails, MoviesListView};
pub use nav::AppNav;
pub use notice::{Notice, NoticeLevel, ViewResult};
pub use profile::ProfileView;
