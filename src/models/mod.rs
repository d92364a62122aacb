//! Data models
//!
//! This module contains the data structures exchanged with the movie API
//! and cached in the local session:
//! - User and movie records as the API returns them
//! - Request payloads for registration, login and profile edits
//! - The session snapshot (token + user)

mod movie;
mod session;
mod user;

pub use movie::{Director, Genre, MovieRecord};
pub use session::Session;
pub use user::{LoginDetails, RegistrationDetails, UserRecord, UserUpdateDetails};
