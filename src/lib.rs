//! myFlix - A movie catalog client
//!
//! This library provides the core of the myFlix client: a locally cached
//! session, a gateway to the remote movie API, and the view models that
//! tie the two together.

pub mod api;
pub mod config;
pub mod models;
pub mod session;
pub mod storage;
pub mod views;
