//! API layer - gateway to the remote movie API
//!
//! This module contains everything that talks to the movie API:
//! - `Transport` seam and its reqwest implementation
//! - `ApiClient`, the gateway that reads and writes the session store
//! - Per-endpoint response schemas
//! - The normalized `ApiError`

pub mod client;
pub mod error;
pub mod responses;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind, GENERIC_MESSAGE};
pub use responses::{LoginResponse, RegisterResponse};
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport, TransportError};
