//! Planning backend integration
//!
//! The backend performs all geospatial analysis, scoring and optimisation.
//! This module only knows its REST conventions: versioned URLs, JSON headers,
//! bearer tokens and session cookies, the `{data, message}` envelope and its error bodies.

mod auth;
mod client;
mod error;

pub use auth::BackendAuth;
pub use client::{BackendClient, BackendResult};
pub use error::BackendError;
