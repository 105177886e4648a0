//! Error screens of the web app, described by one parameterised page.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/pages/errors/{status}` | Page for 401, 403, 404 or 500 |
//!
//! The router's fallback answers unknown routes with the 404 page.

pub mod handlers;
pub mod models;
pub mod routes;
