//! Authentication against the planning backend.
//!
//! Credentials are checked by the backend; this feature keeps the result per
//! app session in an [`AuthSessionStore`](session_store::AuthSessionStore)
//! and exposes sign-in, sign-up, sign-out and the Google OAuth round trip.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/auth/me` | Re-check the session, return the user |
//! | GET | `/api/auth/session` | Current auth state, no backend call |
//! | POST | `/api/auth/login` | Email/password sign-in |
//! | POST | `/api/auth/register` | Sign-up |
//! | POST | `/api/auth/logout` | Sign-out |
//! | GET | `/api/auth/google` | Redirect to Google sign-in |
//! | GET | `/api/auth/callback` | OAuth callback, redirect into the app |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod session_store;
