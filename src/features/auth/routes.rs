use crate::core::config::AppConfig;
use crate::features::auth::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Auth routes. Public: they work on the caller's app session whatever its
/// authentication state.
pub fn routes(app: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .route("/api/auth/session", get(handlers::get_session))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/google", get(handlers::google_sign_in))
        .route("/api/auth/callback", get(handlers::oauth_callback))
        .with_state(app)
}
