use axum::{routing::get, Router};

use crate::features::pages::handlers;

/// Create routes for the pages feature (public)
pub fn routes() -> Router {
    Router::new().route("/api/pages/errors/{status}", get(handlers::get_error_page))
}
