use axum::{
    routing::{get, post},
    Router,
};

use crate::features::map::handlers;

/// Create routes for the map feature. All state lives in the caller's app session.
pub fn routes() -> Router {
    Router::new()
        .route("/api/map/viewport", post(handlers::record_viewport))
        .route(
            "/api/map/viewport/resolve",
            post(handlers::resolve_viewport),
        )
        .route(
            "/api/map/facilities",
            get(handlers::list_facilities).delete(handlers::clear_map),
        )
}
