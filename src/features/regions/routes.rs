use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionService;

/// Create routes for the regions feature
pub fn routes(service: Arc<RegionService>) -> Router {
    Router::new()
        .route("/api/regions/provinces", get(handlers::list_provinces))
        .route(
            "/api/regions/provinces/{id}/regencies",
            get(handlers::list_regencies),
        )
        .route(
            "/api/regions/regencies/{id}/subdistricts",
            get(handlers::list_sub_districts),
        )
        .route(
            "/api/regions/regencies/{id}/facilities",
            get(handlers::list_facilities),
        )
        .route("/api/regions/search", get(handlers::search_regions))
        .with_state(service)
}
