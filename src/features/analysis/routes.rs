use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::analysis::handlers;
use crate::features::analysis::services::AnalysisService;

/// Create routes for the analysis feature
pub fn routes(service: Arc<AnalysisService>) -> Router {
    Router::new()
        .route(
            "/api/analysis/regencies/{id}/heatmap",
            get(handlers::get_heatmap),
        )
        .route(
            "/api/analysis/regencies/{id}/priority-score",
            get(handlers::get_priority_score),
        )
        .route(
            "/api/analysis/regencies/{id}/summary",
            get(handlers::get_summary),
        )
        .route(
            "/api/analysis/subdistricts/{id}",
            get(handlers::get_sub_district_details),
        )
        .with_state(service)
}
