use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ExportService;

/// Create routes for the reports feature
pub fn routes(service: Arc<ExportService>) -> Router {
    Router::new()
        .route("/api/reports/export", post(handlers::export_report))
        .with_state(service)
}
