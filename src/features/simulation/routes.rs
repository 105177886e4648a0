use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::simulation::handlers;
use crate::features::simulation::services::SimulationService;

/// Create routes for the simulation feature
pub fn routes(service: Arc<SimulationService>) -> Router {
    Router::new()
        .route("/api/simulation/run", post(handlers::run_simulation))
        .route("/api/simulation/latest", get(handlers::get_latest_simulation))
        .with_state(service)
}
