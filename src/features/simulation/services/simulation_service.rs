use std::sync::Arc;

use crate::features::simulation::dtos::SimulationRun;
use crate::features::simulation::models::{SimulationResponse, SimulationResult};
use crate::modules::backend::{BackendAuth, BackendClient, BackendResult};

/// Facility placement optimisation on the planning backend
pub struct SimulationService {
    backend: Arc<BackendClient>,
}

impl SimulationService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn run(&self, run: SimulationRun, auth: &BackendAuth) -> BackendResult<SimulationResult> {
        tracing::info!(
            "Running simulation for regency {} over {} sub-districts",
            run.regency_id,
            run.request.area_ids.len()
        );

        let response: SimulationResponse = self
            .backend
            .post("/simulation/run", Some(&run.request), auth)
            .await?;

        Ok(SimulationResult::from_response(
            response,
            run.regency_id,
            run.regency_name,
            run.budget,
        ))
    }
}
