use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::features::analysis::models::PriorityData;
use crate::features::reports::models::{ExportReply, ExportRequest};
use crate::features::simulation::models::SimulationResult;
use crate::modules::backend::{BackendAuth, BackendClient, BackendError, BackendResult};

pub const REPORT_TYPE_SIMULATION_RESULTS: &str = "simulation_results";

/// Report generation on the planning backend
pub struct ExportService {
    backend: Arc<BackendClient>,
}

impl ExportService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    /// Build the export body from the session's latest results
    pub fn build_request(
        simulation: Option<&SimulationResult>,
        priority: Option<&PriorityData>,
        format: &str,
    ) -> BackendResult<ExportRequest> {
        let data = match (simulation, priority) {
            (Some(result), _) => to_value(result)?,
            (None, Some(priority)) => to_value(priority)?,
            (None, None) => Value::Object(Default::default()),
        };

        Ok(ExportRequest {
            report_type: REPORT_TYPE_SIMULATION_RESULTS,
            data,
            format: format.to_string(),
        })
    }

    /// Request a report; the returned download link is always absolute
    pub async fn export(
        &self,
        request: &ExportRequest,
        auth: &BackendAuth,
    ) -> BackendResult<ExportReply> {
        let mut reply: ExportReply = self
            .backend
            .post("/reports/export", Some(request), auth)
            .await?;

        if !reply.download_url.is_empty() {
            reply.download_url = self.backend.absolute_url(&reply.download_url);
        }
        tracing::info!("Generated report {} ({} bytes)", reply.filename, reply.file_size_bytes);

        Ok(reply)
    }
}

fn to_value<T: Serialize>(data: &T) -> BackendResult<Value> {
    serde_json::to_value(data)
        .map_err(|e| BackendError::Decode(format!("Failed to encode report data: {}", e)))
}
