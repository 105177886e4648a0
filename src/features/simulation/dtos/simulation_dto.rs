use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::map::models::FacilityType;
use crate::features::simulation::models::SimulationRequest;
use crate::shared::constants::DEFAULT_SIMULATION_BUDGET;

/// Simulation form as submitted from the dashboard
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RunSimulationRequestDto {
    #[serde(default)]
    #[schema(example = "3273")]
    pub regency_id: String,

    /// Shown on the result; the backend does not echo it
    #[serde(default)]
    #[schema(example = "Kota Bandung")]
    pub regency_name: String,

    #[serde(default)]
    pub sub_district_ids: Vec<String>,

    /// Budget in IDR, 10 000 000 000 when omitted
    #[validate(range(exclusive_min = 0.0, message = "Budget must be greater than zero"))]
    pub budget: Option<f64>,

    /// Defaults to hospital, clinic and mobile clinic
    #[validate(length(min = 1, message = "Select at least one facility type"))]
    pub facility_types: Option<Vec<FacilityType>>,
}

/// A validated simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub regency_id: String,
    pub regency_name: String,
    pub budget: f64,
    pub request: SimulationRequest,
}

impl RunSimulationRequestDto {
    pub fn into_run(self) -> Result<SimulationRun, AppError> {
        if self.regency_id.trim().is_empty() || self.sub_district_ids.is_empty() {
            return Err(AppError::Validation(
                "Please select regency and subdistricts first".to_string(),
            ));
        }
        self.validate()?;

        let budget = self.budget.unwrap_or(DEFAULT_SIMULATION_BUDGET);
        if !budget.is_finite() {
            return Err(AppError::Validation("Budget must be a number".to_string()));
        }

        let types = self
            .facility_types
            .unwrap_or_else(|| FacilityType::SIMULATION_DEFAULTS.to_vec());

        Ok(SimulationRun {
            request: SimulationRequest::for_sub_districts(self.sub_district_ids, budget, &types),
            regency_id: self.regency_id,
            regency_name: self.regency_name,
            budget,
        })
    }
}
