use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::map::models::FacilityType;
use crate::shared::constants::DEFAULT_COVERAGE_RADIUS_KM;

// ==================== Backend contract ====================

/// Body of `POST /simulation/run`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRequest {
    pub geographic_level: &'static str,
    pub area_ids: Vec<String>,
    pub budget: f64,
    /// Backend labels ("Hospital", "Clinic", "Mobile clinic", "Pustu")
    pub facility_types: Vec<&'static str>,
}

impl SimulationRequest {
    pub fn for_sub_districts(area_ids: Vec<String>, budget: f64, types: &[FacilityType]) -> Self {
        Self {
            geographic_level: "subdistrict",
            area_ids,
            budget,
            facility_types: types.iter().map(FacilityType::backend_label).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationSummary {
    #[serde(default)]
    pub initial_coverage: f64,
    #[serde(default)]
    pub projected_coverage: f64,
    #[serde(default)]
    pub coverage_increase_percent: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub budget_remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendationCoordinates {
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type", default)]
    pub facility_type: String,
    #[serde(default)]
    pub subdistrict_id: String,
    #[serde(default)]
    pub location_name: String,
    pub coordinates: RecommendationCoordinates,
    #[serde(default)]
    pub estimated_cost: f64,
}

/// Raw backend answer to a simulation run
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationResponse {
    #[serde(default)]
    pub simulation_summary: SimulationSummary,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub automated_reasoning: String,
}

// ==================== Dashboard shape ====================

/// A facility placement proposed by the optimiser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OptimizedFacility {
    pub latitude: f64,
    pub longitude: f64,
    pub sub_district_id: String,
    pub sub_district_name: String,
    pub estimated_cost: f64,
    pub population_covered: f64,
    pub coverage_radius_km: f64,
    /// `None` when the backend proposed a type outside the known set
    #[serde(rename = "type")]
    pub facility_type: Option<FacilityType>,
}

/// Simulation outcome as shown on the dashboard, exported and quoted to the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimulationResult {
    pub regency_id: String,
    pub regency_name: String,
    pub total_budget: f64,
    pub budget_used: f64,
    pub facilities_recommended: usize,
    pub total_population_covered: f64,
    pub coverage_percentage: f64,
    pub optimized_facilities: Vec<OptimizedFacility>,
    /// Optimiser's explanation of the placements
    #[serde(default)]
    pub automated_reasoning: String,
    /// When the run finished, stamped on receipt of the backend answer
    pub completed_at: DateTime<Utc>,
}

impl SimulationResult {
    pub fn from_response(
        response: SimulationResponse,
        regency_id: String,
        regency_name: String,
        total_budget: f64,
    ) -> Self {
        let optimized_facilities: Vec<OptimizedFacility> = response
            .recommendations
            .into_iter()
            .map(|rec| {
                let facility_type = rec.facility_type.parse::<FacilityType>().ok();
                if facility_type.is_none() {
                    tracing::warn!(
                        "Simulation recommended unknown facility type '{}'",
                        rec.facility_type
                    );
                }
                OptimizedFacility {
                    latitude: rec.coordinates.lat,
                    longitude: rec.coordinates.lon,
                    sub_district_id: rec.subdistrict_id,
                    sub_district_name: rec.location_name,
                    estimated_cost: rec.estimated_cost,
                    population_covered: 0.0,
                    coverage_radius_km: DEFAULT_COVERAGE_RADIUS_KM,
                    facility_type,
                }
            })
            .collect();

        Self {
            regency_id,
            regency_name,
            total_budget,
            budget_used: response.simulation_summary.total_cost,
            facilities_recommended: optimized_facilities.len(),
            total_population_covered: 0.0,
            coverage_percentage: response.simulation_summary.projected_coverage,
            optimized_facilities,
            automated_reasoning: response.automated_reasoning,
            completed_at: Utc::now(),
        }
    }
}
