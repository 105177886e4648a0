use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HeatmapPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub population_density: f64,
    #[serde(default)]
    pub access_score: f64,
    #[serde(default)]
    pub distance_to_facility: f64,
}

/// Population density and access sampled over a regency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HeatmapData {
    pub regency_id: String,
    #[serde(default)]
    pub regency_name: String,
    #[serde(default)]
    pub total_population: f64,
    #[serde(default)]
    pub population_outside_radius: f64,
    #[serde(default)]
    pub average_distance_to_facility: f64,
    #[serde(default)]
    pub service_radius_km: f64,
    #[serde(default)]
    pub heatmap_points: Vec<HeatmapPoint>,
}
