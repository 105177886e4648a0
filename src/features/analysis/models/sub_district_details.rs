use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExistingFacility {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub facility_type: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Demographics, existing facilities and scores of one sub-district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubDistrictDetails {
    pub sub_district_id: String,
    #[serde(default)]
    pub sub_district_name: String,
    #[serde(default)]
    pub regency_id: String,
    #[serde(default)]
    pub regency_name: String,
    #[serde(default)]
    pub population: f64,
    #[serde(default)]
    pub area_km2: f64,
    #[serde(default)]
    pub population_density: f64,
    #[serde(default)]
    pub poverty_rate: f64,
    #[serde(default)]
    pub existing_facilities_count: u32,
    #[serde(default)]
    pub existing_facilities: Vec<ExistingFacility>,
    #[serde(default)]
    pub gap_factor: f64,
    #[serde(default)]
    pub efficiency_factor: f64,
    #[serde(default)]
    pub vulnerability_factor: f64,
    #[serde(default)]
    pub composite_score: f64,
    #[serde(default)]
    pub rank: u32,
}
