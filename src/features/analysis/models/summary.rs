use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryMetrics {
    #[serde(default)]
    pub coverage_percentage: f64,
    #[serde(default)]
    pub average_distance_km: f64,
    #[serde(default)]
    pub average_travel_time_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacilityOverview {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub facility_type: String,
    #[serde(default)]
    pub rating: f64,
}

/// Regency-wide coverage figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub regency_name: String,
    #[serde(default)]
    pub summary_metrics: SummaryMetrics,
    #[serde(default)]
    pub facility_overview: Vec<FacilityOverview>,
}
