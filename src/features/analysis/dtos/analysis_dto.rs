use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::analysis::models::{
    AnalysisSummary, FacilityOverview, PriorityData, SubDistrictScore,
};
use crate::shared::constants::LEAST_COVERED_LIMIT;

/// Regency summary formatted for the dashboard's coverage card
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoverageCardDto {
    pub regency_name: String,
    #[schema(example = 72)]
    pub coverage_percent: i64,
    #[schema(example = "3.4KM")]
    pub average_distance: String,
    #[schema(example = "45MIN")]
    pub average_time: String,
    pub facility_overview: Vec<FacilityOverview>,
}

impl From<AnalysisSummary> for CoverageCardDto {
    fn from(summary: AnalysisSummary) -> Self {
        let metrics = summary.summary_metrics;
        Self {
            regency_name: summary.regency_name,
            coverage_percent: metrics.coverage_percentage.round() as i64,
            average_distance: format!("{:.1}KM", metrics.average_distance_km),
            average_time: format!("{:.0}MIN", metrics.average_travel_time_hours * 60.0),
            facility_overview: summary.facility_overview,
        }
    }
}

/// Full priority ranking plus the least-covered sub-districts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriorityResponseDto {
    #[serde(flatten)]
    pub priority: PriorityData,
    pub least_covered: Vec<SubDistrictScore>,
}

impl From<PriorityData> for PriorityResponseDto {
    fn from(priority: PriorityData) -> Self {
        Self {
            least_covered: priority.least_covered(LEAST_COVERED_LIMIT),
            priority,
        }
    }
}
