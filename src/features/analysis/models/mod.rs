mod heatmap;
mod priority;
mod sub_district_details;
mod summary;

pub use heatmap::{HeatmapData, HeatmapPoint};
pub use priority::{PriorityData, SubDistrictScore};
pub use sub_district_details::{ExistingFacility, SubDistrictDetails};
pub use summary::{AnalysisSummary, FacilityOverview, SummaryMetrics};
