mod analysis_handler;

pub use analysis_handler::{
    __path_get_heatmap, __path_get_priority_score, __path_get_sub_district_details,
    __path_get_summary, get_heatmap, get_priority_score, get_sub_district_details, get_summary,
};
