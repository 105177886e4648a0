use serde::{Deserialize, Serialize};

/// Third-level administrative region (kecamatan), the unit coverage is scored on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubDistrict {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pum_code: Option<String>,
    #[serde(default)]
    pub regency_id: Option<String>,
    #[serde(default)]
    pub regency_name: Option<String>,
    #[serde(default)]
    pub population_count: Option<f64>,
    #[serde(default)]
    pub poverty_level: Option<f64>,
    #[serde(default)]
    pub area_km2: Option<f64>,
}
