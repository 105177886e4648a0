use serde::{Deserialize, Serialize};

/// Second-level administrative region (kabupaten/kota)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regency {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pum_code: Option<String>,
    #[serde(default)]
    pub province_id: Option<String>,
    #[serde(default)]
    pub province_name: Option<String>,
    #[serde(default)]
    pub area_km2: Option<f64>,
}
