use serde::{Deserialize, Serialize};

/// First-level administrative region (provinsi)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pum_code: Option<String>,
    #[serde(default)]
    pub area_km2: Option<f64>,
}
