use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use super::viewport::Coordinate;

/// Healthcare facility category. The set is closed: records carrying any
/// other type string are rejected instead of being drawn with a default icon.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FacilityType {
    Hospital,
    Clinic,
    MobileClinic,
    /// Puskesmas pembantu (pustu)
    SubHealthPost,
}

/// Icon letter and colour used for a facility marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown facility type: {0}")]
pub struct UnknownFacilityType(pub String);

impl FacilityType {
    pub const ALL: [FacilityType; 4] = [
        FacilityType::Hospital,
        FacilityType::Clinic,
        FacilityType::MobileClinic,
        FacilityType::SubHealthPost,
    ];

    /// Types selected on the simulation form by default
    pub const SIMULATION_DEFAULTS: [FacilityType; 3] = [
        FacilityType::Hospital,
        FacilityType::Clinic,
        FacilityType::MobileClinic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityType::Hospital => "hospital",
            FacilityType::Clinic => "clinic",
            FacilityType::MobileClinic => "mobile_clinic",
            FacilityType::SubHealthPost => "sub_health_post",
        }
    }

    /// Label the planning backend expects in simulation requests
    pub fn backend_label(&self) -> &'static str {
        match self {
            FacilityType::Hospital => "Hospital",
            FacilityType::Clinic => "Clinic",
            FacilityType::MobileClinic => "Mobile clinic",
            FacilityType::SubHealthPost => "Pustu",
        }
    }

    pub fn marker(&self) -> MarkerStyle {
        match self {
            FacilityType::Hospital => MarkerStyle {
                icon: "H",
                color: "#dc2626",
            },
            FacilityType::Clinic => MarkerStyle {
                icon: "C",
                color: "#f59e0b",
            },
            FacilityType::MobileClinic => MarkerStyle {
                icon: "M",
                color: "#3b82f6",
            },
            FacilityType::SubHealthPost => MarkerStyle {
                icon: "Pu",
                color: "#10b981",
            },
        }
    }
}

impl FromStr for FacilityType {
    type Err = UnknownFacilityType;

    /// Accepts the snake_case names as well as the backend labels
    /// ("Mobile clinic", "Pustu"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace([' ', '-'], "_");

        match normalized.as_str() {
            "hospital" => Ok(FacilityType::Hospital),
            "clinic" => Ok(FacilityType::Clinic),
            "mobile_clinic" => Ok(FacilityType::MobileClinic),
            "sub_health_post" | "pustu" => Ok(FacilityType::SubHealthPost),
            _ => Err(UnknownFacilityType(s.to_string())),
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical facility record shown on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Facility {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub latitude: f64,
    pub longitude: f64,
    pub regency_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_district_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_district_name: Option<String>,
}

impl Facility {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Normalise a raw backend record.
    ///
    /// Coordinates may arrive as `latitude`/`lat` and `longitude`/`lng`/`lon`,
    /// or nested under `coordinates`, as numbers or numeric strings. The
    /// sub-district link may be `sub_district_id`, `subdistrict_id` or
    /// `subDistrictId`. Returns `None` for records without an id, with an
    /// unknown type, or whose coordinates are missing, zero or non-finite.
    pub fn from_value(record: &Value, regency_id: &str) -> Option<Facility> {
        let id = id_member(record, &["id", "facility_id"])?;

        let facility_type = string_member(record, &["type", "facility_type", "category"])
            .and_then(|t| t.parse::<FacilityType>().ok())?;

        let nested = record.get("coordinates");
        let latitude = number_member(record, &["latitude", "lat"])
            .or_else(|| nested.and_then(|c| number_member(c, &["lat", "latitude"])))?;
        let longitude = number_member(record, &["longitude", "lng", "lon"])
            .or_else(|| nested.and_then(|c| number_member(c, &["lon", "lng", "longitude"])))?;

        if !Coordinate::new(latitude, longitude).is_plottable() {
            return None;
        }

        Some(Facility {
            id,
            name: string_member(record, &["name", "facility_name"]).unwrap_or_default(),
            facility_type,
            latitude,
            longitude,
            regency_id: id_member(record, &["regency_id", "regencyId"])
                .unwrap_or_else(|| regency_id.to_string()),
            regency_name: string_member(record, &["regency_name", "regencyName"]),
            sub_district_id: id_member(
                record,
                &["sub_district_id", "subdistrict_id", "subDistrictId"],
            ),
            sub_district_name: string_member(
                record,
                &["sub_district_name", "subdistrict_name", "subDistrictName"],
            ),
        })
    }
}

fn first_member<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|v| !v.is_null())
}

fn string_member(record: &Value, keys: &[&str]) -> Option<String> {
    first_member(record, keys)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Identifiers may be strings or numbers
fn id_member(record: &Value, keys: &[&str]) -> Option<String> {
    match first_member(record, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_member(record: &Value, keys: &[&str]) -> Option<f64> {
    match first_member(record, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
