use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::map::models::{BoundingBox, Coordinate, Facility, FacilityType};
use crate::features::regions::models::{
    Province, Regency, RegionRef, RegionSearchResult, SubDistrict,
};

/// Viewport corners for the bounding-box region search
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RegionSearchQuery {
    #[param(example = -6.80)]
    pub ne_lat: f64,
    #[param(example = 107.70)]
    pub ne_lng: f64,
    #[param(example = -6.95)]
    pub sw_lat: f64,
    #[param(example = 107.55)]
    pub sw_lng: f64,
}

impl From<RegionSearchQuery> for BoundingBox {
    fn from(q: RegionSearchQuery) -> Self {
        BoundingBox::new(
            Coordinate::new(q.ne_lat, q.ne_lng),
            Coordinate::new(q.sw_lat, q.sw_lng),
        )
    }
}

/// Response DTO for province data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceResponseDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pum_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_km2: Option<f64>,
}

impl From<Province> for ProvinceResponseDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            name: province.name,
            pum_code: province.pum_code,
            area_km2: province.area_km2,
        }
    }
}

/// Response DTO for regency data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegencyResponseDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pum_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_km2: Option<f64>,
}

impl From<Regency> for RegencyResponseDto {
    fn from(regency: Regency) -> Self {
        Self {
            id: regency.id,
            name: regency.name,
            pum_code: regency.pum_code,
            province_id: regency.province_id,
            province_name: regency.province_name,
            area_km2: regency.area_km2,
        }
    }
}

/// Response DTO for sub-district data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubDistrictResponseDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regency_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poverty_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_km2: Option<f64>,
}

impl From<SubDistrict> for SubDistrictResponseDto {
    fn from(sub_district: SubDistrict) -> Self {
        Self {
            id: sub_district.id,
            name: sub_district.name,
            regency_id: sub_district.regency_id,
            population_count: sub_district.population_count,
            poverty_level: sub_district.poverty_level,
            area_km2: sub_district.area_km2,
        }
    }
}

/// A facility ready to be drawn as a map marker
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponseDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub latitude: f64,
    pub longitude: f64,
    pub regency_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_district_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_district_name: Option<String>,
    /// Marker glyph (H, C, M, Pu)
    pub icon: String,
    /// Marker colour as a hex string
    pub color: String,
}

impl From<Facility> for FacilityResponseDto {
    fn from(facility: Facility) -> Self {
        let marker = facility.facility_type.marker();
        Self {
            id: facility.id,
            name: facility.name,
            facility_type: facility.facility_type,
            latitude: facility.latitude,
            longitude: facility.longitude,
            regency_id: facility.regency_id,
            sub_district_id: facility.sub_district_id,
            sub_district_name: facility.sub_district_name,
            icon: marker.icon.to_string(),
            color: marker.color.to_string(),
        }
    }
}

/// Regions overlapping a viewport, with the regencies the map would load
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionSearchResponseDto {
    pub primary_region: Option<RegionRef>,
    pub regions: Vec<RegionRef>,
    pub candidate_regencies: Vec<String>,
}

impl From<RegionSearchResult> for RegionSearchResponseDto {
    fn from(result: RegionSearchResult) -> Self {
        let candidate_regencies = result.candidate_regencies().into_iter().collect();
        Self {
            primary_region: result.primary_region,
            regions: result.regions,
            candidate_regencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_dto_carries_marker_style() {
        let facility = Facility {
            id: "f-1".to_string(),
            name: "Pustu Sukajadi".to_string(),
            facility_type: FacilityType::SubHealthPost,
            latitude: -6.89,
            longitude: 107.59,
            regency_id: "3273".to_string(),
            regency_name: None,
            sub_district_id: None,
            sub_district_name: None,
        };

        let dto = FacilityResponseDto::from(facility);
        assert_eq!(dto.icon, "Pu");
        assert_eq!(dto.color, "#10b981");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["type"], "sub_health_post");
        assert_eq!(json["regencyId"], "3273");
        assert!(json.get("subDistrictId").is_none());
    }

    #[test]
    fn test_search_query_maps_to_bounding_box() {
        let bounds = BoundingBox::from(RegionSearchQuery {
            ne_lat: -6.8,
            ne_lng: 107.7,
            sw_lat: -6.95,
            sw_lng: 107.55,
        });
        assert_eq!(bounds.north_east, Coordinate::new(-6.8, 107.7));
        assert!(bounds.contains(&Coordinate::new(-6.9, 107.6)));
    }
}
