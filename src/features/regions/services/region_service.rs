use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::features::map::loader::FacilitySource;
use crate::features::map::models::{BoundingBox, Facility};
use crate::features::regions::models::{Province, Regency, RegionSearchResult, SubDistrict};
use crate::modules::backend::{BackendAuth, BackendClient, BackendError, BackendResult};

/// Region hierarchy and facility lookups against the planning backend
pub struct RegionService {
    backend: Arc<BackendClient>,
}

impl RegionService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    // ==================== Hierarchy ====================

    pub async fn list_provinces(&self, auth: &BackendAuth) -> BackendResult<Vec<Province>> {
        let body: Value = self.backend.get("/regions/provinces", auth).await?;
        list_member(body, "provinces")
    }

    pub async fn list_regencies(
        &self,
        province_id: &str,
        auth: &BackendAuth,
    ) -> BackendResult<Vec<Regency>> {
        let endpoint = format!(
            "/regions/regencies?province_id={}",
            urlencoding::encode(province_id)
        );
        let body: Value = self.backend.get(&endpoint, auth).await?;
        list_member(body, "regencies")
    }

    pub async fn list_sub_districts(
        &self,
        regency_id: &str,
        auth: &BackendAuth,
    ) -> BackendResult<Vec<SubDistrict>> {
        let endpoint = format!(
            "/regions/subdistricts?regency_id={}",
            urlencoding::encode(regency_id)
        );
        let body: Value = self.backend.get(&endpoint, auth).await?;
        list_member(body, "sub_districts")
    }

    // ==================== Facilities ====================

    /// Facilities of a regency with unusable records dropped
    pub async fn list_facilities(
        &self,
        regency_id: &str,
        auth: &BackendAuth,
    ) -> BackendResult<Vec<Facility>> {
        let endpoint = format!(
            "/regions/facilities?regency_id={}",
            urlencoding::encode(regency_id)
        );
        let body: Value = self.backend.get(&endpoint, auth).await?;

        let records = member_array(&body, "facilities");
        let facilities: Vec<Facility> = records
            .iter()
            .filter_map(|record| Facility::from_value(record, regency_id))
            .collect();

        let dropped = records.len() - facilities.len();
        if dropped > 0 {
            tracing::debug!(
                "Dropped {} unusable facility records for regency {}",
                dropped,
                regency_id
            );
        }

        Ok(facilities)
    }

    // ==================== Search ====================

    pub async fn search_by_bounding_box(
        &self,
        bounds: &BoundingBox,
        auth: &BackendAuth,
    ) -> BackendResult<RegionSearchResult> {
        let endpoint = format!(
            "/regions/search-by-bounding-box?ne_lat={}&ne_lng={}&sw_lat={}&sw_lng={}",
            bounds.north_east.lat, bounds.north_east.lng, bounds.south_west.lat, bounds.south_west.lng
        );
        let body: Value = self.backend.get(&endpoint, auth).await?;
        Ok(RegionSearchResult::from_value(&body))
    }
}

#[async_trait]
impl FacilitySource for RegionService {
    async fn search_by_bounding_box(
        &self,
        bounds: &BoundingBox,
        auth: &BackendAuth,
    ) -> BackendResult<RegionSearchResult> {
        RegionService::search_by_bounding_box(self, bounds, auth).await
    }

    async fn regency_facilities(
        &self,
        regency_id: &str,
        auth: &BackendAuth,
    ) -> BackendResult<Vec<Facility>> {
        // The loader merges by requested regency, whatever id format the records carry
        let mut facilities = self.list_facilities(regency_id, auth).await?;
        for facility in &mut facilities {
            facility.regency_id = regency_id.to_string();
        }
        Ok(facilities)
    }
}

/// Items of `body[key]`, or of `body` itself when the backend sends a bare array
fn member_array<'a>(body: &'a Value, key: &str) -> &'a [Value] {
    body.get(key)
        .and_then(Value::as_array)
        .or_else(|| body.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn list_member<T: DeserializeOwned>(body: Value, key: &str) -> BackendResult<Vec<T>> {
    let items = Value::Array(member_array(&body, key).to_vec());
    serde_json::from_value(items)
        .map_err(|e| BackendError::Decode(format!("Invalid `{}` list: {}", key, e)))
}
