use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Province,
    Regency,
    SubDistrict,
}

impl RegionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "province" => Some(RegionKind::Province),
            "regency" | "city" => Some(RegionKind::Regency),
            "subdistrict" | "sub_district" | "sub-district" => Some(RegionKind::SubDistrict),
            _ => None,
        }
    }
}

/// A region returned by the bounding-box search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegionRef {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RegionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl RegionRef {
    /// Parse one search entry, returning `None` for entries without an id or
    /// with a type outside the province/regency/sub-district hierarchy.
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = id_of(value.get("id")?)?;
        let kind = value
            .get("type")
            .or_else(|| value.get("region_type"))
            .and_then(Value::as_str)
            .and_then(RegionKind::parse)?;

        let parent_id = ["parent_id", "regency_id", "parentId"]
            .iter()
            .filter_map(|key| value.get(*key))
            .find_map(id_of);

        Some(Self {
            id,
            name: value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            kind,
            parent_id,
        })
    }
}

fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Regions overlapping a viewport
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegionSearchResult {
    pub primary_region: Option<RegionRef>,
    pub regions: Vec<RegionRef>,
}

impl RegionSearchResult {
    pub fn from_value(body: &Value) -> Self {
        let primary_region = body.get("primary_region").and_then(RegionRef::from_value);

        let regions = body
            .get("regions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let parsed = RegionRef::from_value(item);
                        if parsed.is_none() {
                            tracing::debug!("Skipping unrecognised region entry: {}", item);
                        }
                        parsed
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            primary_region,
            regions,
        }
    }

    /// Regencies to load facilities for: every regency returned directly
    /// (primary region included) plus the parent of every sub-district.
    pub fn candidate_regencies(&self) -> BTreeSet<String> {
        self.primary_region
            .iter()
            .chain(self.regions.iter())
            .filter_map(|region| match region.kind {
                RegionKind::Regency => Some(region.id.clone()),
                RegionKind::SubDistrict => region.parent_id.clone(),
                RegionKind::Province => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidates_include_primary_and_sub_district_parents() {
        let result = RegionSearchResult::from_value(&json!({
            "primary_region": {"id": "3273", "name": "Kota Bandung", "type": "regency", "parent_id": "32"},
            "regions": [
                {"id": "32", "name": "Jawa Barat", "type": "province"},
                {"id": "327301", "name": "Sukasari", "type": "subdistrict", "parent_id": "3273"},
                {"id": "320401", "name": "Cimenyan", "type": "sub_district", "parent_id": 3204},
                {"id": "3277", "name": "Kota Cimahi", "type": "regency"},
                {"id": "999", "name": "Desa X", "type": "village", "parent_id": "3273"}
            ]
        }));

        assert_eq!(result.regions.len(), 4);
        let candidates: Vec<_> = result.candidate_regencies().into_iter().collect();
        assert_eq!(candidates, vec!["3204", "3273", "3277"]);
    }

    #[test]
    fn test_sub_district_without_parent_yields_nothing() {
        let result = RegionSearchResult::from_value(&json!({
            "regions": [{"id": "327301", "name": "Sukasari", "type": "subdistrict"}]
        }));
        assert!(result.candidate_regencies().is_empty());
    }

    #[test]
    fn test_empty_body() {
        let result = RegionSearchResult::from_value(&json!({}));
        assert_eq!(result, RegionSearchResult::default());
        assert!(result.candidate_regencies().is_empty());
    }
}
