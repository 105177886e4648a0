use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coverage-gap score of one sub-district; rank 1 is the most underserved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubDistrictScore {
    pub sub_district_id: String,
    #[serde(default)]
    pub sub_district_name: String,
    #[serde(default)]
    pub gap_factor: f64,
    #[serde(default)]
    pub efficiency_factor: f64,
    #[serde(default)]
    pub vulnerability_factor: f64,
    #[serde(default)]
    pub composite_score: f64,
    #[serde(default)]
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriorityData {
    pub regency_id: String,
    #[serde(default)]
    pub regency_name: String,
    #[serde(default)]
    pub total_sub_districts: u32,
    #[serde(default)]
    pub sub_districts: Vec<SubDistrictScore>,
}

impl PriorityData {
    /// The `limit` lowest-coverage sub-districts, by rank. Entries without a
    /// rank keep the backend's order after the ranked ones.
    pub fn least_covered(&self, limit: usize) -> Vec<SubDistrictScore> {
        let mut ranked = self.sub_districts.clone();
        ranked.sort_by_key(|s| if s.rank == 0 { u32::MAX } else { s.rank });
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_least_covered_orders_by_rank() {
        let data: PriorityData = serde_json::from_value(json!({
            "regency_id": "3273",
            "regency_name": "Kota Bandung",
            "total_sub_districts": 6,
            "sub_districts": [
                {"sub_district_id": "a", "rank": 3},
                {"sub_district_id": "b", "rank": 1},
                {"sub_district_id": "c"},
                {"sub_district_id": "d", "rank": 2},
                {"sub_district_id": "e", "rank": 5},
                {"sub_district_id": "f", "rank": 4}
            ]
        }))
        .unwrap();

        let ids: Vec<_> = data
            .least_covered(4)
            .into_iter()
            .map(|s| s.sub_district_id)
            .collect();
        assert_eq!(ids, vec!["b", "d", "a", "f"]);
    }

    #[test]
    fn test_least_covered_with_fewer_entries() {
        let data = PriorityData {
            regency_id: "1".to_string(),
            regency_name: String::new(),
            total_sub_districts: 0,
            sub_districts: vec![],
        };
        assert!(data.least_covered(4).is_empty());
    }
}
