use std::sync::Arc;

use crate::features::analysis::models::{
    AnalysisSummary, HeatmapData, PriorityData, SubDistrictDetails,
};
use crate::modules::backend::{BackendAuth, BackendClient, BackendResult};

/// Coverage analytics of the planning backend
pub struct AnalysisService {
    backend: Arc<BackendClient>,
}

impl AnalysisService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn heatmap(&self, regency_id: &str, auth: &BackendAuth) -> BackendResult<HeatmapData> {
        let endpoint = format!(
            "/analysis/heatmap?regency_id={}",
            urlencoding::encode(regency_id)
        );
        self.backend.get(&endpoint, auth).await
    }

    pub async fn priority_score(
        &self,
        regency_id: &str,
        auth: &BackendAuth,
    ) -> BackendResult<PriorityData> {
        let endpoint = format!(
            "/analysis/priority-score?regency_id={}",
            urlencoding::encode(regency_id)
        );
        self.backend.get(&endpoint, auth).await
    }

    pub async fn summary(
        &self,
        regency_id: &str,
        auth: &BackendAuth,
    ) -> BackendResult<AnalysisSummary> {
        let endpoint = format!(
            "/analysis/summary?regency_id={}",
            urlencoding::encode(regency_id)
        );
        self.backend.get(&endpoint, auth).await
    }

    pub async fn sub_district_details(
        &self,
        sub_district_id: &str,
        auth: &BackendAuth,
    ) -> BackendResult<SubDistrictDetails> {
        let endpoint = format!(
            "/analysis/subdistrict-details?subdistrict_id={}",
            urlencoding::encode(sub_district_id)
        );
        self.backend.get(&endpoint, auth).await
    }
}
