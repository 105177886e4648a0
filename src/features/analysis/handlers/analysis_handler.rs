use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::CurrentSession;
use crate::features::analysis::dtos::{CoverageCardDto, PriorityResponseDto};
use crate::features::analysis::models::{HeatmapData, SubDistrictDetails};
use crate::features::analysis::services::AnalysisService;
use crate::features::auth::model::SessionUser;
use crate::shared::types::ApiResponse;

/// Population density and access heatmap of a regency
#[utoipa::path(
    get,
    path = "/api/analysis/regencies/{id}/heatmap",
    params(
        ("id" = String, Path, description = "Regency id")
    ),
    responses(
        (status = 200, description = "Heatmap points", body = ApiResponse<HeatmapData>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "analysis",
    security(("session_cookie" = []))
)]
pub async fn get_heatmap(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<AnalysisService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<HeatmapData>>> {
    let credentials = session.credentials().await;
    let heatmap = session
        .observe(service.heatmap(&id, &credentials).await)
        .await?;
    Ok(Json(ApiResponse::success(Some(heatmap), None, None)))
}

/// Priority ranking of a regency's sub-districts. The result is kept for
/// report export.
#[utoipa::path(
    get,
    path = "/api/analysis/regencies/{id}/priority-score",
    params(
        ("id" = String, Path, description = "Regency id")
    ),
    responses(
        (status = 200, description = "Priority ranking with the least-covered sub-districts", body = ApiResponse<PriorityResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "analysis",
    security(("session_cookie" = []))
)]
pub async fn get_priority_score(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<AnalysisService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PriorityResponseDto>>> {
    let credentials = session.credentials().await;
    let priority = session
        .observe(service.priority_score(&id, &credentials).await)
        .await?;

    session.workspace_mut().await.last_priority = Some(priority.clone());

    Ok(Json(ApiResponse::success(
        Some(priority.into()),
        None,
        None,
    )))
}

/// Coverage card of a regency
#[utoipa::path(
    get,
    path = "/api/analysis/regencies/{id}/summary",
    params(
        ("id" = String, Path, description = "Regency id")
    ),
    responses(
        (status = 200, description = "Coverage figures", body = ApiResponse<CoverageCardDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "analysis",
    security(("session_cookie" = []))
)]
pub async fn get_summary(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<AnalysisService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CoverageCardDto>>> {
    let credentials = session.credentials().await;
    let summary = session
        .observe(service.summary(&id, &credentials).await)
        .await?;
    Ok(Json(ApiResponse::success(Some(summary.into()), None, None)))
}

/// Demographics and scores of one sub-district
#[utoipa::path(
    get,
    path = "/api/analysis/subdistricts/{id}",
    params(
        ("id" = String, Path, description = "Sub-district id")
    ),
    responses(
        (status = 200, description = "Sub-district details", body = ApiResponse<SubDistrictDetails>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Sub-district not found")
    ),
    tag = "analysis",
    security(("session_cookie" = []))
)]
pub async fn get_sub_district_details(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<AnalysisService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SubDistrictDetails>>> {
    let credentials = session.credentials().await;
    let details = session
        .observe(service.sub_district_details(&id, &credentials).await)
        .await?;
    Ok(Json(ApiResponse::success(Some(details), None, None)))
}
