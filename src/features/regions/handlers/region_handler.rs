use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::CurrentSession;
use crate::features::auth::model::SessionUser;
use crate::features::map::models::BoundingBox;
use crate::features::regions::dtos::{
    FacilityResponseDto, ProvinceResponseDto, RegencyResponseDto, RegionSearchQuery,
    RegionSearchResponseDto, SubDistrictResponseDto,
};
use crate::features::regions::services::RegionService;
use crate::shared::types::{ApiResponse, Meta};

// ==================== Hierarchy Handlers ====================

/// List all provinces
#[utoipa::path(
    get,
    path = "/api/regions/provinces",
    responses(
        (status = 200, description = "List of provinces", body = ApiResponse<Vec<ProvinceResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("session_cookie" = []))
)]
pub async fn list_provinces(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<RegionService>>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let credentials = session.credentials().await;
    let provinces = session
        .observe(service.list_provinces(&credentials).await)
        .await?;
    let total = provinces.len();
    let dtos: Vec<ProvinceResponseDto> = provinces.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::total(total)),
    )))
}

/// List regencies in a province
#[utoipa::path(
    get,
    path = "/api/regions/provinces/{id}/regencies",
    params(
        ("id" = String, Path, description = "Province id")
    ),
    responses(
        (status = 200, description = "List of regencies in the province", body = ApiResponse<Vec<RegencyResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("session_cookie" = []))
)]
pub async fn list_regencies(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RegencyResponseDto>>>> {
    let credentials = session.credentials().await;
    let regencies = session
        .observe(service.list_regencies(&id, &credentials).await)
        .await?;
    let dtos: Vec<RegencyResponseDto> = regencies.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// List sub-districts in a regency
#[utoipa::path(
    get,
    path = "/api/regions/regencies/{id}/subdistricts",
    params(
        ("id" = String, Path, description = "Regency id")
    ),
    responses(
        (status = 200, description = "List of sub-districts in the regency", body = ApiResponse<Vec<SubDistrictResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("session_cookie" = []))
)]
pub async fn list_sub_districts(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<SubDistrictResponseDto>>>> {
    let credentials = session.credentials().await;
    let sub_districts = session
        .observe(service.list_sub_districts(&id, &credentials).await)
        .await?;
    let dtos: Vec<SubDistrictResponseDto> = sub_districts.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

// ==================== Facility Handlers ====================

/// List facilities of a regency. Records without usable coordinates or with
/// an unknown facility type are left out.
#[utoipa::path(
    get,
    path = "/api/regions/regencies/{id}/facilities",
    params(
        ("id" = String, Path, description = "Regency id")
    ),
    responses(
        (status = 200, description = "Facilities in the regency", body = ApiResponse<Vec<FacilityResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("session_cookie" = []))
)]
pub async fn list_facilities(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<FacilityResponseDto>>>> {
    let credentials = session.credentials().await;
    let facilities = session
        .observe(service.list_facilities(&id, &credentials).await)
        .await?;
    let total = facilities.len();
    let dtos: Vec<FacilityResponseDto> = facilities.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::total(total)),
    )))
}

// ==================== Search Handlers ====================

/// Regions overlapping a bounding box
#[utoipa::path(
    get,
    path = "/api/regions/search",
    params(RegionSearchQuery),
    responses(
        (status = 200, description = "Regions intersecting the bounding box", body = ApiResponse<RegionSearchResponseDto>),
        (status = 400, description = "Invalid coordinates"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("session_cookie" = []))
)]
pub async fn search_regions(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<RegionService>>,
    Query(query): Query<RegionSearchQuery>,
) -> Result<Json<ApiResponse<RegionSearchResponseDto>>> {
    let bounds = BoundingBox::from(query);
    let credentials = session.credentials().await;
    let result = session
        .observe(service.search_by_bounding_box(&bounds, &credentials).await)
        .await?;
    Ok(Json(ApiResponse::success(Some(result.into()), None, None)))
}
