use std::collections::BTreeSet;

use axum::{extract::Query, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, CurrentSession};
use crate::features::app_sessions::AppSession;
use crate::features::auth::model::SessionUser;
use crate::features::map::dtos::{
    FacilityFilterQuery, MapStateDto, ResolveResponseDto, ViewportRequestDto,
};
use crate::features::map::models::{BoundingBox, FacilityType};
use crate::shared::types::{ApiResponse, Meta};

async fn map_state(session: &AppSession, enabled: Option<&BTreeSet<FacilityType>>) -> MapStateDto {
    let map = &session.map;
    MapStateDto {
        status: map.status(),
        bounds: map.bounds().await,
        loaded_regions: map.loaded_regions().await.into_iter().collect(),
        facilities: map
            .facilities(enabled)
            .await
            .into_iter()
            .map(Into::into)
            .collect(),
    }
}

/// Record a map move. Facilities load once the map has settled.
#[utoipa::path(
    post,
    path = "/api/map/viewport",
    request_body = ViewportRequestDto,
    responses(
        (status = 202, description = "Viewport recorded, loading scheduled", body = ApiResponse<MapStateDto>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "map",
    security(("session_cookie" = []))
)]
pub async fn record_viewport(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    AppJson(dto): AppJson<ViewportRequestDto>,
) -> (StatusCode, Json<ApiResponse<MapStateDto>>) {
    session.map.record_viewport(BoundingBox::from(dto)).await;

    let state = map_state(&session, None).await;
    (
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(Some(state), None, None)),
    )
}

/// Load facilities for a viewport right away
#[utoipa::path(
    post,
    path = "/api/map/viewport/resolve",
    request_body = ViewportRequestDto,
    responses(
        (status = 200, description = "Resolution pass finished", body = ApiResponse<ResolveResponseDto>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "map",
    security(("session_cookie" = []))
)]
pub async fn resolve_viewport(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    AppJson(dto): AppJson<ViewportRequestDto>,
) -> Json<ApiResponse<ResolveResponseDto>> {
    let outcome = session.map.resolve_now(BoundingBox::from(dto)).await;

    let response = ResolveResponseDto {
        outcome: outcome.into(),
        state: map_state(&session, None).await,
    };
    Json(ApiResponse::success(Some(response), None, None))
}

/// Current markers, optionally limited to the enabled facility types
#[utoipa::path(
    get,
    path = "/api/map/facilities",
    params(FacilityFilterQuery),
    responses(
        (status = 200, description = "Markers and loading state", body = ApiResponse<MapStateDto>),
        (status = 400, description = "Unknown facility type"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "map",
    security(("session_cookie" = []))
)]
pub async fn list_facilities(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    Query(query): Query<FacilityFilterQuery>,
) -> Result<Json<ApiResponse<MapStateDto>>> {
    let enabled = query.enabled_types()?;

    let state = map_state(&session, enabled.as_ref()).await;
    let total = state.facilities.len();
    Ok(Json(ApiResponse::success(
        Some(state),
        None,
        Some(Meta::total(total)),
    )))
}

/// Clear Map: drop all markers and loaded regencies
#[utoipa::path(
    delete,
    path = "/api/map/facilities",
    responses(
        (status = 200, description = "Map cleared", body = ApiResponse<MapStateDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "map",
    security(("session_cookie" = []))
)]
pub async fn clear_map(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
) -> Json<ApiResponse<MapStateDto>> {
    session.map.clear().await;

    let state = map_state(&session, None).await;
    Json(ApiResponse::success(
        Some(state),
        Some("Map cleared".to_string()),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::features::map::models::FacilityType;
    use crate::features::map::routes;
    use crate::shared::test_helpers::{
        facility_at, protected_server, region, sample_user, test_registry_with, FakeAuthGateway,
        FakeFacilitySource,
    };

    fn viewport() -> Value {
        json!({
            "north_east": {"lat": -6.80, "lng": 107.70},
            "south_west": {"lat": -6.95, "lng": 107.55}
        })
    }

    fn seeded_source() -> Arc<FakeFacilitySource> {
        let source = Arc::new(FakeFacilitySource::default());
        source.set_regions(vec![region("R1", "regency", None)]);
        let mut clinic = facility_at("c", "R1", -6.91, 107.61);
        clinic.facility_type = FacilityType::Clinic;
        source.set_facilities(
            "R1",
            vec![
                facility_at("h", "R1", -6.90, 107.60),
                clinic,
                facility_at("far", "R1", -7.50, 107.60),
            ],
        );
        source
    }

    fn server(gateway: FakeAuthGateway, source: Arc<FakeFacilitySource>) -> axum_test::TestServer {
        let registry = Arc::new(test_registry_with(Arc::new(gateway), source));
        protected_server(routes::routes(), registry)
    }

    #[tokio::test]
    async fn test_map_requires_sign_in() {
        let server = server(FakeAuthGateway::signed_out(), seeded_source());
        server
            .get("/api/map/facilities")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_resolve_filter_and_clear() {
        let source = seeded_source();
        let server = server(FakeAuthGateway::signed_in(sample_user()), source.clone());

        let resolved: Value = server
            .post("/api/map/viewport/resolve")
            .json(&viewport())
            .await
            .json();
        assert_eq!(resolved["data"]["outcome"], "applied");
        assert_eq!(resolved["data"]["added"], 2);
        assert_eq!(resolved["data"]["state"]["status"]["state"], "ready");
        assert_eq!(resolved["data"]["state"]["loaded_regions"], json!(["R1"]));

        let clinics: Value = server
            .get("/api/map/facilities")
            .add_query_param("types", "clinic")
            .await
            .json();
        assert_eq!(clinics["meta"]["total"], 1);
        assert_eq!(clinics["data"]["facilities"][0]["icon"], "C");

        server
            .get("/api/map/facilities")
            .add_query_param("types", "pharmacy")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server.delete("/api/map/facilities").await.assert_status_ok();
        let cleared: Value = server.get("/api/map/facilities").await.json();
        assert_eq!(cleared["meta"]["total"], 0);
        assert_eq!(cleared["data"]["status"]["state"], "idle");

        server.post("/api/map/viewport/resolve").json(&viewport()).await;
        assert_eq!(source.facility_fetches("R1"), 2);
    }

    #[tokio::test]
    async fn test_record_viewport_is_accepted() {
        let server = server(FakeAuthGateway::signed_in(sample_user()), seeded_source());

        let response = server.post("/api/map/viewport").json(&viewport()).await;
        response.assert_status(StatusCode::ACCEPTED);
        let body: Value = response.json();
        assert_eq!(body["data"]["bounds"]["north_east"]["lat"], -6.80);
    }
}
