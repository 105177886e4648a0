use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, CurrentSession};
use crate::features::auth::model::SessionUser;
use crate::features::simulation::dtos::RunSimulationRequestDto;
use crate::features::simulation::models::SimulationResult;
use crate::features::simulation::services::SimulationService;
use crate::shared::types::ApiResponse;

/// Run a facility placement simulation over the selected sub-districts
#[utoipa::path(
    post,
    path = "/api/simulation/run",
    request_body = RunSimulationRequestDto,
    responses(
        (status = 200, description = "Simulation finished", body = ApiResponse<SimulationResult>),
        (status = 400, description = "Regency or sub-districts missing"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A simulation is already running for this session"),
        (status = 422, description = "Invalid budget or facility types")
    ),
    tag = "simulation",
    security(("session_cookie" = []))
)]
pub async fn run_simulation(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<SimulationService>>,
    AppJson(dto): AppJson<RunSimulationRequestDto>,
) -> Result<Json<ApiResponse<SimulationResult>>> {
    let run = dto.into_run()?;
    let _permit = session.begin_simulation()?;

    let credentials = session.credentials().await;
    let result = session
        .observe(service.run(run, &credentials).await)
        .await?;

    session.workspace_mut().await.last_simulation = Some(result.clone());

    Ok(Json(ApiResponse::success(
        Some(result),
        Some("Simulation completed".to_string()),
        None,
    )))
}

/// Result of the session's most recent simulation
#[utoipa::path(
    get,
    path = "/api/simulation/latest",
    responses(
        (status = 200, description = "Last simulation result", body = ApiResponse<SimulationResult>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No simulation has been run yet")
    ),
    tag = "simulation",
    security(("session_cookie" = []))
)]
pub async fn get_latest_simulation(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
) -> Result<Json<ApiResponse<SimulationResult>>> {
    let result = session
        .workspace()
        .await
        .last_simulation
        .clone()
        .ok_or_else(|| AppError::NotFound("No simulation has been run yet".to_string()))?;

    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use crate::features::simulation::routes;
    use crate::features::simulation::services::SimulationService;
    use crate::modules::backend::BackendClient;
    use crate::shared::test_helpers::{
        backend_config, protected_server, sample_user, spawn_backend, test_registry,
        FakeAuthGateway,
    };

    async fn server(delay: Duration) -> axum_test::TestServer {
        let router = Router::new().route(
            "/api/v1/simulation/run",
            post(move || async move {
                tokio::time::sleep(delay).await;
                Json(json!({
                    "simulation_summary": {"projected_coverage": 70.0, "total_cost": 3e9},
                    "recommendations": [],
                    "automated_reasoning": "Coverage is adequate"
                }))
            }),
        );
        let base = spawn_backend(router).await;
        let service = Arc::new(SimulationService::new(Arc::new(
            BackendClient::new(backend_config(&base)).unwrap(),
        )));
        let registry = Arc::new(test_registry(Arc::new(FakeAuthGateway::signed_in(
            sample_user(),
        ))));
        protected_server(routes::routes(service), registry)
    }

    fn form() -> Value {
        json!({
            "regency_id": "3273",
            "regency_name": "Kota Bandung",
            "sub_district_ids": ["327301"]
        })
    }

    #[tokio::test]
    async fn test_run_then_latest() {
        let server = server(Duration::ZERO).await;

        server
            .get("/api/simulation/latest")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let run: Value = server.post("/api/simulation/run").json(&form()).await.json();
        assert_eq!(run["data"]["budget_used"], 3e9);
        assert_eq!(run["data"]["total_budget"], 1e10);
        assert!(run["data"]["completed_at"].is_string());

        let latest: Value = server.get("/api/simulation/latest").await.json();
        assert_eq!(latest["data"]["automated_reasoning"], "Coverage is adequate");
    }

    #[tokio::test]
    async fn test_missing_selection_is_rejected() {
        let server = server(Duration::ZERO).await;

        let response = server
            .post("/api/simulation/run")
            .json(&json!({"regency_id": "3273"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Please select regency and subdistricts first");
    }

    #[tokio::test]
    async fn test_one_simulation_at_a_time() {
        let server = server(Duration::from_millis(300)).await;
        // Establish the session cookie first
        server.get("/api/simulation/latest").await;

        let (first, second) = tokio::join!(
            async { server.post("/api/simulation/run").json(&form()).await },
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                server.post("/api/simulation/run").json(&form()).await
            }
        );

        first.assert_status_ok();
        second.assert_status(StatusCode::CONFLICT);

        server
            .post("/api/simulation/run")
            .json(&form())
            .await
            .assert_status_ok();
    }
}
