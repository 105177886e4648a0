use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, CurrentSession};
use crate::features::auth::model::SessionUser;
use crate::features::reports::dtos::{ExportRequestDto, ExportResponseDto};
use crate::features::reports::services::ExportService;
use crate::shared::types::ApiResponse;

/// Export the latest simulation (or priority ranking) as a report
#[utoipa::path(
    post,
    path = "/api/reports/export",
    request_body = ExportRequestDto,
    responses(
        (status = 200, description = "Report generated", body = ApiResponse<ExportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Invalid format")
    ),
    tag = "reports",
    security(("session_cookie" = []))
)]
pub async fn export_report(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<ExportService>>,
    AppJson(dto): AppJson<ExportRequestDto>,
) -> Result<Json<ApiResponse<ExportResponseDto>>> {
    dto.validate()?;

    let request = {
        let workspace = session.workspace().await;
        ExportService::build_request(
            workspace.last_simulation.as_ref(),
            workspace.last_priority.as_ref(),
            dto.format(),
        )?
    };

    let credentials = session.credentials().await;
    let reply = session
        .observe(service.export(&request, &credentials).await)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(reply.into()),
        Some("Report generated".to_string()),
        None,
    )))
}
