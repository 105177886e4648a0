use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};

use crate::features::pages::models::ErrorPage;
use crate::shared::types::ApiResponse;

/// Error screen content for a status code
#[utoipa::path(
    get,
    path = "/api/pages/errors/{status}",
    params(
        ("status" = u16, Path, description = "HTTP status (401, 403, 404 or 500)")
    ),
    responses(
        (status = 200, description = "Error page descriptor", body = ApiResponse<ErrorPage>)
    ),
    tag = "pages"
)]
pub async fn get_error_page(Path(status): Path<u16>) -> Json<ApiResponse<ErrorPage>> {
    let page = StatusCode::from_u16(status)
        .map(ErrorPage::for_status)
        .unwrap_or_else(|_| ErrorPage::not_found());
    Json(ApiResponse::success(Some(page), None, None))
}

/// Unknown routes answer with the 404 page
pub async fn fallback() -> impl IntoResponse {
    let page = ErrorPage::not_found();
    let body = ApiResponse {
        success: false,
        message: Some(page.title.clone()),
        data: Some(page),
        meta: None,
        errors: None,
        field_errors: None,
    };
    (StatusCode::NOT_FOUND, Json(body))
}
