use crate::core::config::AppConfig;
use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, CurrentSession};
use crate::features::auth::dtos::{
    AuthSessionDto, GoogleSignInQuery, LoginRequestDto, OAuthCallbackQuery, RegisterRequestDto,
};
use crate::features::auth::model::SessionUser;
use crate::shared::constants::PATH_LOGIN;
use crate::shared::types::ApiResponse;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;

/// Re-check the session against the backend and return the current user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<SessionUser>),
        (status = 401, description = "Not signed in")
    ),
    tag = "auth"
)]
pub async fn get_me(
    CurrentSession(session): CurrentSession,
) -> Result<Json<ApiResponse<SessionUser>>> {
    let snapshot = session.auth.refresh().await;
    let user = snapshot
        .user
        .ok_or_else(|| AppError::Unauthorized("Not signed in".to_string()))?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Current authentication state, without contacting the backend
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Authentication state of this browser session", body = ApiResponse<AuthSessionDto>)
    ),
    tag = "auth"
)]
pub async fn get_session(
    CurrentSession(session): CurrentSession,
) -> Json<ApiResponse<AuthSessionDto>> {
    let dto = AuthSessionDto::from(session.auth.snapshot());
    Json(ApiResponse::success(Some(dto), None, None))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<AuthSessionDto>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Email and password don't match"),
        (status = 422, description = "Invalid form fields")
    ),
    tag = "auth"
)]
pub async fn login(
    CurrentSession(session): CurrentSession,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthSessionDto>>> {
    session.auth.login(dto).await?;

    let dto = AuthSessionDto::from(session.auth.snapshot());
    Ok(Json(ApiResponse::success(
        Some(dto),
        Some("Signed in".to_string()),
        None,
    )))
}

/// Create an account and sign in
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AuthSessionDto>),
        (status = 400, description = "Malformed body"),
        (status = 409, description = "Account already exists"),
        (status = 422, description = "Invalid form fields")
    ),
    tag = "auth"
)]
pub async fn register(
    CurrentSession(session): CurrentSession,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSessionDto>>)> {
    session.auth.signup(dto).await?;

    let dto = AuthSessionDto::from(session.auth.snapshot());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(dto),
            Some("Account created".to_string()),
            None,
        )),
    ))
}

/// Sign out. Always succeeds locally, even if the backend call fails.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out", body = ApiResponse<AuthSessionDto>)
    ),
    tag = "auth"
)]
pub async fn logout(CurrentSession(session): CurrentSession) -> Json<ApiResponse<AuthSessionDto>> {
    session.auth.logout().await;
    session.reset().await;

    let dto = AuthSessionDto::from(session.auth.snapshot());
    Json(ApiResponse::success(
        Some(dto),
        Some("Signed out".to_string()),
        None,
    ))
}

/// Start Google sign-in: redirects the browser to the backend's OAuth endpoint
#[utoipa::path(
    get,
    path = "/api/auth/google",
    params(GoogleSignInQuery),
    responses(
        (status = 302, description = "Redirect to the OAuth provider")
    ),
    tag = "auth"
)]
pub async fn google_sign_in(
    CurrentSession(session): CurrentSession,
    Query(query): Query<GoogleSignInQuery>,
) -> Response {
    let url = session
        .auth
        .begin_google_sign_in(query.return_to.as_deref())
        .await;
    (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
}

/// OAuth callback: finishes sign-in and sends the browser back into the app
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    params(OAuthCallbackQuery),
    responses(
        (status = 303, description = "Redirect to the stored return path, or to sign-in with an error")
    ),
    tag = "auth"
)]
pub async fn oauth_callback(
    State(app): State<Arc<AppConfig>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<OAuthCallbackQuery>,
) -> Redirect {
    match session.auth.complete_google_sign_in(query).await {
        Ok(path) => Redirect::to(&format!("{}{}", app.app_url, path)),
        Err(e) => {
            tracing::warn!("Google sign-in failed: {}", e);
            let message = match e {
                AppError::Unauthorized(m) | AppError::BadRequest(m) => m,
                _ => "Google sign-in failed".to_string(),
            };
            Redirect::to(&format!(
                "{}{}?error={}",
                app.app_url,
                PATH_LOGIN,
                urlencoding::encode(&message)
            ))
        }
    }
}
