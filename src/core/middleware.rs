use crate::core::config::SessionConfig;
use crate::core::error::AppError;
use crate::features::app_sessions::{AppSession, AppSessionRegistry};
use crate::features::auth::model::AuthStatus;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

/// Browser calls carry the session cookie, so listed origins get credentials.
/// A wildcard origin cannot carry credentials and stays fully open instead.
pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any);
    }

    // Parse origins into HeaderValue
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response())
        })
    }
}

/// Attach the caller's app session to the request, issuing a session cookie
/// when the browser has none (or one the registry no longer knows)
pub async fn app_session_middleware(
    State(registry): State<Arc<AppSessionRegistry>>,
    mut req: Request,
    next: Next,
) -> Response {
    let config = registry.config();
    let cookie = session_cookie(req.headers(), &config.cookie_name);
    let (session, created) = registry.get_or_create(cookie.as_deref()).await;
    session.touch();

    req.extensions_mut().insert(session.clone());
    let mut response = next.run(req).await;

    if created {
        match HeaderValue::from_str(&set_cookie_value(config, session.id())) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to build session cookie: {}", e),
        }
    }

    response
}

/// Protected-route guard. A session that was never checked gets one
/// `refresh()` before the decision.
pub async fn auth_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    let session = req
        .extensions()
        .get::<Arc<AppSession>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("App session middleware not installed".to_string()))?;

    let mut snapshot = session.auth.snapshot();
    if snapshot.status == AuthStatus::Unknown {
        snapshot = session.auth.refresh().await;
    }

    let user = snapshot
        .user
        .filter(|_| snapshot.status == AuthStatus::Authenticated)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

fn set_cookie_value(config: &SessionConfig, id: &str) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name,
        id,
        config.idle_ttl.as_secs()
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::CurrentSession;
    use crate::features::auth::model::SessionUser;
    use crate::shared::test_helpers::{sample_user, test_registry, FakeAuthGateway};
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    fn app(registry: Arc<AppSessionRegistry>) -> Router {
        let protected = Router::new()
            .route(
                "/api/whoami",
                get(|user: SessionUser| async move { user.email }),
            )
            .route_layer(axum::middleware::from_fn(auth_middleware));

        Router::new()
            .route(
                "/api/ping",
                get(|CurrentSession(session): CurrentSession| async move {
                    session.id().to_string()
                }),
            )
            .merge(protected)
            .layer(axum::middleware::from_fn_with_state(
                registry,
                app_session_middleware,
            ))
    }

    #[test]
    fn test_session_cookie_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; cliva_session=abc-123; other=1"),
        );
        assert_eq!(
            session_cookie(&headers, "cliva_session").as_deref(),
            Some("abc-123")
        );
        assert_eq!(session_cookie(&headers, "missing"), None);
    }

    #[tokio::test]
    async fn test_new_browser_gets_a_cookie_and_keeps_its_session() {
        let registry = Arc::new(test_registry(Arc::new(FakeAuthGateway::signed_out())));
        let server = TestServer::new(app(registry.clone())).unwrap();

        let first = server.get("/api/ping").await;
        first.assert_status_ok();
        let cookie = first.cookie("cliva_session");
        assert_eq!(cookie.value(), first.text());
        assert_eq!(cookie.http_only(), Some(true));

        let second = server
            .get("/api/ping")
            .add_header("cookie", format!("cliva_session={}", cookie.value()))
            .await;
        assert_eq!(second.text(), first.text());
        assert!(second.maybe_cookie("cliva_session").is_none());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_listed_origin_gets_credentials() {
        let registry = Arc::new(test_registry(Arc::new(FakeAuthGateway::signed_out())));
        let router = app(registry).layer(cors_layer(vec!["http://localhost:3000".to_string()]));
        let server = TestServer::new(router).unwrap();

        let response = server
            .get("/api/ping")
            .add_header("origin", "http://localhost:3000")
            .await;
        assert_eq!(
            response.header("access-control-allow-origin"),
            "http://localhost:3000"
        );
        assert_eq!(response.header("access-control-allow-credentials"), "true");
    }

    #[tokio::test]
    async fn test_guard_rejects_anonymous_sessions() {
        let registry = Arc::new(test_registry(Arc::new(FakeAuthGateway::signed_out())));
        let server = TestServer::new(app(registry)).unwrap();

        let response = server.get("/api/whoami").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_guard_refreshes_unknown_sessions_once() {
        let user = sample_user();
        let gateway = Arc::new(FakeAuthGateway::signed_in(user.clone()));
        let registry = Arc::new(test_registry(gateway.clone()));
        let server = TestServer::new(app(registry)).unwrap();

        let first = server.get("/api/whoami").await;
        first.assert_status_ok();
        first.assert_text(user.email);
        let cookie = first.cookie("cliva_session");

        server
            .get("/api/whoami")
            .add_header("cookie", format!("cliva_session={}", cookie.value()))
            .await
            .assert_status_ok();

        let refreshes = gateway
            .calls()
            .into_iter()
            .filter(|c| c == "current_user")
            .count();
        assert_eq!(refreshes, 1);
    }
}
