//! HTTP client for the planning backend.
//!
//! Every request carries JSON content negotiation headers plus the calling
//! session's bearer token and backend cookies. Cookies set by any response
//! are kept in that session's jar. Successful bodies are unwrapped from
//! the optional `{data, message}` envelope before being decoded.

use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::auth::BackendAuth;
use super::error::BackendError;
use crate::core::config::BackendConfig;

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Shared client for the planning backend REST API
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("cliva-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn api_url(&self, endpoint: &str) -> String {
        self.config.api_url(endpoint)
    }

    /// Resolve a possibly relative URL returned by the backend (e.g. a download link)
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.config.base_url(), url.trim_start_matches('/'))
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        auth: &BackendAuth,
    ) -> BackendResult<T> {
        let request = self.request(Method::GET, endpoint, auth);
        self.execute(endpoint, request, auth).await
    }

    pub async fn post<B, T>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        auth: &BackendAuth,
    ) -> BackendResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.request(Method::POST, endpoint, auth);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(endpoint, request, auth).await
    }

    fn request(&self, method: Method, endpoint: &str, auth: &BackendAuth) -> RequestBuilder {
        let url = self.api_url(endpoint);
        tracing::debug!("Backend {} {}", method, url);

        let cookie = Url::parse(&url)
            .ok()
            .and_then(|parsed| auth.cookie_header(&parsed));

        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(token) = auth.token() {
            request = request.bearer_auth(token);
        }
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
        auth: &BackendAuth,
    ) -> BackendResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Backend request to {} failed: {}", endpoint, e);
            BackendError::from(e)
        })?;

        auth.store_cookies(response.headers(), response.url());

        let status = response.status();
        let text = response.text().await.map_err(BackendError::from)?;

        // Unparseable or empty bodies are treated as an empty object
        let body: Value = if text.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::Object(Default::default()))
        };

        if !status.is_success() {
            let err = BackendError::from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                &body,
            );
            tracing::warn!("Backend {} returned HTTP {}: {}", endpoint, status, err);
            return Err(err);
        }

        serde_json::from_value(unwrap_envelope(body)).map_err(|e| {
            tracing::error!("Failed to decode backend response from {}: {}", endpoint, e);
            BackendError::Decode(e.to_string())
        })
    }
}

/// Take the `data` member of an envelope when present, else the body itself
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(_) | None => Value::Object(map),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{backend_config, spawn_backend};
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Echo {
        authorization: Option<String>,
        accept: Option<String>,
    }

    async fn echo_headers(headers: HeaderMap) -> Json<Value> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(json!({
            "data": {
                "authorization": header("authorization"),
                "accept": header("accept"),
            },
            "message": "ok"
        }))
    }

    #[test]
    fn test_unwrap_envelope() {
        assert_eq!(
            unwrap_envelope(json!({"data": {"id": 1}, "message": "ok"})),
            json!({"id": 1})
        );
        assert_eq!(unwrap_envelope(json!({"id": 1})), json!({"id": 1}));
        assert_eq!(
            unwrap_envelope(json!({"data": null, "id": 2})),
            json!({"id": 2})
        );
        assert_eq!(unwrap_envelope(json!([1, 2])), json!([1, 2]));
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_and_unwraps_envelope() {
        let base = spawn_backend(Router::new().route("/api/v1/echo", get(echo_headers))).await;
        let client = BackendClient::new(backend_config(&base)).unwrap();

        let echo: Echo = client
            .get("/echo", &BackendAuth::bearer("tok-123"))
            .await
            .unwrap();
        assert_eq!(echo.authorization.as_deref(), Some("Bearer tok-123"));
        assert_eq!(echo.accept.as_deref(), Some("application/json"));

        let anonymous: Echo = client.get("echo", &BackendAuth::anonymous()).await.unwrap();
        assert_eq!(anonymous.authorization, None);
    }

    #[tokio::test]
    async fn test_session_cookies_are_kept_and_sent_back() {
        let router = Router::new()
            .route(
                "/api/v1/auth/login",
                post(|| async {
                    (
                        [("set-cookie", "access_token=abc; Path=/; HttpOnly")],
                        Json(json!({"user": {"id": "u-1"}})),
                    )
                }),
            )
            .route(
                "/api/v1/regions/provinces",
                get(|headers: HeaderMap| async move {
                    let cookie = headers
                        .get("cookie")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({ "cookie": cookie }))
                }),
            );
        let base = spawn_backend(router).await;
        let client = BackendClient::new(backend_config(&base)).unwrap();
        let auth = BackendAuth::with_cookie_jar();

        let _: Value = client
            .post::<Value, _>("/auth/login", None, &auth)
            .await
            .unwrap();
        let echoed: Value = client.get("/regions/provinces", &auth).await.unwrap();
        assert_eq!(echoed["cookie"], "access_token=abc");

        let other: Value = client
            .get("/regions/provinces", &BackendAuth::with_cookie_jar())
            .await
            .unwrap();
        assert_eq!(other["cookie"], "");
    }

    #[tokio::test]
    async fn test_error_status_is_mapped() {
        let router = Router::new().route(
            "/api/v1/auth/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"message": "Invalid credentials"})),
                )
            }),
        );
        let base = spawn_backend(router).await;
        let client = BackendClient::new(backend_config(&base)).unwrap();

        let err = client
            .post::<_, Value>(
                "/auth/login",
                Some(&json!({"email": "a@b.co"})),
                &BackendAuth::anonymous(),
            )
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Nothing listens on port 9 of localhost in the test environment
        let client = BackendClient::new(backend_config("http://127.0.0.1:9")).unwrap();
        let err = client
            .get::<Value>("/regions/provinces", &BackendAuth::anonymous())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::Transport(_) | BackendError::Timeout(_)
        ));
    }

    #[test]
    fn test_absolute_url() {
        let client = BackendClient::new(backend_config("http://api.local:8000/")).unwrap();
        assert_eq!(
            client.absolute_url("/files/report.pdf"),
            "http://api.local:8000/files/report.pdf"
        );
        assert_eq!(
            client.absolute_url("https://cdn.example.com/r.pdf"),
            "https://cdn.example.com/r.pdf"
        );
    }
}
