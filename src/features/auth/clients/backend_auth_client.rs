use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::features::auth::dtos::{LoginRequestDto, RegisterRequestDto};
use crate::features::auth::model::{AuthPayload, SessionUser};
use crate::modules::backend::{BackendAuth, BackendClient, BackendResult};

/// Credential lifecycle operations offered by the planning backend.
///
/// Sign-in calls receive the credentials of the attempt so that session
/// cookies the backend sets land in its jar.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn current_user(&self, auth: &BackendAuth) -> BackendResult<SessionUser>;

    async fn login(
        &self,
        credentials: &LoginRequestDto,
        auth: &BackendAuth,
    ) -> BackendResult<AuthPayload>;

    async fn register(
        &self,
        form: &RegisterRequestDto,
        auth: &BackendAuth,
    ) -> BackendResult<AuthPayload>;

    async fn logout(&self, auth: &BackendAuth) -> BackendResult<()>;

    async fn exchange_google_code(
        &self,
        code: &str,
        state: Option<&str>,
        auth: &BackendAuth,
    ) -> BackendResult<AuthPayload>;

    /// Backend URL that starts the Google OAuth flow
    fn google_authorization_url(&self, redirect_uri: &str) -> String;
}

/// Sign-up body in the shape the backend expects
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterPayload<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    username: &'a str,
    password: &'a str,
    confirm_password: &'a str,
}

impl<'a> From<&'a RegisterRequestDto> for RegisterPayload<'a> {
    fn from(form: &'a RegisterRequestDto) -> Self {
        Self {
            email: &form.email,
            first_name: &form.first_name,
            last_name: &form.last_name,
            username: &form.username,
            password: &form.password,
            confirm_password: &form.confirm_password,
        }
    }
}

/// `AuthGateway` backed by the planning backend's `/auth/*` endpoints
pub struct BackendAuthClient {
    backend: Arc<BackendClient>,
}

impl BackendAuthClient {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AuthGateway for BackendAuthClient {
    async fn current_user(&self, auth: &BackendAuth) -> BackendResult<SessionUser> {
        self.backend.get("/auth/me", auth).await
    }

    async fn login(
        &self,
        credentials: &LoginRequestDto,
        auth: &BackendAuth,
    ) -> BackendResult<AuthPayload> {
        self.backend
            .post("/auth/login", Some(credentials), auth)
            .await
    }

    async fn register(
        &self,
        form: &RegisterRequestDto,
        auth: &BackendAuth,
    ) -> BackendResult<AuthPayload> {
        let payload = RegisterPayload::from(form);
        self.backend
            .post("/auth/register", Some(&payload), auth)
            .await
    }

    async fn logout(&self, auth: &BackendAuth) -> BackendResult<()> {
        self.backend
            .post::<(), Value>("/auth/logout", None, auth)
            .await
            .map(|_| ())
    }

    async fn exchange_google_code(
        &self,
        code: &str,
        state: Option<&str>,
        auth: &BackendAuth,
    ) -> BackendResult<AuthPayload> {
        let body = json!({ "code": code, "state": state });
        self.backend
            .post("/auth/google/callback", Some(&body), auth)
            .await
    }

    fn google_authorization_url(&self, redirect_uri: &str) -> String {
        format!(
            "{}?redirect_uri={}",
            self.backend.api_url("/auth/google"),
            urlencoding::encode(redirect_uri)
        )
    }
}
