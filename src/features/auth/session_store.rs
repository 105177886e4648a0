//! Per-session authentication state.
//!
//! The store is the only writer of a session's auth state. Readers take a
//! [`AuthSnapshot`] or subscribe to changes; mutations happen only through
//! the lifecycle operations below (refresh, login, signup, logout, OAuth,
//! invalidate).
//!
//! Backend credentials (bearer token and cookie jar) live here too. Each
//! sign-in attempt starts from a fresh jar that is adopted only when the
//! attempt succeeds; signing out drops the jar.

use std::sync::Arc;

use tokio::sync::{watch, Mutex, RwLock};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::clients::AuthGateway;
use crate::features::auth::dtos::{LoginRequestDto, OAuthCallbackQuery, RegisterRequestDto};
use crate::features::auth::model::{AuthPayload, AuthSnapshot, SessionUser};
use crate::modules::backend::{BackendAuth, BackendError};
use crate::shared::constants::PATH_DASHBOARD;
use crate::shared::types::FieldErrors;

pub const CREDENTIALS_MISMATCH: &str = "Email and password don't match";

pub struct AuthSessionStore {
    gateway: Arc<dyn AuthGateway>,
    state: watch::Sender<AuthSnapshot>,
    credentials: RwLock<BackendAuth>,
    return_to: Mutex<Option<String>>,
    /// Web app URL the OAuth provider sends the browser back to
    callback_url: String,
}

impl AuthSessionStore {
    pub fn new(gateway: Arc<dyn AuthGateway>, callback_url: String) -> Self {
        let (state, _) = watch::channel(AuthSnapshot::unknown());
        Self {
            gateway,
            state,
            credentials: RwLock::new(BackendAuth::with_cookie_jar()),
            return_to: Mutex::new(None),
            callback_url,
        }
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    /// Credentials for backend calls made on behalf of this session
    pub async fn credentials(&self) -> BackendAuth {
        self.credentials.read().await.clone()
    }

    /// Re-derive the session from the backend's current-user endpoint.
    /// Any failure leaves the session signed out.
    pub async fn refresh(&self) -> AuthSnapshot {
        let credentials = self.credentials().await;

        let snapshot = match self.gateway.current_user(&credentials).await {
            Ok(user) => {
                tracing::debug!("Session refreshed for user {}", user.id);
                AuthSnapshot::signed_in(user)
            }
            Err(e) => {
                tracing::info!("Current user check failed, signing out session: {}", e);
                self.forget_credentials().await;
                AuthSnapshot::signed_out()
            }
        };

        self.publish(snapshot.clone());
        snapshot
    }

    /// Email/password sign-in. Invalid input never reaches the backend and a
    /// failed attempt leaves the session untouched.
    pub async fn login(&self, credentials: LoginRequestDto) -> Result<SessionUser> {
        credentials.validate()?;

        let attempt = BackendAuth::with_cookie_jar();
        let payload = self.gateway.login(&credentials, &attempt).await.map_err(|e| {
            tracing::warn!("Sign-in rejected by backend: {}", e);
            if is_credentials_error(&e) {
                AppError::Unauthorized(CREDENTIALS_MISMATCH.to_string())
            } else {
                AppError::from(e)
            }
        })?;

        self.establish(attempt, payload).await
    }

    pub async fn signup(&self, form: RegisterRequestDto) -> Result<SessionUser> {
        form.validate()?;

        let attempt = BackendAuth::with_cookie_jar();
        let payload = self.gateway.register(&form, &attempt).await.map_err(|e| {
            tracing::warn!("Sign-up rejected by backend: {}", e);
            signup_error(e)
        })?;

        self.establish(attempt, payload).await
    }

    /// Best-effort backend logout; local state is cleared regardless
    pub async fn logout(&self) {
        let credentials = std::mem::replace(
            &mut *self.credentials.write().await,
            BackendAuth::with_cookie_jar(),
        );

        if let Err(e) = self.gateway.logout(&credentials).await {
            tracing::warn!("Backend logout failed, clearing session anyway: {}", e);
        }

        self.publish(AuthSnapshot::signed_out());
    }

    /// Remember where to come back to and return the backend authorisation URL
    pub async fn begin_google_sign_in(&self, return_to: Option<&str>) -> String {
        *self.return_to.lock().await = return_to.and_then(sanitize_return_path);
        self.gateway.google_authorization_url(&self.callback_url)
    }

    /// Finish the OAuth round trip. Returns the app path to continue to.
    pub async fn complete_google_sign_in(&self, query: OAuthCallbackQuery) -> Result<String> {
        if let Some(error) = query.error.filter(|e| !e.is_empty()) {
            return Err(AppError::Unauthorized(format!("OAuth error: {}", error)));
        }

        let code = query
            .code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::BadRequest("No authorization code received".to_string()))?;

        let attempt = BackendAuth::with_cookie_jar();
        let payload = self
            .gateway
            .exchange_google_code(&code, query.state.as_deref(), &attempt)
            .await?;

        *self.credentials.write().await = attempt.and_token(payload.token);
        self.refresh().await;

        Ok(self
            .return_to
            .lock()
            .await
            .take()
            .unwrap_or_else(|| PATH_DASHBOARD.to_string()))
    }

    /// Drop the session after the backend rejected its credentials
    pub async fn invalidate(&self) {
        if self.snapshot().is_authenticated() {
            tracing::info!("Backend rejected session credentials, signing out");
        }
        self.forget_credentials().await;
        self.publish(AuthSnapshot::signed_out());
    }

    async fn establish(&self, attempt: BackendAuth, payload: AuthPayload) -> Result<SessionUser> {
        *self.credentials.write().await = attempt.and_token(payload.token);

        match payload.user {
            Some(user) => {
                self.publish(AuthSnapshot::signed_in(user.clone()));
                Ok(user)
            }
            None => self.refresh().await.user.ok_or_else(|| {
                AppError::Unauthorized("Sign-in did not establish a session".to_string())
            }),
        }
    }

    async fn forget_credentials(&self) {
        *self.credentials.write().await = BackendAuth::with_cookie_jar();
    }

    fn publish(&self, snapshot: AuthSnapshot) {
        self.state.send_replace(snapshot);
    }
}

/// Whether a backend failure means the credentials were wrong
pub fn is_credentials_error(err: &BackendError) -> bool {
    if err.is_unauthorized() {
        return true;
    }
    let message = err.to_string().to_lowercase();
    message.contains("401") || message.contains("unauthorized") || message.contains("invalid credentials")
}

/// Map backend sign-up failures onto the form's own field names
fn signup_error(err: BackendError) -> AppError {
    match err {
        BackendError::Status {
            message,
            field_errors,
            ..
        } if !field_errors.is_empty() => {
            let fields: FieldErrors = field_errors
                .into_iter()
                .fold(FieldErrors::new(), |mut acc, (field, messages)| {
                    acc.entry(form_field_name(&field))
                        .or_default()
                        .extend(messages);
                    acc
                });
            AppError::FieldValidation { message, fields }
        }
        other => AppError::from(other),
    }
}

fn form_field_name(field: &str) -> String {
    match field {
        "firstName" => "first_name".to_string(),
        "lastName" => "last_name".to_string(),
        "confirmPassword" => "confirm_password".to_string(),
        other => other.to_string(),
    }
}

/// Only same-origin absolute paths are accepted as return targets
fn sanitize_return_path(path: &str) -> Option<String> {
    let path = path.trim();
    if path.starts_with('/') && !path.starts_with("//") && !path.contains("://") {
        Some(path.to_string())
    } else {
        None
    }
}
