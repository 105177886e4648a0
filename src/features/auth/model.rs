use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User as reported by the backend `/auth/me` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sign-in provider ("password", "google", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default = "default_active", alias = "isActive")]
    pub is_active: bool,
    #[serde(default, alias = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

fn default_active() -> bool {
    true
}

impl SessionUser {
    /// Best available name for greeting the user
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }

        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }

        self.username
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.email.clone())
    }
}

/// Body returned by the backend login, register and OAuth callback endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    #[serde(default, alias = "expiresAt")]
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// No `/auth/me` check has run yet for this session
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Point-in-time view of a session's authentication state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthSnapshot {
    pub status: AuthStatus,
    pub user: Option<SessionUser>,
}

impl AuthSnapshot {
    pub fn unknown() -> Self {
        Self {
            status: AuthStatus::Unknown,
            user: None,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user: None,
        }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated && self.user.is_some()
    }
}
