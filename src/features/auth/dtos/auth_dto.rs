use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::auth::model::{AuthSnapshot, AuthStatus, SessionUser};
use crate::shared::validation::EMAIL_REGEX;

/// Request DTO for email/password sign-in
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(regex(path = *EMAIL_REGEX, message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for account sign-up
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(regex(path = *EMAIL_REGEX, message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Query for starting the Google sign-in redirect
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct GoogleSignInQuery {
    /// App path to return to after the callback (defaults to the dashboard)
    #[param(example = "/dashboard")]
    pub return_to: Option<String>,
}

/// Query the OAuth provider appends to the callback URL
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Authentication state of the caller's session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthSessionDto {
    pub status: AuthStatus,
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl From<AuthSnapshot> for AuthSessionDto {
    fn from(snapshot: AuthSnapshot) -> Self {
        Self {
            status: snapshot.status,
            is_authenticated: snapshot.is_authenticated(),
            display_name: snapshot.user.as_ref().map(SessionUser::display_name),
            user: snapshot.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::field_errors;

    fn register_form() -> RegisterRequestDto {
        RegisterRequestDto {
            email: "dewi@example.com".to_string(),
            first_name: "Dewi".to_string(),
            last_name: "Lestari".to_string(),
            username: "dewi".to_string(),
            password: "s3cret-pass".to_string(),
            confirm_password: "s3cret-pass".to_string(),
        }
    }

    #[test]
    fn test_login_rejects_invalid_email() {
        let dto = LoginRequestDto {
            email: "abc".to_string(),
            password: "whatever".to_string(),
        };
        let errors = field_errors(&dto.validate().unwrap_err());
        assert_eq!(
            errors.get("email").unwrap(),
            &vec!["Please enter a valid email address".to_string()]
        );
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn test_login_requires_password() {
        let dto = LoginRequestDto {
            email: "dewi@example.com".to_string(),
            password: String::new(),
        };
        let errors = field_errors(&dto.validate().unwrap_err());
        assert!(errors.contains_key("password"));
    }

    #[test]
    fn test_register_valid_form() {
        assert!(register_form().validate().is_ok());
    }

    #[test]
    fn test_register_password_rules() {
        let mut form = register_form();
        form.password = "short".to_string();
        form.confirm_password = "different".to_string();

        let errors = field_errors(&form.validate().unwrap_err());
        assert_eq!(
            errors.get("password").unwrap(),
            &vec!["Password must be at least 8 characters".to_string()]
        );
        assert_eq!(
            errors.get("confirm_password").unwrap(),
            &vec!["Passwords do not match".to_string()]
        );
    }

    #[test]
    fn test_register_username_length() {
        let mut form = register_form();
        form.username = "x".repeat(51);
        let errors = field_errors(&form.validate().unwrap_err());
        assert!(errors.contains_key("username"));

        form.username = String::new();
        assert!(form.validate().is_err());
    }
}
