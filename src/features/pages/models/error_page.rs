use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{PATH_HOME, PATH_LOGIN};

/// Content of the web app's error screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorPage {
    #[schema(example = 404)]
    pub status: u16,
    pub title: String,
    pub message: String,
    pub action_label: String,
    /// App path the primary button leads to
    pub action_path: String,
}

impl ErrorPage {
    /// Page for 401, 403, 404 or 500; any other status gets the 404 page
    pub fn for_status(status: StatusCode) -> Self {
        let (status, title, message, action_label, action_path) = match status {
            StatusCode::UNAUTHORIZED => (
                401,
                "Unauthorized",
                "Access is denied due to invalid credentials",
                "Sign In",
                PATH_LOGIN,
            ),
            StatusCode::FORBIDDEN => (
                403,
                "Forbidden",
                "You don't have permission to access this resource.",
                "Go Back",
                PATH_HOME,
            ),
            StatusCode::INTERNAL_SERVER_ERROR => (
                500,
                "Internal Server Error",
                "The server encountered an internal error or misconfiguration and was unable to complete your request.",
                "Go Back",
                PATH_HOME,
            ),
            _ => (
                404,
                "Page Not Found",
                "The page you're looking for doesn't exist or another error occurred.",
                "Go Back",
                PATH_HOME,
            ),
        };

        Self {
            status,
            title: title.to_string(),
            message: message.to_string(),
            action_label: action_label.to_string(),
            action_path: action_path.to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self::for_status(StatusCode::NOT_FOUND)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_page_leads_to_sign_in() {
        let page = ErrorPage::for_status(StatusCode::UNAUTHORIZED);
        assert_eq!(page.title, "Unauthorized");
        assert_eq!(page.action_label, "Sign In");
        assert_eq!(page.action_path, "/auth/signin");
    }

    #[test]
    fn test_other_statuses_fall_back_to_not_found() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::IM_A_TEAPOT, StatusCode::BAD_GATEWAY] {
            assert_eq!(ErrorPage::for_status(status), ErrorPage::not_found());
        }
        assert_eq!(ErrorPage::not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorPage::for_status(StatusCode::INTERNAL_SERVER_ERROR).action_path,
            "/"
        );
    }
}
