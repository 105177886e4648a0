use serde_json::Value;
use thiserror::Error;

use crate::shared::types::FieldErrors;

/// Failure talking to the planning backend
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Backend request timed out: {0}")]
    Timeout(String),

    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        code: String,
        field: Option<String>,
        field_errors: FieldErrors,
    },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Build a status error from a non-2xx response body.
    ///
    /// Understands `{message|error, code, field}` bodies as well as
    /// `{detail: [{loc, msg}]}` validation bodies.
    pub fn from_response(status: u16, reason: &str, body: &Value) -> Self {
        let detail_text = body.get("detail").and_then(Value::as_str);

        let message = string_member(body, "message")
            .or_else(|| string_member(body, "error"))
            .or_else(|| detail_text.map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}: {}", status, reason));

        let code = match body.get("code") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => status.to_string(),
        };

        let field = string_member(body, "field");

        let mut field_errors = FieldErrors::new();
        if let Some(name) = &field {
            field_errors
                .entry(name.clone())
                .or_default()
                .push(message.clone());
        }
        if let Some(items) = body.get("detail").and_then(Value::as_array) {
            for item in items {
                let Some(msg) = item.get("msg").and_then(Value::as_str) else {
                    continue;
                };
                let name = item
                    .get("loc")
                    .and_then(Value::as_array)
                    .and_then(|loc| loc.iter().rev().find_map(Value::as_str))
                    .unwrap_or("form");
                field_errors
                    .entry(name.to_string())
                    .or_default()
                    .push(msg.to_string());
            }
        }

        BackendError::Status {
            status,
            message,
            code,
            field,
            field_errors,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend rejected the caller's credentials
    pub fn is_unauthorized(&self) -> bool {
        match self {
            BackendError::Status { status, code, .. } => *status == 401 || code == "401",
            _ => false,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout(err.to_string())
        } else if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

fn string_member(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
