use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

use crate::shared::types::FieldErrors;

lazy_static! {
    /// Loose email shape check used by the sign-in and sign-up forms
    /// - Valid: "user@example.com", "a.b@sub.domain.id"
    /// - Invalid: "abc", "user@host", "user @example.com", "@example.com"
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Flatten `validator` errors into a per-field message map.
///
/// Fields without a custom message fall back to the validator code.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
