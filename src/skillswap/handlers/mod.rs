pub mod health;
pub mod login;
pub mod oauth;
pub mod pages;
pub mod register;
pub mod session;
pub mod translations;

// common functions for the handlers
use crate::i18n::{locale_from_cookie_header, Locale};
use axum::{
    http::{
        header::{ACCEPT_LANGUAGE, COOKIE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use utoipa::ToSchema;

/// Passwords shorter than this are refused before reaching the identity provider.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

/// Locale for API messages: `Accept-Language`, else `default`.
pub fn request_locale(headers: &HeaderMap, default: Locale) -> Locale {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(Locale::negotiate)
        .unwrap_or(default)
}

/// Locale for pages without a prefix: stored preference, then `Accept-Language`,
/// then `default`.
pub fn preferred_locale(headers: &HeaderMap, default: Locale) -> Locale {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(locale_from_cookie_header)
        .unwrap_or_else(|| request_locale(headers, default))
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Translated, user-facing message.
    pub error: String,
    /// Message reported by the identity provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub fn error_response(status: StatusCode, error: &str, detail: Option<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            detail,
        }),
    )
        .into_response()
}

/// Treat blank and whitespace-only form fields as missing.
pub(crate) fn filled(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}
