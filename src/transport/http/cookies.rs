//! Minimal cookie helpers for the two cookies the app uses.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// First value of cookie `name` in the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
}

/// `Set-Cookie` header for a `Path=/`, HttpOnly, `SameSite=Lax` cookie.
///
/// `value` must already be cookie-safe (digits, base64url, hex).
pub fn set_cookie(name: &str, value: &str, max_age_secs: i64) -> (HeaderName, HeaderValue) {
    let raw = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name, value, max_age_secs
    );
    let value = HeaderValue::from_str(&raw).unwrap_or_else(|_| HeaderValue::from_static(""));
    (SET_COOKIE, value)
}

pub fn clear_cookie(name: &str) -> (HeaderName, HeaderValue) {
    set_cookie(name, "", 0)
}
