use crate::crypto::signing::sign_message;
use crate::error::AppError;
use crate::transport::http::cookies::set_cookie;
use crate::transport::http::types::{AppState, FLASH_COOKIE, FLASH_COOKIE_MAX_AGE};
use crate::transport::http::views::ErrorPage;
use askama::Template;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};

/// Renders a template with the given status; a render failure becomes a plain 500.
pub fn render<T: Template>(status: StatusCode, page: &T) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}

/// `303 See Other` to `location`, carrying a signed one-shot notice.
pub fn redirect_with_flash(state: &AppState, location: &str, notice: &str) -> Response {
    let Some(signed) = sign_message(state.config.secret_key(), notice) else {
        tracing::warn!(notice, "flash notice could not be signed; redirecting without it");
        return Redirect::to(location).into_response();
    };
    (
        AppendHeaders([set_cookie(FLASH_COOKIE, &signed, FLASH_COOKIE_MAX_AGE)]),
        Redirect::to(location),
    )
        .into_response()
}

/// Path ids are taken as strings so a malformed id is just "not found".
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "That book does not exist.".to_string()),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("The submission was invalid: {}", errors),
            ),
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong talking to the database.".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!(error = %e, "template error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The page could not be rendered.".to_string(),
                )
            }
            AppError::Unavailable(reason) => {
                tracing::warn!(reason = %reason, "store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The book database is not available right now.".to_string(),
                )
            }
        };
        render(status, &ErrorPage::new(status.as_u16(), message))
    }
}
