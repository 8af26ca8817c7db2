use crate::crypto::signing::verify_message;
use crate::domain::listing::ListParams;
use crate::domain::validation::{BookForm, FieldErrors};
use crate::error::AppError;
use crate::transport::http::cookies::{clear_cookie, read_cookie, set_cookie};
use crate::transport::http::handlers::common::{parse_id, redirect_with_flash, render};
use crate::transport::http::types::{
    AppState, FLASH_COOKIE, NOTICE_ADDED, NOTICE_DELETED, NOTICE_NOT_FOUND, NOTICE_UPDATED,
    PAGE_SIZE_COOKIE, PAGE_SIZE_COOKIE_MAX_AGE,
};
use crate::transport::http::views::{BookFormPage, BookListPage};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Form;

const LIST_PATH: &str = "/books";

pub async fn list_books_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let params = ListParams::from_pairs(pairs);
    let stored_page_size = read_cookie(&headers, PAGE_SIZE_COOKIE);
    let page = state
        .library
        .list(&params, stored_page_size.as_deref())
        .await?;

    let raw_flash = read_cookie(&headers, FLASH_COOKIE);
    let flash = raw_flash
        .as_deref()
        .and_then(|v| verify_message(state.config.secret_key(), v));

    let mut set_cookies = Vec::new();
    if page.query.remember_page_size {
        set_cookies.push(set_cookie(
            PAGE_SIZE_COOKIE,
            &page.query.page_size.to_string(),
            PAGE_SIZE_COOKIE_MAX_AGE,
        ));
    }
    // Clear even a tampered value so it stops being sent.
    if raw_flash.is_some_and(|v| !v.is_empty()) {
        set_cookies.push(clear_cookie(FLASH_COOKIE));
    }

    let body = render(StatusCode::OK, &BookListPage::new(&page, flash));
    Ok((AppendHeaders(set_cookies), body).into_response())
}

pub async fn new_book_form_handler() -> Response {
    render(
        StatusCode::OK,
        &BookFormPage::new_book(BookForm::default(), FieldErrors::new()),
    )
}

pub async fn create_book_handler(
    State(state): State<AppState>,
    form: Result<Form<BookForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable book form");
            return Ok(render(
                StatusCode::UNPROCESSABLE_ENTITY,
                &BookFormPage::new_book(BookForm::default(), FieldErrors::unreadable()),
            ));
        }
    };
    match state.library.create(&form).await {
        Ok(_) => Ok(redirect_with_flash(&state, LIST_PATH, NOTICE_ADDED)),
        Err(AppError::Validation(errors)) => Ok(render(
            StatusCode::UNPROCESSABLE_ENTITY,
            &BookFormPage::new_book(form, errors),
        )),
        Err(e) => Err(e),
    }
}

pub async fn edit_book_form_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(redirect_with_flash(&state, LIST_PATH, NOTICE_NOT_FOUND));
    };
    match state.library.get(id).await {
        Ok(book) => Ok(render(
            StatusCode::OK,
            &BookFormPage::edit_book(id, BookForm::from_book(&book), FieldErrors::new()),
        )),
        Err(AppError::NotFound(_)) => Ok(redirect_with_flash(&state, LIST_PATH, NOTICE_NOT_FOUND)),
        Err(e) => Err(e),
    }
}

pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    form: Result<Form<BookForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(redirect_with_flash(&state, LIST_PATH, NOTICE_NOT_FOUND));
    };
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(id, error = %rejection, "unreadable book form");
            // Redisplay what is stored, since nothing usable was submitted.
            return match state.library.get(id).await {
                Ok(book) => Ok(render(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    &BookFormPage::edit_book(id, BookForm::from_book(&book), FieldErrors::unreadable()),
                )),
                Err(AppError::NotFound(_)) => {
                    Ok(redirect_with_flash(&state, LIST_PATH, NOTICE_NOT_FOUND))
                }
                Err(e) => Err(e),
            };
        }
    };
    match state.library.update(id, &form).await {
        Ok(()) => Ok(redirect_with_flash(&state, LIST_PATH, NOTICE_UPDATED)),
        Err(AppError::Validation(errors)) => Ok(render(
            StatusCode::UNPROCESSABLE_ENTITY,
            &BookFormPage::edit_book(id, form, errors),
        )),
        Err(AppError::NotFound(_)) => Ok(redirect_with_flash(&state, LIST_PATH, NOTICE_NOT_FOUND)),
        Err(e) => Err(e),
    }
}

pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let removed = match parse_id(&raw_id) {
        Some(id) => state.library.delete(id).await?,
        None => false,
    };
    let notice = if removed { NOTICE_DELETED } else { NOTICE_NOT_FOUND };
    Ok(redirect_with_flash(&state, LIST_PATH, notice))
}
