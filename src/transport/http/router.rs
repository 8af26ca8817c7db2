use crate::transport::http::handlers::{books, health, stats};
use crate::transport::http::types::{AppState, HealthResponse};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(health::healthcheck_handler),
    components(schemas(HealthResponse))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    let static_dir = ServeDir::new(&app_state.config.static_dir);

    Router::new()
        .route("/", get(books::list_books_handler))
        .route("/books", get(books::list_books_handler))
        .route(
            "/books/new",
            get(books::new_book_form_handler).post(books::create_book_handler),
        )
        .route(
            "/books/:id/edit",
            get(books::edit_book_form_handler).post(books::update_book_handler),
        )
        .route("/books/:id/delete", post(books::delete_book_handler))
        .route("/stats", get(stats::stats_handler))
        .route("/health", get(health::healthcheck_handler))
        .nest_service("/static", static_dir)
        .with_state(app_state)
}
