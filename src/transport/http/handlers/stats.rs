use crate::error::AppError;
use crate::transport::http::handlers::common::render;
use crate::transport::http::types::AppState;
use crate::transport::http::views::StatsPage;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

pub async fn stats_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let stats = state.library.stats().await?;
    Ok(render(StatusCode::OK, &StatsPage::new(&stats)))
}
