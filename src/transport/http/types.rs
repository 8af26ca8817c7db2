use crate::app::library_service::{HealthReport, LibraryService};
use crate::infra::config::AppConfig;
use crate::storage::BookRepository;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub library: LibraryService,
}

impl AppState {
    pub fn new(config: AppConfig, repo: Arc<dyn BookRepository>) -> Self {
        Self {
            config: Arc::new(config),
            library: LibraryService::new(repo),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    /// The process is up and answering requests.
    pub ok: bool,
    /// Whether `DATABASE_URL` was set at startup. The value itself is never exposed.
    pub database_url_configured: bool,
    /// Whether `SELECT 1` against the store succeeded just now.
    pub database_connected: bool,
}

impl From<HealthReport> for HealthResponse {
    fn from(r: HealthReport) -> Self {
        Self {
            ok: r.ok,
            database_url_configured: r.database_url_configured,
            database_connected: r.database_connected,
        }
    }
}

// Cookie names.
pub const FLASH_COOKIE: &str = "flash";
pub const PAGE_SIZE_COOKIE: &str = "page_size";

/// 30 days, in seconds.
pub const PAGE_SIZE_COOKIE_MAX_AGE: i64 = 30 * 24 * 60 * 60;
pub const FLASH_COOKIE_MAX_AGE: i64 = 60;

// Flash notices.
pub const NOTICE_ADDED: &str = "Book added.";
pub const NOTICE_UPDATED: &str = "Book updated.";
pub const NOTICE_DELETED: &str = "Book deleted.";
pub const NOTICE_NOT_FOUND: &str = "Book not found.";
