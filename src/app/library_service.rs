//! The library service.
//!
//! Sits between the HTTP handlers and the `BookRepository`:
//! 1.  Normalizes listing parameters, counts, clamps the page, then fetches it.
//! 2.  Validates submissions before any write.
//! 3.  Runs startup schema/seed initialization and the health probe.

use crate::domain::listing::{ListParams, ListQuery, Pagination};
use crate::domain::validation::{validate_book_form, BookForm};
use crate::domain::{Book, LibraryStats};
use crate::error::{AppError, Result};
use crate::storage::BookRepository;
use serde::Serialize;
use std::sync::Arc;

/// One rendered page of the listing.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub books: Vec<Book>,
    pub query: ListQuery,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    pub database_url_configured: bool,
    pub database_connected: bool,
}

/// Outcome of startup initialization; failures are reported, not fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Ready { seeded: u64 },
    Failed(String),
}

#[derive(Clone)]
pub struct LibraryService {
    repo: Arc<dyn BookRepository>,
}

impl LibraryService {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn BookRepository> {
        &self.repo
    }

    /// Creates the schema and optionally seeds an empty table.
    ///
    /// Errors are logged and returned as `InitOutcome::Failed`; the caller keeps
    /// starting so the problem shows up on `/health` instead of a crash loop.
    pub async fn initialize(&self, seed_on_empty: bool) -> InitOutcome {
        if let Err(e) = self.repo.ensure_schema().await {
            tracing::error!(error = %e, "schema initialization failed");
            return InitOutcome::Failed(e.to_string());
        }
        if !seed_on_empty {
            return InitOutcome::Ready { seeded: 0 };
        }
        match self.repo.seed_if_empty().await {
            Ok(seeded) => {
                if seeded > 0 {
                    tracing::info!(seeded, "seeded empty books table");
                }
                InitOutcome::Ready { seeded }
            }
            Err(e) => {
                tracing::error!(error = %e, "seeding failed");
                InitOutcome::Failed(e.to_string())
            }
        }
    }

    pub async fn list(&self, params: &ListParams, stored_page_size: Option<&str>) -> Result<ListPage> {
        let query = params.normalize(stored_page_size);
        let total = self.repo.count(&query.filter).await?;
        let pagination = Pagination::clamp(query.page, query.page_size, total);
        let books = self
            .repo
            .list(&query, pagination.limit(), pagination.offset())
            .await?;
        let query = ListQuery {
            page: pagination.page,
            ..query
        };
        Ok(ListPage {
            books,
            query,
            pagination,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Book> {
        self.repo.get(id).await?.ok_or(AppError::NotFound(id))
    }

    pub async fn create(&self, form: &BookForm) -> Result<Book> {
        let book = validate_book_form(form).map_err(AppError::Validation)?;
        let created = self.repo.create(&book).await?;
        tracing::info!(id = created.id, title = %created.title, "book created");
        Ok(created)
    }

    /// Full-record replace of every editable field.
    pub async fn update(&self, id: i64, form: &BookForm) -> Result<()> {
        let book = validate_book_form(form).map_err(AppError::Validation)?;
        if !self.repo.update(id, &book).await? {
            return Err(AppError::NotFound(id));
        }
        tracing::info!(id, "book updated");
        Ok(())
    }

    /// Returns whether a row was removed; a missing id is not an error.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let removed = self.repo.delete(id).await?;
        tracing::info!(id, removed, "book delete");
        Ok(removed)
    }

    pub async fn stats(&self) -> Result<LibraryStats> {
        self.repo.stats().await
    }

    pub async fn health(&self, database_url_configured: bool) -> HealthReport {
        let database_connected = match self.repo.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "health check: database ping failed");
                false
            }
        };
        HealthReport {
            ok: true,
            database_url_configured,
            database_connected,
        }
    }
}
