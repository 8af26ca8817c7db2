//! Stand-in repository used when no `DATABASE_URL` is configured.
//!
//! The process still starts and answers `/health`; every data operation
//! reports the store as unavailable.

use crate::domain::{Book, LibraryStats, ListFilter, ListQuery, NewBook};
use crate::error::{AppError, Result};
use crate::storage::BookRepository;
use async_trait::async_trait;

#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredRepository;

fn unavailable<T>() -> Result<T> {
    Err(AppError::Unavailable("DATABASE_URL is not set".to_string()))
}

#[async_trait]
impl BookRepository for UnconfiguredRepository {
    async fn ensure_schema(&self) -> Result<()> {
        unavailable()
    }

    async fn seed_if_empty(&self) -> Result<u64> {
        unavailable()
    }

    async fn create(&self, _book: &NewBook) -> Result<Book> {
        unavailable()
    }

    async fn get(&self, _id: i64) -> Result<Option<Book>> {
        unavailable()
    }

    async fn list(&self, _query: &ListQuery, _limit: i64, _offset: i64) -> Result<Vec<Book>> {
        unavailable()
    }

    async fn count(&self, _filter: &ListFilter) -> Result<i64> {
        unavailable()
    }

    async fn update(&self, _id: i64, _book: &NewBook) -> Result<bool> {
        unavailable()
    }

    async fn delete(&self, _id: i64) -> Result<bool> {
        unavailable()
    }

    async fn stats(&self) -> Result<LibraryStats> {
        unavailable()
    }

    async fn ping(&self) -> Result<()> {
        unavailable()
    }
}
