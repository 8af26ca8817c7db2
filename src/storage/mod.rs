//! Book persistence.
//!
//! `BookRepository` is the seam between the application service and the store.
//! `PgBookRepository` is the production implementation; `InMemoryBookRepository`
//! mirrors its semantics for tests and the `--in-memory` development mode.

pub mod memory;
pub mod postgres;
pub mod seed;
pub mod unconfigured;

pub use memory::InMemoryBookRepository;
pub use postgres::PgBookRepository;
pub use unconfigured::UnconfiguredRepository;

use crate::domain::{Book, LibraryStats, ListFilter, ListQuery, NewBook};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Creates the `books` table if it does not exist.
    async fn ensure_schema(&self) -> Result<()>;

    /// Inserts the curated seed set when the table is empty. Returns rows inserted.
    async fn seed_if_empty(&self) -> Result<u64>;

    async fn create(&self, book: &NewBook) -> Result<Book>;

    async fn get(&self, id: i64) -> Result<Option<Book>>;

    /// One page of books, ordered by the query's sort key then `id DESC`.
    async fn list(&self, query: &ListQuery, limit: i64, offset: i64) -> Result<Vec<Book>>;

    async fn count(&self, filter: &ListFilter) -> Result<i64>;

    /// Overwrites every editable field and refreshes `updated_at`.
    /// Returns `false` when no row has that id.
    async fn update(&self, id: i64, book: &NewBook) -> Result<bool>;

    /// Returns `false` when no row had that id; this is not an error.
    async fn delete(&self, id: i64) -> Result<bool>;

    async fn stats(&self) -> Result<LibraryStats>;

    /// Cheap round trip to the store (`SELECT 1`).
    async fn ping(&self) -> Result<()>;
}
