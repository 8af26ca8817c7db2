pub mod app;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::library_service::{HealthReport, LibraryService};
pub use domain::{Book, NewBook, Status};
pub use error::AppError;
pub use infra::config::AppConfig;
pub use storage::{BookRepository, InMemoryBookRepository, PgBookRepository};
