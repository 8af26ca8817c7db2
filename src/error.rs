//! Application error type.

use crate::domain::FieldErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A book id that does not exist (edit/update/delete).
    #[error("book {0} not found")]
    NotFound(i64),

    /// Form input rejected by validation; carries per-field messages.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// The store cannot be reached or was never configured.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
