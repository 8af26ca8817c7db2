//! Domain types and pure logic for the book collection.

pub mod book;
pub mod listing;
pub mod stats;
pub mod validation;

pub use book::{Book, NewBook, Status};
pub use listing::{ListFilter, ListParams, ListQuery, Pagination, SortDir, SortKey};
pub use stats::LibraryStats;
pub use validation::{validate_book_form, BookForm, FieldErrors};
