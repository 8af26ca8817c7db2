//! The `Book` record and its reading status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i32 = 1400;
pub const MAX_YEAR: i32 = 2100;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Shown in place of a cover when `image_url` is blank.
pub const PLACEHOLDER_COVER: &str = "/static/placeholder-cover.svg";

/// Reading progress of a book. Stored in the `status` column by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Unread,
    Reading,
    Finished,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Unread, Status::Reading, Status::Finished];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unread => "Unread",
            Status::Reading => "Reading",
            Status::Finished => "Finished",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for Status {
    type Err = UnknownStatus;

    /// Exact match only; the form and query string both use the canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A persisted book row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
    pub status: Status,
    pub rating: Option<i32>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn cover_url(&self) -> &str {
        if self.image_url.trim().is_empty() {
            PLACEHOLDER_COVER
        } else {
            &self.image_url
        }
    }

    /// Rating rendered for tables, e.g. `4/5`, or empty when unrated.
    pub fn rating_label(&self) -> String {
        self.rating
            .map(|r| format!("{}/{}", r, MAX_RATING))
            .unwrap_or_default()
    }
}

/// The editable fields of a book, already validated.
///
/// Used for both inserts and full-row updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
    pub status: Status,
    pub rating: Option<i32>,
    pub image_url: String,
}

impl NewBook {
    /// Whether `book` carries exactly these editable values.
    pub fn matches(&self, book: &Book) -> bool {
        self.title == book.title
            && self.author == book.author
            && self.genre == book.genre
            && self.year == book.year
            && self.status == book.status
            && self.rating == book.rating
            && self.image_url == book.image_url
    }
}
