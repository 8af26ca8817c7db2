//! Aggregate figures for the stats page.

use crate::domain::book::Status;
use serde::Serialize;

/// Shown instead of an average when no book has a rating.
pub const NO_AVERAGE: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LibraryStats {
    pub total: i64,
    pub rated: i64,
    /// Mean over rated books only; `None` when nothing is rated.
    pub average_rating: Option<f64>,
    /// Ordered by status name.
    pub by_status: Vec<StatusCount>,
    /// Ordered by count descending, then genre name.
    pub by_genre: Vec<GenreCount>,
}

impl LibraryStats {
    pub fn average_label(&self) -> String {
        format_average(self.average_rating)
    }
}

/// Share of `total` as a rounded percentage, used for the bar widths.
pub fn percent(count: i64, total: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        ((count as f64 / total as f64) * 100.0).round() as i64
    }
}

pub fn format_average(avg: Option<f64>) -> String {
    match avg {
        Some(v) => format!("{:.1}", v),
        None => NO_AVERAGE.to_string(),
    }
}

/// Sorts status groups by their name, the order the stats page lists them in.
pub fn sort_status_counts(counts: &mut [StatusCount]) {
    counts.sort_by(|a, b| a.status.as_str().cmp(b.status.as_str()));
}

pub fn sort_genre_counts(counts: &mut [GenreCount]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
}
