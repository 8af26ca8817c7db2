//! Askama page models.
//!
//! Handlers build these from service results; templates live in `templates/`.
//! Everything a template needs is precomputed here so the templates stay dumb.

use crate::app::library_service::ListPage;
use crate::domain::listing::{SortKey, PAGE_SIZES};
use crate::domain::stats::{percent, LibraryStats};
use crate::domain::validation::{BookForm, FieldErrors};
use crate::domain::{Book, Pagination, Status};
use askama::Template;

pub const APP_NAME: &str = "Bookshelf";

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct SortHeader {
    pub label: &'static str,
    pub href: String,
    pub indicator: &'static str,
}

pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
    pub status: &'static str,
    pub rating: String,
    pub added: String,
    pub cover_url: String,
}

impl From<&Book> for BookRow {
    fn from(b: &Book) -> Self {
        Self {
            id: b.id,
            title: b.title.clone(),
            author: b.author.clone(),
            genre: b.genre.clone(),
            year: b.year,
            status: b.status.as_str(),
            rating: b.rating_label(),
            added: b.created_at.format("%Y-%m-%d").to_string(),
            cover_url: b.cover_url().to_string(),
        }
    }
}

fn status_options(selected: Option<&str>, any_label: Option<&str>) -> Vec<SelectOption> {
    let mut out = Vec::with_capacity(Status::ALL.len() + 1);
    if let Some(label) = any_label {
        out.push(SelectOption {
            value: String::new(),
            label: label.to_string(),
            selected: selected.is_none(),
        });
    }
    for st in Status::ALL {
        out.push(SelectOption {
            value: st.as_str().to_string(),
            label: st.as_str().to_string(),
            selected: selected == Some(st.as_str()),
        });
    }
    out
}

#[derive(Template)]
#[template(path = "books/list.html")]
pub struct BookListPage {
    pub title: String,
    pub flash: Option<String>,
    pub books: Vec<BookRow>,
    pub search: String,
    pub sort: &'static str,
    pub dir: &'static str,
    pub status_options: Vec<SelectOption>,
    pub page_size_options: Vec<SelectOption>,
    pub headers: Vec<SortHeader>,
    pub pagination: Pagination,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub pages: Vec<PageLink>,
}

impl BookListPage {
    pub fn new(page: &ListPage, flash: Option<String>) -> Self {
        let q = &page.query;
        let p = page.pagination;

        let headers = [
            ("Title", SortKey::Title),
            ("Author", SortKey::Author),
            ("Year", SortKey::Year),
            ("Rating", SortKey::Rating),
            ("Added", SortKey::Created),
        ]
        .into_iter()
        .map(|(label, key)| SortHeader {
            label,
            href: q.sort_href(key),
            indicator: q.sort_indicator(key),
        })
        .collect();

        let page_size_options = PAGE_SIZES
            .iter()
            .map(|n| SelectOption {
                value: n.to_string(),
                label: format!("{} per page", n),
                selected: *n == q.page_size,
            })
            .collect();

        // A window of at most 7 page links around the current page.
        let last = (p.page.saturating_sub(3).max(1) + 6).min(p.total_pages);
        let first = last.saturating_sub(6).max(1);
        let pages = (first..=last)
            .map(|n| PageLink {
                number: n,
                href: q.page_href(n),
                current: n == p.page,
            })
            .collect();

        Self {
            title: APP_NAME.to_string(),
            flash,
            books: page.books.iter().map(BookRow::from).collect(),
            search: q.search_text().to_string(),
            sort: q.sort.as_str(),
            dir: q.dir.as_str(),
            status_options: status_options(q.filter.status.map(|s| s.as_str()), Some("Any status")),
            page_size_options,
            headers,
            pagination: p,
            prev_href: p.has_prev().then(|| q.page_href(p.page - 1)),
            next_href: p.has_next().then(|| q.page_href(p.page + 1)),
            pages,
        }
    }
}

#[derive(Template)]
#[template(path = "books/form.html")]
pub struct BookFormPage {
    pub title: String,
    pub flash: Option<String>,
    pub heading: String,
    pub action: String,
    pub submit_label: &'static str,
    pub form: BookForm,
    pub errors: FieldErrors,
    pub status_options: Vec<SelectOption>,
    pub cover_preview: String,
    /// Set on the edit page, enables the delete button.
    pub delete_action: Option<String>,
}

impl BookFormPage {
    pub fn new_book(form: BookForm, errors: FieldErrors) -> Self {
        Self::build(
            "Add a book".to_string(),
            "/books/new".to_string(),
            "Add book",
            form,
            errors,
            None,
        )
    }

    pub fn edit_book(id: i64, form: BookForm, errors: FieldErrors) -> Self {
        Self::build(
            format!("Edit \u{201c}{}\u{201d}", form.title.trim()),
            format!("/books/{}/edit", id),
            "Save changes",
            form,
            errors,
            Some(format!("/books/{}/delete", id)),
        )
    }

    fn build(
        heading: String,
        action: String,
        submit_label: &'static str,
        form: BookForm,
        errors: FieldErrors,
        delete_action: Option<String>,
    ) -> Self {
        let status = if form.status.is_empty() {
            Status::Unread.as_str().to_string()
        } else {
            form.status.clone()
        };
        let cover_preview = if form.image_url.trim().is_empty() {
            crate::domain::book::PLACEHOLDER_COVER.to_string()
        } else {
            form.image_url.trim().to_string()
        };
        Self {
            title: format!("{} · {}", heading, APP_NAME),
            flash: None,
            heading,
            action,
            submit_label,
            status_options: status_options(Some(status.as_str()), None),
            form,
            errors,
            cover_preview,
            delete_action,
        }
    }
}

pub struct StatRow {
    pub label: String,
    pub count: i64,
    pub percent: i64,
}

#[derive(Template)]
#[template(path = "stats.html")]
pub struct StatsPage {
    pub title: String,
    pub flash: Option<String>,
    pub total: i64,
    pub rated: i64,
    pub average: String,
    pub by_status: Vec<StatRow>,
    pub by_genre: Vec<StatRow>,
}

impl StatsPage {
    pub fn new(stats: &LibraryStats) -> Self {
        Self {
            title: format!("Stats · {}", APP_NAME),
            flash: None,
            total: stats.total,
            rated: stats.rated,
            average: stats.average_label(),
            by_status: stats
                .by_status
                .iter()
                .map(|s| StatRow {
                    label: s.status.as_str().to_string(),
                    count: s.count,
                    percent: percent(s.count, stats.total),
                })
                .collect(),
            by_genre: stats
                .by_genre
                .iter()
                .map(|g| StatRow {
                    label: g.genre.clone(),
                    count: g.count,
                    percent: percent(g.count, stats.total),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: String,
    pub flash: Option<String>,
    pub code: u16,
    pub message: String,
}

impl ErrorPage {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            title: format!("Error {} · {}", code, APP_NAME),
            flash: None,
            code,
            message: message.into(),
        }
    }
}
