//! Form validation for book submissions.
//!
//! `validate_book_form` is pure: it never touches the store, so a failed
//! submission can be redisplayed without any partial write.

use crate::domain::book::{NewBook, Status, MAX_RATING, MAX_YEAR, MIN_RATING, MIN_YEAR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error key for a submission that could not be decoded at all.
pub const FORM_ERROR_KEY: &str = "form";
pub const UNREADABLE_FORM: &str = "The form could not be read. Please re-enter the details and try again.";

/// Raw form fields exactly as submitted by the browser.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
    pub status: String,
    pub rating: String,
    pub image_url: String,
}

impl BookForm {
    /// Prefills the edit form from a stored book.
    pub fn from_book(book: &crate::domain::book::Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year.to_string(),
            status: book.status.as_str().to_string(),
            rating: book.rating.map(|r| r.to_string()).unwrap_or_default(),
            image_url: book.image_url.clone(),
        }
    }
}

/// Field name -> message. Ordered so rendering and tests are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Errors for a body that never reached field validation.
    pub fn unreadable() -> Self {
        let mut errors = Self::new();
        errors.insert(FORM_ERROR_KEY, UNREADABLE_FORM);
        errors
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&String> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        f.write_str(&parts.join("; "))
    }
}

fn required(errors: &mut FieldErrors, field: &str, label: &str, raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(field, format!("{} is required.", label));
    }
    value.to_string()
}

fn parse_bounded(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    raw: &str,
    min: i32,
    max: i32,
) -> Option<i32> {
    match raw.trim().parse::<i32>() {
        Ok(n) if (min..=max).contains(&n) => Some(n),
        Ok(_) => {
            errors.insert(field, format!("{} must be between {} and {}.", label, min, max));
            None
        }
        Err(_) => {
            errors.insert(field, format!("{} must be a whole number.", label));
            None
        }
    }
}

/// Checks every field and returns either the cleaned record or all field errors at once.
pub fn validate_book_form(form: &BookForm) -> Result<NewBook, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = required(&mut errors, "title", "Title", &form.title);
    let author = required(&mut errors, "author", "Author", &form.author);
    let genre = required(&mut errors, "genre", "Genre", &form.genre);

    let status = match form.status.trim().parse::<Status>() {
        Ok(s) => Some(s),
        Err(_) => {
            errors.insert("status", "Choose a valid status.");
            None
        }
    };

    let year = parse_bounded(&mut errors, "year", "Year", &form.year, MIN_YEAR, MAX_YEAR);

    // Empty rating means "not rated yet", not an error.
    let rating = if form.rating.trim().is_empty() {
        None
    } else {
        parse_bounded(&mut errors, "rating", "Rating", &form.rating, MIN_RATING, MAX_RATING)
    };

    let (Some(status), Some(year)) = (status, year) else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewBook {
        title,
        author,
        genre,
        year,
        status,
        rating,
        image_url: form.image_url.trim().to_string(),
    })
}
