//! In-process `BookRepository` with the same ordering and filtering rules as
//! the PostgreSQL one.

use crate::domain::book::{Book, NewBook};
use crate::domain::listing::{ListFilter, ListQuery, SortDir, SortKey};
use crate::domain::stats::{
    sort_genre_counts, sort_status_counts, GenreCount, LibraryStats, StatusCount,
};
use crate::error::Result;
use crate::storage::seed::seed_books;
use crate::storage::BookRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<Book>,
}

#[derive(Default)]
pub struct InMemoryBookRepository {
    table: RwLock<Table>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Total order used for listings: the sort key in the requested direction,
/// then `id DESC`. Unrated books always come after rated ones.
pub fn compare_books(a: &Book, b: &Book, sort: SortKey, dir: SortDir) -> Ordering {
    let directed = |o: Ordering| match dir {
        SortDir::Asc => o,
        SortDir::Desc => o.reverse(),
    };
    let primary = match sort {
        SortKey::Title => directed(a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortKey::Author => directed(a.author.to_lowercase().cmp(&b.author.to_lowercase())),
        SortKey::Year => directed(a.year.cmp(&b.year)),
        SortKey::Created => directed(a.created_at.cmp(&b.created_at)),
        SortKey::Rating => match (a.rating, b.rating) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    primary.then_with(|| b.id.cmp(&a.id))
}

fn matching<'a>(rows: &'a [Book], filter: &'a ListFilter) -> impl Iterator<Item = &'a Book> {
    rows.iter()
        .filter(move |b| filter.matches(&b.title, &b.author, b.status))
}

fn insert(table: &mut Table, book: &NewBook, now: DateTime<Utc>) -> Book {
    table.next_id += 1;
    let row = Book {
        id: table.next_id,
        title: book.title.clone(),
        author: book.author.clone(),
        genre: book.genre.clone(),
        year: book.year,
        status: book.status,
        rating: book.rating,
        image_url: book.image_url.clone(),
        created_at: now,
        updated_at: now,
    };
    table.rows.push(row.clone());
    row
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn seed_if_empty(&self) -> Result<u64> {
        let mut table = self.table.write().await;
        if !table.rows.is_empty() {
            return Ok(0);
        }
        // Seeds share one timestamp, like rows of a single multi-row INSERT.
        let now = Utc::now();
        let seeds = seed_books();
        for book in &seeds {
            insert(&mut table, book, now);
        }
        Ok(seeds.len() as u64)
    }

    async fn create(&self, book: &NewBook) -> Result<Book> {
        let mut table = self.table.write().await;
        Ok(insert(&mut table, book, Utc::now()))
    }

    async fn get(&self, id: i64) -> Result<Option<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self, query: &ListQuery, limit: i64, offset: i64) -> Result<Vec<Book>> {
        let table = self.table.read().await;
        let mut found: Vec<Book> = matching(&table.rows, &query.filter).cloned().collect();
        found.sort_by(|a, b| compare_books(a, b, query.sort, query.dir));
        Ok(found
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: &ListFilter) -> Result<i64> {
        let table = self.table.read().await;
        Ok(matching(&table.rows, filter).count() as i64)
    }

    async fn update(&self, id: i64, book: &NewBook) -> Result<bool> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.iter_mut().find(|b| b.id == id) else {
            return Ok(false);
        };
        row.title = book.title.clone();
        row.author = book.author.clone();
        row.genre = book.genre.clone();
        row.year = book.year;
        row.status = book.status;
        row.rating = book.rating;
        row.image_url = book.image_url.clone();
        row.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|b| b.id != id);
        Ok(table.rows.len() < before)
    }

    async fn stats(&self) -> Result<LibraryStats> {
        let table = self.table.read().await;
        let ratings: Vec<i32> = table.rows.iter().filter_map(|b| b.rating).collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().map(|&r| r as f64).sum::<f64>() / ratings.len() as f64)
        };

        let mut statuses: HashMap<_, i64> = HashMap::new();
        let mut genres: HashMap<String, i64> = HashMap::new();
        for b in &table.rows {
            *statuses.entry(b.status).or_default() += 1;
            *genres.entry(b.genre.clone()).or_default() += 1;
        }

        let mut by_status: Vec<StatusCount> = statuses
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect();
        sort_status_counts(&mut by_status);

        let mut by_genre: Vec<GenreCount> = genres
            .into_iter()
            .map(|(genre, count)| GenreCount { genre, count })
            .collect();
        sort_genre_counts(&mut by_genre);

        Ok(LibraryStats {
            total: table.rows.len() as i64,
            rated: ratings.len() as i64,
            average_rating,
            by_status,
            by_genre,
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
