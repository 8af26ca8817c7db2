//! PostgreSQL-backed `BookRepository`.

use crate::domain::book::{Book, NewBook, Status};
use crate::domain::listing::{ListFilter, ListQuery, SortDir, SortKey};
use crate::domain::stats::{
    sort_genre_counts, sort_status_counts, GenreCount, LibraryStats, StatusCount,
};
use crate::error::Result;
use crate::infra::config::AppConfig;
use crate::storage::seed::seed_books;
use crate::storage::BookRepository;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;

const CREATE_BOOKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS books (
    id          BIGSERIAL PRIMARY KEY,
    title       TEXT NOT NULL,
    author      TEXT NOT NULL,
    genre       TEXT NOT NULL,
    year        INTEGER NOT NULL CHECK (year BETWEEN 1400 AND 2100),
    status      TEXT NOT NULL CHECK (status IN ('Unread', 'Reading', 'Finished')),
    rating      INTEGER NULL CHECK (rating BETWEEN 1 AND 5),
    image_url   TEXT NOT NULL DEFAULT '',
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const BOOK_COLUMNS: &str =
    "id, title, author, genre, year, status, rating, image_url, created_at, updated_at";

pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool that connects on first use, so a down database does not
    /// stop the process from starting.
    pub fn connect_lazy(config: &AppConfig) -> Result<Self> {
        let url = config.database_url().ok_or_else(|| {
            crate::error::AppError::Unavailable("DATABASE_URL is not set".to_string())
        })?;
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn book_from_row(row: &PgRow) -> std::result::Result<Book, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<Status>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        genre: row.try_get("genre")?,
        year: row.try_get("year")?,
        status,
        rating: row.try_get("rating")?,
        image_url: row.try_get("image_url")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Escapes LIKE wildcards so the search term matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ListFilter) {
    qb.push(" WHERE TRUE");
    if let Some(term) = &filter.search {
        let pattern = like_pattern(term);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR author ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
}

/// ORDER BY clause built only from the whitelisted sort enum.
fn order_clause(sort: SortKey, dir: SortDir) -> String {
    let dir_sql = match dir {
        SortDir::Asc => "ASC",
        SortDir::Desc => "DESC",
    };
    let primary = match sort {
        SortKey::Title => format!("LOWER(title) COLLATE \"C\" {}", dir_sql),
        SortKey::Author => format!("LOWER(author) COLLATE \"C\" {}", dir_sql),
        SortKey::Year => format!("year {}", dir_sql),
        SortKey::Rating => format!("rating {} NULLS LAST", dir_sql),
        SortKey::Created => format!("created_at {}", dir_sql),
    };
    format!(" ORDER BY {}, id DESC", primary)
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_BOOKS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn seed_if_empty(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.rollback().await?;
            return Ok(0);
        }

        let seeds = seed_books();
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO books (title, author, genre, year, status, rating, image_url) ",
        );
        qb.push_values(&seeds, |mut b, book| {
            b.push_bind(book.title.clone())
                .push_bind(book.author.clone())
                .push_bind(book.genre.clone())
                .push_bind(book.year)
                .push_bind(book.status.as_str())
                .push_bind(book.rating)
                .push_bind(book.image_url.clone());
        });
        let inserted = qb.build().execute(&mut *tx).await?.rows_affected();
        tx.commit().await?;
        Ok(inserted)
    }

    async fn create(&self, book: &NewBook) -> Result<Book> {
        let sql = format!(
            "INSERT INTO books (title, author, genre, year, status, rating, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            BOOK_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.genre)
            .bind(book.year)
            .bind(book.status.as_str())
            .bind(book.rating)
            .bind(&book.image_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(book_from_row(&row)?)
    }

    async fn get(&self, id: i64) -> Result<Option<Book>> {
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(book_from_row).transpose()?)
    }

    async fn list(&self, query: &ListQuery, limit: i64, offset: i64) -> Result<Vec<Book>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM books", BOOK_COLUMNS));
        push_filter(&mut qb, &query.filter);
        qb.push(order_clause(query.sort, query.dir));
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        let rows = qb.build().fetch_all(&self.pool).await?;
        let books = rows
            .iter()
            .map(book_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(books)
    }

    async fn count(&self, filter: &ListFilter) -> Result<i64> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM books");
        push_filter(&mut qb, filter);
        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn update(&self, id: i64, book: &NewBook) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE books
             SET title = $1, author = $2, genre = $3, year = $4, status = $5,
                 rating = $6, image_url = $7, updated_at = now()
             WHERE id = $8",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.year)
        .bind(book.status.as_str())
        .bind(book.rating)
        .bind(&book.image_url)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self) -> Result<LibraryStats> {
        let summary = sqlx::query(
            "SELECT COUNT(*) AS total, COUNT(rating) AS rated, AVG(rating)::float8 AS average
             FROM books",
        )
        .fetch_one(&self.pool)
        .await?;

        let status_rows =
            sqlx::query("SELECT status, COUNT(*) AS n FROM books GROUP BY status ORDER BY status")
                .fetch_all(&self.pool)
                .await?;
        let mut by_status = Vec::with_capacity(status_rows.len());
        for r in status_rows {
            let raw: String = r.try_get("status")?;
            let status = raw
                .parse::<Status>()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            by_status.push(StatusCount {
                status,
                count: r.try_get("n")?,
            });
        }
        sort_status_counts(&mut by_status);

        let genre_rows = sqlx::query(
            "SELECT genre, COUNT(*) AS n FROM books GROUP BY genre ORDER BY n DESC, genre ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut by_genre = Vec::with_capacity(genre_rows.len());
        for r in genre_rows {
            by_genre.push(GenreCount {
                genre: r.try_get("genre")?,
                count: r.try_get("n")?,
            });
        }
        sort_genre_counts(&mut by_genre);

        Ok(LibraryStats {
            total: summary.try_get("total")?,
            rated: summary.try_get("rated")?,
            average_rating: summary.try_get("average")?,
            by_status,
            by_genre,
        })
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
