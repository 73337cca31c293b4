use sqlx::SqlitePool;
use thiserror::Error;

use super::book::{validate_fields, Book, NewBook, ValidationError};
use super::query::{BookQuery, Condition, Value};
use super::slug::derive_slug;

const BOOK_COLUMNS: &str = "id, title, rating, author, is_bestselling, slug";

/// Failures surfaced by the catalog store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("no book matched the lookup")]
    NotFound,
    #[error("lookup matched {0} books where exactly one was expected")]
    Multiple(usize),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository over the books table. Cheap to clone; handlers receive it
/// through the application state.
#[derive(Debug, Clone)]
pub struct BookStore {
    pool: SqlitePool,
}

impl BookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validates, derives the slug, and inserts in one step. Nothing is
    /// written when validation fails.
    pub async fn create(&self, new: NewBook) -> Result<Book, StoreError> {
        validate_fields(&new.title, new.rating, new.author.as_deref())?;
        let slug = derive_slug(&new.title);

        let sql = format!(
            "INSERT INTO books (title, rating, author, is_bestselling, slug) \
             VALUES (?, ?, ?, ?, ?) RETURNING {BOOK_COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(&new.title)
            .bind(new.rating)
            .bind(&new.author)
            .bind(new.is_bestselling)
            .bind(&slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(book)
    }

    /// Exactly-one lookup: zero matches is `NotFound`, more than one is
    /// `Multiple` with the matched count.
    pub async fn get(&self, condition: Condition) -> Result<Book, StoreError> {
        let mut books = self.fetch_all(Some(&condition)).await?;
        match books.len() {
            0 => Err(StoreError::NotFound),
            1 => Ok(books.remove(0)),
            n => Err(StoreError::Multiple(n)),
        }
    }

    /// Every book, in id order.
    pub fn all(&self) -> BookQuery {
        BookQuery::new(self.clone(), None)
    }

    /// Books matching `condition`, in id order.
    pub fn filter(&self, condition: Condition) -> BookQuery {
        BookQuery::new(self.clone(), Some(condition))
    }

    /// Re-derives the slug from the current title and overwrites the stored
    /// row. The passed record is updated in place so the caller observes the
    /// recomputed slug.
    pub async fn save(&self, book: &mut Book) -> Result<(), StoreError> {
        validate_fields(&book.title, book.rating, book.author.as_deref())?;
        book.slug = derive_slug(&book.title);

        let result = sqlx::query(
            "UPDATE books \
             SET title = ?, rating = ?, author = ?, is_bestselling = ?, slug = ? \
             WHERE id = ?",
        )
        .bind(&book.title)
        .bind(book.rating)
        .bind(&book.author)
        .bind(book.is_bestselling)
        .bind(&book.slug)
        .bind(book.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub(crate) async fn fetch_all(
        &self,
        condition: Option<&Condition>,
    ) -> Result<Vec<Book>, StoreError> {
        let mut binds = Vec::new();
        let mut sql = format!("SELECT {BOOK_COLUMNS} FROM books");
        if let Some(condition) = condition {
            sql.push_str(" WHERE ");
            sql.push_str(&condition.sql(&mut binds));
        }
        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query_as::<_, Book>(&sql);
        for value in binds {
            query = match value {
                Value::Text(text) => query.bind(text),
                Value::Int(int) => query.bind(int),
                Value::Bool(flag) => query.bind(flag),
            };
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}
