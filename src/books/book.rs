use std::fmt;

use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 50;
pub const AUTHOR_MAX_CHARS: usize = 100;
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

/// A persisted catalog entry. `id` is assigned by the store and `slug` is
/// rewritten from `title` on every save.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub rating: i64,
    pub author: Option<String>,
    pub is_bestselling: bool,
    pub slug: String,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/5)", self.title, self.rating)
    }
}

/// Field values for a book that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub rating: i64,
    pub author: Option<String>,
    pub is_bestselling: bool,
}

impl NewBook {
    pub fn new(title: impl Into<String>, rating: i64) -> Self {
        Self {
            title: title.into(),
            rating,
            author: None,
            is_bestselling: false,
        }
    }

    pub fn by(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn bestselling(mut self) -> Self {
        self.is_bestselling = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {constraint}")]
pub struct ValidationError {
    pub field: &'static str,
    pub constraint: String,
}

impl ValidationError {
    fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

/// Field constraints shared by the create and save paths. Runs before any
/// write touches the database.
pub(crate) fn validate_fields(
    title: &str,
    rating: i64,
    author: Option<&str>,
) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::new("title", "is required"));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::new(
            "title",
            format!("must be at most {TITLE_MAX_CHARS} characters"),
        ));
    }
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(ValidationError::new(
            "rating",
            format!("must be between {RATING_MIN} and {RATING_MAX}"),
        ));
    }
    if let Some(author) = author {
        if author.chars().count() > AUTHOR_MAX_CHARS {
            return Err(ValidationError::new(
                "author",
                format!("must be at most {AUTHOR_MAX_CHARS} characters"),
            ));
        }
    }
    Ok(())
}
