use tokio::sync::OnceCell;

use super::book::Book;
use super::store::{BookStore, StoreError};

/// Columns a condition may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Rating,
    Author,
    Bestselling,
    Slug,
}

impl Field {
    fn column(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Rating => "rating",
            Field::Author => "author",
            Field::Bestselling => "is_bestselling",
            Field::Slug => "slug",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Int(i64),
    Bool(bool),
}

/// A composable filter over the books table.
///
/// Compiles to a parenthesized SQL clause with `?` placeholders; values are
/// always bound, never spliced into the statement text.
#[derive(Debug, Clone)]
pub enum Condition {
    Eq(Field, Value),
    Lt(Field, Value),
    Le(Field, Value),
    Contains(Field, String),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn title_eq(title: impl Into<String>) -> Self {
        Condition::Eq(Field::Title, Value::Text(title.into()))
    }

    pub fn title_contains(fragment: impl Into<String>) -> Self {
        Condition::Contains(Field::Title, fragment.into())
    }

    pub fn author_eq(author: impl Into<String>) -> Self {
        Condition::Eq(Field::Author, Value::Text(author.into()))
    }

    pub fn author_contains(fragment: impl Into<String>) -> Self {
        Condition::Contains(Field::Author, fragment.into())
    }

    pub fn slug_eq(slug: impl Into<String>) -> Self {
        Condition::Eq(Field::Slug, Value::Text(slug.into()))
    }

    pub fn rating_eq(rating: i64) -> Self {
        Condition::Eq(Field::Rating, Value::Int(rating))
    }

    pub fn rating_lt(rating: i64) -> Self {
        Condition::Lt(Field::Rating, Value::Int(rating))
    }

    pub fn rating_le(rating: i64) -> Self {
        Condition::Le(Field::Rating, Value::Int(rating))
    }

    pub fn bestselling(flag: bool) -> Self {
        Condition::Eq(Field::Bestselling, Value::Bool(flag))
    }

    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Condition) -> Self {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// Renders the clause, pushing bind values in placeholder order.
    pub(crate) fn sql(&self, binds: &mut Vec<Value>) -> String {
        match self {
            Condition::Eq(field, value) => {
                binds.push(value.clone());
                format!("{} = ?", field.column())
            }
            Condition::Lt(field, value) => {
                binds.push(value.clone());
                format!("{} < ?", field.column())
            }
            Condition::Le(field, value) => {
                binds.push(value.clone());
                format!("{} <= ?", field.column())
            }
            Condition::Contains(field, fragment) => {
                binds.push(Value::Text(fragment.clone()));
                format!("instr({}, ?) > 0", field.column())
            }
            Condition::And(left, right) => {
                format!("({} AND {})", left.sql(binds), right.sql(binds))
            }
            Condition::Or(left, right) => {
                format!("({} OR {})", left.sql(binds), right.sql(binds))
            }
        }
    }
}

/// A repeatable query over the store.
///
/// The result set is fetched on first use and reused for every later call on
/// the same query object; a new `filter`/`all` call starts with a cold cache.
#[derive(Debug)]
pub struct BookQuery {
    store: BookStore,
    condition: Option<Condition>,
    cache: OnceCell<Vec<Book>>,
}

impl BookQuery {
    pub(crate) fn new(store: BookStore, condition: Option<Condition>) -> Self {
        Self {
            store,
            condition,
            cache: OnceCell::new(),
        }
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Matching books in id order, from the cache after the first fetch.
    pub async fn books(&self) -> Result<&[Book], StoreError> {
        let books = self
            .cache
            .get_or_try_init(|| self.store.fetch_all(self.condition.as_ref()))
            .await?;
        Ok(books.as_slice())
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.books().await?.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_equality_compiles_to_bound_comparison() {
        let mut binds = Vec::new();
        let sql = Condition::slug_eq("dune").sql(&mut binds);
        assert_eq!(sql, "slug = ?");
        assert_eq!(binds.len(), 1);
    }

    #[test]
    fn test_ordering_comparisons_use_lt_and_le() {
        let mut binds = Vec::new();
        assert_eq!(Condition::rating_lt(3).sql(&mut binds), "rating < ?");
        assert_eq!(Condition::rating_le(3).sql(&mut binds), "rating <= ?");
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn test_containment_compiles_to_instr() {
        let mut binds = Vec::new();
        let sql = Condition::title_contains("Potter").sql(&mut binds);
        assert_eq!(sql, "instr(title, ?) > 0");
        assert!(matches!(&binds[0], Value::Text(text) if text == "Potter"));
    }

    #[test]
    fn test_composition_parenthesizes_and_binds_in_order() {
        let mut binds = Vec::new();
        let condition = Condition::rating_le(2)
            .or(Condition::bestselling(true).and(Condition::author_eq("Frank Herbert")));
        let sql = condition.sql(&mut binds);
        assert_eq!(
            sql,
            "(rating <= ? OR (is_bestselling = ? AND author = ?))"
        );
        assert!(matches!(binds[0], Value::Int(2)));
        assert!(matches!(binds[1], Value::Bool(true)));
        assert!(matches!(&binds[2], Value::Text(text) if text == "Frank Herbert"));
    }
}
