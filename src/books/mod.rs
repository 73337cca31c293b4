mod book;
mod query;
mod slug;
mod store;

pub use book::*;
pub use query::*;
pub use self::slug::derive_slug;
pub use store::*;

use axum::{
    debug_handler,
    extract::{Path, State},
    response::Html,
};

use crate::error::AppResult;
use crate::templates;
use crate::AppState;

#[debug_handler]
#[tracing::instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let query = state.store.all();
    let books = query.books().await?;
    Ok(Html(templates::index_page(books)))
}

#[debug_handler]
#[tracing::instrument(skip(state))]
pub async fn book_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let book = state.store.get(Condition::slug_eq(slug)).await?;

    // the detail page context is title/author/rating/is_bestselling only
    Ok(Html(templates::detail_page(
        &book.title,
        book.author.as_deref(),
        book.rating,
        book.is_bestselling,
    )))
}
