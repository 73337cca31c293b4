//! Book Outlet — a server-rendered book catalog.
//!
//! The catalog store lives in [`books`]; the HTTP surface is two read-only
//! pages (list and detail) plus a liveness probe.

pub mod books;
pub mod error;
pub mod settings;
pub mod sqlite;
pub mod templates;

use axum::{routing::get, Router};

use books::BookStore;

/// Shared request state. The store is injected here, never reached through a
/// global.
#[derive(Clone)]
pub struct AppState {
    pub store: BookStore,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(books::index))
        .route("/books/{slug}", get(books::book_detail))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum_test::TestServer;
    use tracing_test::traced_test;

    pub async fn create_test_state() -> AppState {
        let settings = sqlite::Settings {
            url: "sqlite::memory:".to_string(),
            // a second pool connection would open a different memory database
            max_connections: 1,
        };
        let pool = sqlite::create_pool(&settings).await.unwrap();
        AppState {
            store: BookStore::new(pool),
        }
    }

    pub async fn create_test_server() -> (TestServer, AppState) {
        let state = create_test_state().await;
        let server = TestServer::new(create_app(state.clone())).unwrap();
        (server, state)
    }

    // Test the liveness endpoint
    #[tokio::test]
    #[traced_test]
    async fn test_health_endpoint() {
        let (server, _state) = create_test_server().await;
        let response = server.get("/health").await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.text(), "ok");
    }
}
