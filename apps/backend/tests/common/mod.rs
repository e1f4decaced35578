//! Common test utilities for integration tests.
//!
//! Every context runs against an isolated in-memory store, so tests need no
//! external services and can run in parallel.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use study_tracker_backend::config::Config;
use study_tracker_backend::db::Database;
use study_tracker_backend::store::MemoryStore;
use study_tracker_backend::{build_router, AppState};

/// Test context holding the repository and the router built over it.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(Arc::new(MemoryStore::new()), config);
        let db = state.db.clone();
        Self {
            db,
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}

/// Create a deck through the API and return its ID.
pub async fn create_deck(server: &TestServer, owner_id: &str, name: &str) -> String {
    let response = server
        .post("/api/decks")
        .json(&fixtures::create_deck_request(owner_id, name))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

/// Add a card through the API and return its ID.
pub async fn add_card(server: &TestServer, deck_id: &str, front: &str, back: &str) -> String {
    let response = server
        .post(&format!("/api/decks/{}/cards", deck_id))
        .json(&fixtures::new_card_request(front, back))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().to_string()
}
