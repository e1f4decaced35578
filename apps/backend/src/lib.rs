pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::StudyService;
use crate::store::{DocumentStore, JsonFileStore, MemoryStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub study: Arc<StudyService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let db = Arc::new(Database::new(store));
        Self {
            study: Arc::new(StudyService::new(db.clone())),
            db,
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Deck routes
        .route("/api/decks", post(routes::decks::create).get(routes::decks::list))
        .route("/api/decks/import", post(routes::decks::import))
        .route(
            "/api/decks/:deck_id",
            get(routes::decks::get)
                .put(routes::decks::update)
                .delete(routes::decks::delete),
        )
        .route("/api/decks/:deck_id/stats", get(routes::decks::stats))
        .route("/api/decks/:deck_id/export", get(routes::decks::export))
        .route("/api/owners/:owner_id/overview", get(routes::decks::overview))
        // Card routes
        .route("/api/decks/:deck_id/cards", post(routes::cards::add))
        .route(
            "/api/decks/:deck_id/cards/:card_id",
            put(routes::cards::update).delete(routes::cards::remove),
        )
        // Study routes
        .route("/api/decks/:deck_id/study", get(routes::study::queue))
        .route(
            "/api/decks/:deck_id/cards/:card_id/result",
            post(routes::study::record_result),
        )
        .route(
            "/api/decks/:deck_id/cards/:card_id/reset",
            post(routes::study::reset),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn DocumentStore> = match &config.data_dir {
        Some(dir) => {
            tracing::info!("Opening JSON store at {}", dir.display());
            Arc::new(JsonFileStore::open(dir)?)
        }
        None => {
            tracing::warn!("DATA_DIR not set, decks will not outlive the process");
            Arc::new(MemoryStore::new())
        }
    };

    let addr = config.bind_address();
    let app = build_router(AppState::new(store, config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
