//! Deck endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use srs_core::DeckDetails;

use crate::error::Result;
use crate::models::*;
use crate::routes::blocking;
use crate::services::transfer;
use crate::AppState;

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<Deck>)> {
    let details = DeckDetails::new(
        &payload.name,
        &payload.description,
        &payload.subject,
        &payload.tags,
    )?;
    let deck = blocking(move || state.db.create_deck(&payload.owner_id, details)).await?;
    Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /api/decks?owner_id=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListDecksQuery>,
) -> Result<Json<DeckListResponse>> {
    let decks = blocking(move || state.db.list_decks(&query.owner_id)).await?;
    Ok(Json(DeckListResponse {
        decks: decks.iter().map(DeckSummary::from).collect(),
    }))
}

/// GET /api/decks/:deck_id
pub async fn get(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<Deck>> {
    let deck = blocking(move || state.db.require_deck(&deck_id)).await?;
    Ok(Json(deck))
}

/// PUT /api/decks/:deck_id
pub async fn update(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Json(payload): Json<UpdateDeckRequest>,
) -> Result<Json<Deck>> {
    let deck = blocking(move || state.db.update_deck(&deck_id, payload)).await?;
    Ok(Json(deck))
}

/// DELETE /api/decks/:deck_id
pub async fn delete(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<StatusCode> {
    blocking(move || state.db.delete_deck(&deck_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/decks/:deck_id/stats
pub async fn stats(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<DeckStats>> {
    let stats = blocking(move || state.study.get_deck_stats(&deck_id)).await?;
    Ok(Json(stats))
}

/// GET /api/decks/:deck_id/export
pub async fn export(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<DeckExport>> {
    let export = blocking(move || transfer::export_deck(&state.db, &deck_id)).await?;
    Ok(Json(export))
}

/// POST /api/decks/import
pub async fn import(
    State(state): State<AppState>,
    Json(payload): Json<ImportDeckRequest>,
) -> Result<(StatusCode, Json<Deck>)> {
    let deck =
        blocking(move || transfer::import_deck(&state.db, &payload.owner_id, payload.deck)).await?;
    Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /api/owners/:owner_id/overview
pub async fn overview(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<OwnerOverview>> {
    let overview = blocking(move || state.study.get_owner_overview(&owner_id)).await?;
    Ok(Json(overview))
}
