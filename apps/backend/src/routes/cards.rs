//! Card endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::blocking;
use crate::AppState;

/// POST /api/decks/:deck_id/cards
pub async fn add(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Json(payload): Json<NewCardRequest>,
) -> Result<(StatusCode, Json<Card>)> {
    let card = blocking(move || state.db.add_card(&deck_id, payload)).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/decks/:deck_id/cards/:card_id
pub async fn update(
    State(state): State<AppState>,
    Path((deck_id, card_id)): Path<(String, String)>,
    Json(payload): Json<UpdateCardRequest>,
) -> Result<Json<Card>> {
    let card = blocking(move || state.db.update_card(&deck_id, &card_id, payload)).await?;
    Ok(Json(card))
}

/// DELETE /api/decks/:deck_id/cards/:card_id
pub async fn remove(
    State(state): State<AppState>,
    Path((deck_id, card_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    blocking(move || state.db.remove_card(&deck_id, &card_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
