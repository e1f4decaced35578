//! Study endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::blocking;
use crate::AppState;

/// GET /api/decks/:deck_id/study
pub async fn queue(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Query(query): Query<StudyQueueQuery>,
) -> Result<Json<StudyQueueResponse>> {
    let max_new = query
        .max_new
        .unwrap_or(state.config.default_max_new_cards);
    let cards = blocking(move || state.study.get_study_cards(&deck_id, max_new)).await?;
    Ok(Json(StudyQueueResponse::new(cards)))
}

/// POST /api/decks/:deck_id/cards/:card_id/result
pub async fn record_result(
    State(state): State<AppState>,
    Path((deck_id, card_id)): Path<(String, String)>,
    Json(payload): Json<RecordResultRequest>,
) -> Result<Json<Card>> {
    let outcome: Outcome = payload.outcome.parse().map_err(ApiError::from)?;
    let card = blocking(move || state.study.record_card_result(&deck_id, &card_id, outcome)).await?;
    Ok(Json(card))
}

/// POST /api/decks/:deck_id/cards/:card_id/reset
pub async fn reset(
    State(state): State<AppState>,
    Path((deck_id, card_id)): Path<(String, String)>,
) -> Result<Json<Card>> {
    let card = blocking(move || state.study.reset_card(&deck_id, &card_id)).await?;
    Ok(Json(card))
}
