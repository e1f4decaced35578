//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from srs-core
pub use srs_core::{
    Card, CardState, CardStatus, Deck, DeckExport, DeckImport, DeckStats, Outcome,
};

// === Deck types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeckRequest {
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateDeckRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListDecksQuery {
    pub owner_id: String,
}

/// Deck info with cached counts, without the card list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub tags: Vec<String>,
    pub card_count: usize,
    pub new_count: usize,
    pub learning_count: usize,
    pub mastered_count: usize,
    pub last_studied: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Deck> for DeckSummary {
    fn from(deck: &Deck) -> Self {
        Self {
            id: deck.id.clone(),
            name: deck.name.clone(),
            description: deck.description.clone(),
            subject: deck.subject.clone(),
            tags: deck.tags.clone(),
            card_count: deck.card_count,
            new_count: deck.new_count,
            learning_count: deck.learning_count,
            mastered_count: deck.mastered_count,
            last_studied: deck.last_studied,
            updated_at: deck.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportDeckRequest {
    #[serde(default)]
    pub owner_id: String,
    #[serde(flatten)]
    pub deck: DeckImport,
}

/// Aggregate statistics across every deck of an owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerOverview {
    pub owner_id: String,
    pub deck_count: usize,
    #[serde(flatten)]
    pub stats: DeckStats,
}

// === Card types ===

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewCardRequest {
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    pub front: Option<String>,
    pub back: Option<String>,
    pub hints: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

// === Study types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyQueueQuery {
    pub max_new: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyQueueResponse {
    pub cards: Vec<Card>,
    pub due_count: usize,
    pub new_count: usize,
}

impl StudyQueueResponse {
    pub fn new(cards: Vec<Card>) -> Self {
        let new_count = cards
            .iter()
            .filter(|c| c.status() == CardStatus::New)
            .count();
        Self {
            due_count: cards.len() - new_count,
            new_count,
            cards,
        }
    }
}

/// Outcome is kept as a string so unknown values surface as InvalidArgument
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResultRequest {
    #[serde(default)]
    pub outcome: String,
}
