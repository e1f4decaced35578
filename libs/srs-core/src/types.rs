//! Core types for the study tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Card learning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Mastered,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Mastered => "mastered",
        }
    }
}

/// Outcome reported by the user after answering a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    Partial,
}

impl Outcome {
    /// SM-2 quality for this outcome.
    ///
    /// Only 5, 3 and 1 are reachable; the finer gradations of SM-2 are not
    /// exposed to users.
    pub fn quality(self) -> i32 {
        match self {
            Self::Correct => 5,
            Self::Partial => 3,
            Self::Incorrect => 1,
        }
    }

    /// Whether the outcome counts toward `correct_count`.
    ///
    /// `Partial` schedules as a pass but is tallied as a miss.
    pub fn counts_as_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Partial => "partial",
        }
    }
}

impl FromStr for Outcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "correct" => Ok(Self::Correct),
            "incorrect" => Ok(Self::Incorrect),
            "partial" => Ok(Self::Partial),
            other => Err(ValidationError::UnknownOutcome(other.to_string())),
        }
    }
}

/// Scheduling state of a card, the part under algorithmic control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardState {
    pub status: CardStatus,
    pub easiness: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review: DateTime<Utc>,
}

impl CardState {
    /// State of a card that has never been reviewed, due immediately.
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            status: CardStatus::New,
            easiness: 2.5,
            interval: 0,
            repetitions: 0,
            next_review: now,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// Flashcard embedded in a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub state: CardState,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Build a fresh card from already-normalized content.
    ///
    /// `state` is the scheduler's initial state for a card created at `now`.
    pub fn from_draft(
        id: String,
        draft: CardDraft,
        state: CardState,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            front: draft.front,
            back: draft.back,
            hints: draft.hints,
            tags: draft.tags,
            state,
            last_reviewed: None,
            correct_count: 0,
            incorrect_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> CardStatus {
        self.state.status
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.state.is_due(now)
    }

    /// Return the card to new-card scheduling, dropping its review history.
    pub fn reset(&mut self, state: CardState, now: DateTime<Utc>) {
        self.state = state;
        self.last_reviewed = None;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.updated_at = now;
    }
}

/// Validated card content, ready to become a [`Card`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CardDraft {
    /// Trim and validate raw card content.
    pub fn new(
        front: &str,
        back: &str,
        hints: &[String],
        tags: &[String],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            front: required(front, "front")?,
            back: required(back, "back")?,
            hints: normalize_hints(hints),
            tags: normalize_tags(tags),
        })
    }
}

/// Deck with embedded cards and cached counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_studied: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub card_count: usize,
    #[serde(default)]
    pub mastered_count: usize,
    #[serde(default)]
    pub learning_count: usize,
    #[serde(default)]
    pub new_count: usize,
}

impl Deck {
    /// Empty deck owned by `owner_id`.
    pub fn new(id: String, owner_id: String, details: DeckDetails, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            name: details.name,
            description: details.description,
            subject: details.subject,
            tags: details.tags,
            created_at: now,
            updated_at: now,
            last_studied: None,
            cards: Vec::new(),
            card_count: 0,
            mastered_count: 0,
            learning_count: 0,
            new_count: 0,
        }
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    /// Recompute the cached counters from the card list.
    pub fn refresh_counters(&mut self) {
        let mut new_count = 0;
        let mut learning_count = 0;
        let mut mastered_count = 0;
        for card in &self.cards {
            match card.status() {
                CardStatus::New => new_count += 1,
                CardStatus::Learning => learning_count += 1,
                CardStatus::Mastered => mastered_count += 1,
            }
        }
        self.card_count = self.cards.len();
        self.new_count = new_count;
        self.learning_count = learning_count;
        self.mastered_count = mastered_count;
    }
}

/// Validated deck metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDetails {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DeckDetails {
    pub fn new(
        name: &str,
        description: &str,
        subject: &str,
        tags: &[String],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required(name, "name")?,
            description: description.trim().to_string(),
            subject: subject.trim().to_string(),
            tags: normalize_tags(tags),
        })
    }
}

/// Trim a required text field, rejecting it when empty.
pub fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Trim, lower-case and de-duplicate tags, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

pub fn normalize_hints(hints: &[String]) -> Vec<String> {
    hints
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}
