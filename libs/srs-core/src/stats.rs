//! Deck statistics aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Card, CardStatus};

/// Deck-wide counts derived from the card list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckStats {
    pub total_cards: usize,
    pub new_count: usize,
    pub learning_count: usize,
    pub mastered_count: usize,
    pub due_now: usize,
    pub total_correct: u64,
    pub total_incorrect: u64,
    pub total_reviews: u64,
    pub accuracy_pct: f64,
    pub mastery_pct: f64,
}

impl DeckStats {
    /// Scan `cards` and compute every aggregate at `now`.
    pub fn from_cards(cards: &[Card], now: DateTime<Utc>) -> Self {
        let mut stats = Self::default();
        for card in cards {
            stats.total_cards += 1;
            match card.status() {
                CardStatus::New => stats.new_count += 1,
                CardStatus::Learning => stats.learning_count += 1,
                CardStatus::Mastered => stats.mastered_count += 1,
            }
            if card.is_due(now) {
                stats.due_now += 1;
            }
            stats.total_correct += u64::from(card.correct_count);
            stats.total_incorrect += u64::from(card.incorrect_count);
        }
        stats.finish();
        stats
    }

    /// Fold another set of statistics into this one.
    pub fn merge(&mut self, other: &DeckStats) {
        self.total_cards += other.total_cards;
        self.new_count += other.new_count;
        self.learning_count += other.learning_count;
        self.mastered_count += other.mastered_count;
        self.due_now += other.due_now;
        self.total_correct += other.total_correct;
        self.total_incorrect += other.total_incorrect;
        self.finish();
    }

    fn finish(&mut self) {
        self.total_reviews = self.total_correct + self.total_incorrect;
        self.accuracy_pct = percentage(self.total_correct, self.total_reviews);
        self.mastery_pct = percentage(self.mastered_count as u64, self.total_cards as u64);
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
