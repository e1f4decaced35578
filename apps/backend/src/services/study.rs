//! Study session service: queue selection, result recording and statistics.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use srs_core::{build_study_queue, Card, DeckStats, Outcome, SpacedRepetitionAlgorithm};

use crate::db::{find_card, Database};
use crate::error::Result;
use crate::models::OwnerOverview;

/// Orchestrates the scheduler over decks held in the repository.
#[derive(Clone)]
pub struct StudyService {
    db: Arc<Database>,
    algorithm: Arc<dyn SpacedRepetitionAlgorithm>,
}

impl StudyService {
    /// Schedules with the same algorithm the repository creates cards with.
    pub fn new(db: Arc<Database>) -> Self {
        let algorithm = db.algorithm();
        Self { db, algorithm }
    }

    /// Cards eligible for review right now, shuffled.
    pub fn get_study_cards(&self, deck_id: &str, max_new: usize) -> Result<Vec<Card>> {
        self.get_study_cards_with_rng(deck_id, max_new, &mut rand::thread_rng())
    }

    pub fn get_study_cards_with_rng<R: Rng + ?Sized>(
        &self,
        deck_id: &str,
        max_new: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>> {
        let deck = self.db.require_deck(deck_id)?;
        Ok(build_study_queue(&deck.cards, max_new, Utc::now(), rng))
    }

    /// Schedule a card after an answer and persist the whole deck.
    pub fn record_card_result(
        &self,
        deck_id: &str,
        card_id: &str,
        outcome: Outcome,
    ) -> Result<Card> {
        let algorithm = Arc::clone(&self.algorithm);

        let (_, card) = self.db.modify_deck(deck_id, |deck, now| {
            let card = find_card(deck, card_id)?;
            let before = card.state.clone();

            card.state = algorithm.schedule(&card.state, outcome.quality(), now);
            if outcome.counts_as_correct() {
                card.correct_count += 1;
            } else {
                card.incorrect_count += 1;
            }
            card.last_reviewed = Some(now);
            card.updated_at = now;

            tracing::debug!(
                deck_id = %deck_id,
                card_id = %card.id,
                algorithm = algorithm.name(),
                outcome = outcome.as_str(),
                interval_before = before.interval,
                interval_after = card.state.interval,
                easiness_after = card.state.easiness,
                status = card.state.status.as_str(),
                "Recorded review"
            );

            let card = card.clone();
            deck.last_studied = Some(now);
            Ok(card)
        })?;

        Ok(card)
    }

    /// Return a card to the default new-card state.
    pub fn reset_card(&self, deck_id: &str, card_id: &str) -> Result<Card> {
        let algorithm = Arc::clone(&self.algorithm);
        let (_, card) = self.db.modify_deck(deck_id, |deck, now| {
            let card = find_card(deck, card_id)?;
            card.reset(algorithm.initial_state(now), now);
            Ok(card.clone())
        })?;

        tracing::info!(deck_id = %deck_id, card_id = %card_id, "Reset card");
        Ok(card)
    }

    pub fn get_deck_stats(&self, deck_id: &str) -> Result<DeckStats> {
        let deck = self.db.require_deck(deck_id)?;
        Ok(DeckStats::from_cards(&deck.cards, Utc::now()))
    }

    /// Statistics summed across all of an owner's decks.
    pub fn get_owner_overview(&self, owner_id: &str) -> Result<OwnerOverview> {
        let decks = self.db.list_decks(owner_id)?;
        let now = Utc::now();

        let mut stats = DeckStats::default();
        for deck in &decks {
            stats.merge(&DeckStats::from_cards(&deck.cards, now));
        }

        Ok(OwnerOverview {
            owner_id: owner_id.to_string(),
            deck_count: decks.len(),
            stats,
        })
    }
}
