//! Study queue selection.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Card, CardStatus};

/// Select the cards eligible for a study session at `now`.
///
/// Cards already in rotation are included when due. At most `max_new` new
/// cards are added, taken in list order. The combined queue is shuffled with
/// `rng` so no card is always shown first. Never touches scheduling state.
pub fn build_study_queue<R: Rng + ?Sized>(
    cards: &[Card],
    max_new: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Card> {
    let mut queue: Vec<Card> = cards
        .iter()
        .filter(|c| c.status() != CardStatus::New && c.is_due(now))
        .cloned()
        .collect();

    queue.extend(
        cards
            .iter()
            .filter(|c| c.status() == CardStatus::New)
            .take(max_new)
            .cloned(),
    );

    queue.shuffle(rng);
    queue
}
