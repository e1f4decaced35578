//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2. Quality ratings run from 0 (total blackout) to
//! 5 (perfect recall); 3 and above count as a pass.

use super::SpacedRepetitionAlgorithm;
use crate::types::{CardState, CardStatus};
use chrono::{DateTime, Duration, Utc};

/// Lowest quality that counts as a successful recall.
pub const PASSING_QUALITY: i32 = 3;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_easiness: f64,
    pub minimum_easiness: f64,
    /// Interval in days from which a card counts as mastered.
    pub mastery_interval: u32,
    /// Longest interval ever scheduled, in days.
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_easiness: 2.5,
            minimum_easiness: 1.3,
            mastery_interval: 21,
            maximum_interval: 36_500,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self, now: DateTime<Utc>) -> CardState {
        CardState {
            easiness: self.initial_easiness,
            ..CardState::new_at(now)
        }
    }

    fn schedule(&self, state: &CardState, quality: i32, now: DateTime<Utc>) -> CardState {
        let q = quality.clamp(0, 5);
        let easiness = self.next_easiness(state.easiness, q);

        let (interval, repetitions) = if q >= PASSING_QUALITY {
            let interval = match state.repetitions {
                0 => 1,
                1 => 6,
                // Corrupt records may carry a zero interval here; never schedule in the past.
                _ => ((state.interval as f64 * easiness).round() as u32).max(1),
            };
            (interval.min(self.maximum_interval), state.repetitions.saturating_add(1))
        } else {
            (1, 0)
        };

        let status = if repetitions == 0 {
            if state.status == CardStatus::New {
                CardStatus::New
            } else {
                CardStatus::Learning
            }
        } else if interval >= self.mastery_interval {
            CardStatus::Mastered
        } else {
            CardStatus::Learning
        };

        CardState {
            status,
            easiness,
            interval,
            repetitions,
            next_review: now + Duration::days(i64::from(interval)),
        }
    }
}

impl Sm2 {
    fn next_easiness(&self, easiness: f64, q: i32) -> f64 {
        let miss = f64::from(5 - q);
        let raw = easiness + (0.1 - miss * (0.08 + miss * 0.02));
        round_to_hundredths(raw.max(self.minimum_easiness)).max(self.minimum_easiness)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
