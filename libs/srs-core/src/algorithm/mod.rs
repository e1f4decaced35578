//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::CardState;
use chrono::{DateTime, Utc};

pub use sm2::Sm2;

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next scheduling state after a graded review.
    fn schedule(&self, state: &CardState, quality: i32, now: DateTime<Utc>) -> CardState;

    /// Initial state for a card created at `now`.
    fn initial_state(&self, now: DateTime<Utc>) -> CardState;
}
