//! Core spaced-repetition library for the study tracker.
//!
//! Provides:
//! - SM-2 scheduling of per-card review state
//! - Study queue selection (due cards plus capped new-card intake)
//! - Deck statistics aggregation
//! - Portable import/export format
//! - Shared types (Card, Deck, CardState, Outcome, etc.)
//!
//! Nothing in this crate performs I/O.

pub mod algorithm;
pub mod error;
pub mod queue;
pub mod stats;
pub mod transfer;
pub mod types;

pub use algorithm::{Sm2, SpacedRepetitionAlgorithm};
pub use error::{Result, ValidationError};
pub use queue::build_study_queue;
pub use stats::DeckStats;
pub use transfer::{DeckExport, DeckImport, ExportedCard, ImportCard};
pub use types::{Card, CardDraft, CardState, CardStatus, Deck, DeckDetails, Outcome};
