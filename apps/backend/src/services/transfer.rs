//! Deck import and export

use srs_core::{Deck, DeckExport, DeckImport};

use crate::db::Database;
use crate::error::Result;

/// Portable copy of a deck's content.
pub fn export_deck(db: &Database, deck_id: &str) -> Result<DeckExport> {
    let deck = db.require_deck(deck_id)?;
    Ok(DeckExport::from(&deck))
}

/// Create a new deck for `owner_id` from imported content.
///
/// Cards missing a front or back are skipped. An import left with no usable
/// cards is rejected. The deck is written once, cards included, so a failed
/// import leaves nothing behind.
pub fn import_deck(db: &Database, owner_id: &str, import: DeckImport) -> Result<Deck> {
    let details = import.details()?;
    let (drafts, skipped) = import.require_drafts().map_err(|e| {
        tracing::warn!(
            owner_id = %owner_id,
            name = %details.name,
            cards = import.cards.len(),
            "Rejected import with no usable cards"
        );
        e
    })?;

    let deck = db.create_deck_with_cards(owner_id, details, drafts)?;

    if skipped > 0 {
        tracing::warn!(deck_id = %deck.id, skipped, "Skipped malformed cards during import");
    }
    tracing::info!(deck_id = %deck.id, cards = deck.card_count, "Imported deck");
    Ok(deck)
}
