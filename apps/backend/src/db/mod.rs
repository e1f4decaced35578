//! Deck and card repository over the document store

pub mod locks;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use srs_core::{Card, CardDraft, Deck, DeckDetails, Sm2, SpacedRepetitionAlgorithm};

use crate::error::{ApiError, Result};
use crate::models::{NewCardRequest, UpdateCardRequest, UpdateDeckRequest};
use crate::store::{DocumentStore, StoreError};

pub use locks::DeckLocks;

/// Collection holding deck records, cards embedded.
pub const DECKS: &str = "decks";

/// Repository wrapper around a document store
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
    locks: Arc<DeckLocks>,
    algorithm: Arc<dyn SpacedRepetitionAlgorithm>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_algorithm(store, Arc::new(Sm2::default()))
    }

    /// Repository whose new cards start from `algorithm`'s initial state.
    pub fn with_algorithm(
        store: Arc<dyn DocumentStore>,
        algorithm: Arc<dyn SpacedRepetitionAlgorithm>,
    ) -> Self {
        Self {
            store,
            locks: Arc::new(DeckLocks::new()),
            algorithm,
        }
    }

    pub fn algorithm(&self) -> Arc<dyn SpacedRepetitionAlgorithm> {
        Arc::clone(&self.algorithm)
    }

    pub fn generate_id(&self) -> String {
        self.store.generate_id()
    }

    // === Deck Repository ===

    /// Get deck by ID
    pub fn get_deck(&self, deck_id: &str) -> Result<Option<Deck>> {
        self.store
            .read(DECKS, deck_id)?
            .map(|record| decode(deck_id, record))
            .transpose()
    }

    /// Get deck by ID, failing with NotFound when absent
    pub fn require_deck(&self, deck_id: &str) -> Result<Deck> {
        self.get_deck(deck_id)?
            .ok_or_else(|| ApiError::NotFound(format!("deck {}", deck_id)))
    }

    /// All decks of an owner, most recently updated first
    pub fn list_decks(&self, owner_id: &str) -> Result<Vec<Deck>> {
        let owned_by = |v: &Value| v.get("owner_id").and_then(Value::as_str) == Some(owner_id);
        let records = self.store.query(DECKS, &owned_by)?;

        let mut decks = records
            .into_iter()
            .map(|record| {
                let id = record
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                decode(&id, record)
            })
            .collect::<Result<Vec<_>>>()?;

        decks.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(decks)
    }

    /// Create an empty deck for `owner_id`
    pub fn create_deck(&self, owner_id: &str, details: DeckDetails) -> Result<Deck> {
        self.create_deck_with_cards(owner_id, details, Vec::new())
    }

    /// Create a deck already holding `drafts` as new cards, in one write.
    pub fn create_deck_with_cards(
        &self,
        owner_id: &str,
        details: DeckDetails,
        drafts: Vec<CardDraft>,
    ) -> Result<Deck> {
        let owner_id = srs_core::types::required(owner_id, "owner_id")?;
        let now = Utc::now();

        let mut deck = Deck::new(self.generate_id(), owner_id, details, now);
        deck.cards = drafts
            .into_iter()
            .map(|draft| self.new_card(draft, now))
            .collect();
        deck.refresh_counters();
        self.put_deck(&deck)?;

        tracing::info!(
            deck_id = %deck.id,
            owner_id = %deck.owner_id,
            cards = deck.card_count,
            "Created deck"
        );
        Ok(deck)
    }

    /// Write a whole deck record, refreshing nothing
    pub fn put_deck(&self, deck: &Deck) -> Result<()> {
        let record = serde_json::to_value(deck).map_err(StoreError::from)?;
        self.store.write(DECKS, &deck.id, &record)?;
        Ok(())
    }

    /// Update deck metadata
    pub fn update_deck(&self, deck_id: &str, request: UpdateDeckRequest) -> Result<Deck> {
        let (deck, ()) = self.modify_deck(deck_id, |deck, _now| {
            let details = DeckDetails::new(
                request.name.as_deref().unwrap_or(&deck.name),
                request.description.as_deref().unwrap_or(&deck.description),
                request.subject.as_deref().unwrap_or(&deck.subject),
                request.tags.as_deref().unwrap_or(&deck.tags),
            )?;
            deck.name = details.name;
            deck.description = details.description;
            deck.subject = details.subject;
            deck.tags = details.tags;
            Ok(())
        })?;
        Ok(deck)
    }

    /// Delete a deck together with its cards
    pub fn delete_deck(&self, deck_id: &str) -> Result<()> {
        let deleted = self.locks.with(deck_id, || self.store.delete(DECKS, deck_id))?;
        if !deleted {
            return Err(ApiError::NotFound(format!("deck {}", deck_id)));
        }

        tracing::info!(deck_id = %deck_id, "Deleted deck");
        Ok(())
    }

    /// Load a deck, apply `f` to an owned copy, and persist the result.
    ///
    /// Runs under the deck's lock. Counters are recomputed and `updated_at`
    /// bumped before the single whole-record write. When `f` fails nothing
    /// is written.
    pub fn modify_deck<T, F>(&self, deck_id: &str, f: F) -> Result<(Deck, T)>
    where
        F: FnOnce(&mut Deck, DateTime<Utc>) -> Result<T>,
    {
        self.locks.with(deck_id, || {
            let mut deck = self.require_deck(deck_id)?;
            let now = Utc::now();
            let value = f(&mut deck, now)?;

            deck.refresh_counters();
            deck.updated_at = now;
            self.put_deck(&deck)?;
            Ok((deck, value))
        })
    }

    fn new_card(&self, draft: CardDraft, now: DateTime<Utc>) -> Card {
        Card::from_draft(self.generate_id(), draft, self.algorithm.initial_state(now), now)
    }

    // === Card Repository ===

    /// Append a new card with default scheduling state
    pub fn add_card(&self, deck_id: &str, request: NewCardRequest) -> Result<Card> {
        let draft = CardDraft::new(&request.front, &request.back, &request.hints, &request.tags)?;

        let (_, card) = self.modify_deck(deck_id, |deck, now| {
            let card = self.new_card(draft, now);
            deck.cards.push(card.clone());
            Ok(card)
        })?;

        tracing::debug!(deck_id = %deck_id, card_id = %card.id, "Added card");
        Ok(card)
    }

    /// Edit card content; scheduling state is left alone
    pub fn update_card(
        &self,
        deck_id: &str,
        card_id: &str,
        request: UpdateCardRequest,
    ) -> Result<Card> {
        let (_, card) = self.modify_deck(deck_id, |deck, now| {
            let card = find_card(deck, card_id)?;
            let draft = CardDraft::new(
                request.front.as_deref().unwrap_or(&card.front),
                request.back.as_deref().unwrap_or(&card.back),
                request.hints.as_deref().unwrap_or(&card.hints),
                request.tags.as_deref().unwrap_or(&card.tags),
            )?;
            card.front = draft.front;
            card.back = draft.back;
            card.hints = draft.hints;
            card.tags = draft.tags;
            card.updated_at = now;
            Ok(card.clone())
        })?;
        Ok(card)
    }

    /// Remove a card from its deck
    pub fn remove_card(&self, deck_id: &str, card_id: &str) -> Result<()> {
        self.modify_deck(deck_id, |deck, _now| {
            let before = deck.cards.len();
            deck.cards.retain(|c| c.id != card_id);
            if deck.cards.len() == before {
                return Err(card_not_found(deck_id, card_id));
            }
            Ok(())
        })?;

        tracing::debug!(deck_id = %deck_id, card_id = %card_id, "Removed card");
        Ok(())
    }
}

/// Mutable reference to a card inside a deck, NotFound when missing
pub fn find_card<'a>(deck: &'a mut Deck, card_id: &str) -> Result<&'a mut Card> {
    let deck_id = deck.id.clone();
    deck.card_mut(card_id)
        .ok_or_else(|| card_not_found(&deck_id, card_id))
}

fn card_not_found(deck_id: &str, card_id: &str) -> ApiError {
    ApiError::NotFound(format!("card {} in deck {}", card_id, deck_id))
}

fn decode(deck_id: &str, record: Value) -> Result<Deck> {
    serde_json::from_value(record).map_err(|e| {
        ApiError::Store(StoreError::Corrupt {
            collection: DECKS.to_string(),
            id: deck_id.to_string(),
            reason: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreResult};
    use pretty_assertions::assert_eq;
    use srs_core::CardStatus;

    fn database() -> Database {
        Database::new(Arc::new(MemoryStore::new()))
    }

    fn details(name: &str) -> DeckDetails {
        DeckDetails::new(name, "", "", &[]).unwrap()
    }

    fn new_card(front: &str, back: &str) -> NewCardRequest {
        NewCardRequest {
            front: front.to_string(),
            back: back.to_string(),
            hints: vec![],
            tags: vec![],
        }
    }

    #[test]
    fn create_and_read_back() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();
        assert!(deck.cards.is_empty());
        assert_eq!(deck.card_count, 0);
        assert_eq!(db.require_deck(&deck.id).unwrap(), deck);
    }

    #[test]
    fn create_requires_owner() {
        let db = database();
        assert!(matches!(
            db.create_deck("  ", details("Rust")),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_deck_is_not_found() {
        let db = database();
        assert!(db.get_deck("nope").unwrap().is_none());
        assert!(matches!(db.require_deck("nope"), Err(ApiError::NotFound(_))));
        assert!(matches!(db.delete_deck("nope"), Err(ApiError::NotFound(_))));
        assert!(matches!(
            db.add_card("nope", new_card("Q", "A")),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn list_is_scoped_to_owner() {
        let db = database();
        let a = db.create_deck("u1", details("A")).unwrap();
        db.create_deck("u1", details("B")).unwrap();
        db.create_deck("u2", details("C")).unwrap();

        // Touch `a` so it becomes the most recently updated.
        db.add_card(&a.id, new_card("Q", "A")).unwrap();

        let names: Vec<String> = db.list_decks("u1").unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
        assert!(db.list_decks("u3").unwrap().is_empty());
    }

    #[test]
    fn added_card_has_defaults_and_counters_update() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();
        let card = db.add_card(&deck.id, new_card(" Q ", " A ")).unwrap();

        assert_eq!(card.front, "Q");
        assert_eq!(card.status(), CardStatus::New);
        assert_eq!(card.state.interval, 0);
        assert_eq!(card.state.next_review, card.created_at);

        let stored = db.require_deck(&deck.id).unwrap();
        assert_eq!(stored.card_count, 1);
        assert_eq!(stored.new_count, 1);
        assert_eq!(stored.cards, vec![card]);
    }

    #[test]
    fn invalid_card_is_rejected_without_write() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();
        assert!(matches!(
            db.add_card(&deck.id, new_card("", "A")),
            Err(ApiError::InvalidArgument(_))
        ));
        assert_eq!(db.require_deck(&deck.id).unwrap(), deck);
    }

    #[test]
    fn update_card_keeps_scheduling_state() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();
        let card = db.add_card(&deck.id, new_card("Q", "A")).unwrap();

        let updated = db
            .update_card(
                &deck.id,
                &card.id,
                UpdateCardRequest {
                    back: Some("Better answer".to_string()),
                    tags: Some(vec!["Core".to_string()]),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.front, "Q");
        assert_eq!(updated.back, "Better answer");
        assert_eq!(updated.tags, vec!["core".to_string()]);
        assert_eq!(updated.state, card.state);
    }

    #[test]
    fn update_card_rejects_blanking_required_field() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();
        let card = db.add_card(&deck.id, new_card("Q", "A")).unwrap();
        let result = db.update_card(
            &deck.id,
            &card.id,
            UpdateCardRequest {
                front: Some("   ".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(ApiError::InvalidArgument(_))));
        assert_eq!(db.require_deck(&deck.id).unwrap().cards[0].front, "Q");
    }

    #[test]
    fn remove_card_and_missing_card() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();
        let card = db.add_card(&deck.id, new_card("Q", "A")).unwrap();

        db.remove_card(&deck.id, &card.id).unwrap();
        let stored = db.require_deck(&deck.id).unwrap();
        assert!(stored.cards.is_empty());
        assert_eq!(stored.card_count, 0);

        assert!(matches!(
            db.remove_card(&deck.id, &card.id),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn update_deck_metadata() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();
        let updated = db
            .update_deck(
                &deck.id,
                UpdateDeckRequest {
                    subject: Some(" Programming ".to_string()),
                    tags: Some(vec!["Systems".to_string(), "systems".to_string()]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Rust");
        assert_eq!(updated.subject, "Programming");
        assert_eq!(updated.tags, vec!["systems".to_string()]);

        assert!(matches!(
            db.update_deck(
                &deck.id,
                UpdateDeckRequest {
                    name: Some(String::new()),
                    ..Default::default()
                }
            ),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn delete_removes_record() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();
        db.add_card(&deck.id, new_card("Q", "A")).unwrap();
        db.delete_deck(&deck.id).unwrap();
        assert!(db.get_deck(&deck.id).unwrap().is_none());
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let db = database();
        let deck = db.create_deck("u1", details("Rust")).unwrap();

        std::thread::scope(|scope| {
            for t in 0..8 {
                let db = &db;
                let deck_id = deck.id.clone();
                scope.spawn(move || {
                    for i in 0..10 {
                        db.add_card(&deck_id, new_card(&format!("Q{t}-{i}"), "A"))
                            .unwrap();
                    }
                });
            }
        });

        let stored = db.require_deck(&deck.id).unwrap();
        assert_eq!(stored.cards.len(), 80);
        assert_eq!(stored.card_count, 80);
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl DocumentStore for ReadOnlyStore {
        fn read(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
            self.0.read(collection, id)
        }
        fn write(&self, _: &str, _: &str, _: &Value) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
        fn query(&self, collection: &str, p: &dyn Fn(&Value) -> bool) -> StoreResult<Vec<Value>> {
            self.0.query(collection, p)
        }
        fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
            self.0.delete(collection, id)
        }
    }

    #[test]
    fn store_failure_propagates_and_leaves_record() {
        let inner = MemoryStore::new();
        let seeded = Database::new(Arc::new(MemoryStore::new()));
        let deck = seeded.create_deck("u1", details("Rust")).unwrap();
        inner
            .write(DECKS, &deck.id, &serde_json::to_value(&deck).unwrap())
            .unwrap();

        let db = Database::new(Arc::new(ReadOnlyStore(inner)));
        assert!(matches!(
            db.add_card(&deck.id, new_card("Q", "A")),
            Err(ApiError::Store(_))
        ));
        assert_eq!(db.require_deck(&deck.id).unwrap(), deck);
    }

    #[test]
    fn missing_deck_calls_leave_no_lock_entries() {
        let db = database();
        for i in 0..1000 {
            let result = db.update_deck(&format!("missing-{i}"), UpdateDeckRequest::default());
            assert!(matches!(result, Err(ApiError::NotFound(_))));
        }
        assert!(db.delete_deck("missing").is_err());
        assert_eq!(db.locks.len(), 0);

        let deck = db.create_deck("u1", details("Rust")).unwrap();
        db.add_card(&deck.id, new_card("Q", "A")).unwrap();
        assert_eq!(db.locks.len(), 0);
    }

    #[test]
    fn new_cards_start_from_algorithm_state() {
        let sm2 = Sm2 {
            initial_easiness: 2.0,
            ..Sm2::default()
        };
        let db = Database::with_algorithm(Arc::new(MemoryStore::new()), Arc::new(sm2));
        let deck = db.create_deck("u1", details("Rust")).unwrap();

        let card = db.add_card(&deck.id, new_card("Q", "A")).unwrap();
        assert_eq!(card.state.easiness, 2.0);
        assert_eq!(card.status(), CardStatus::New);

        let drafts = vec![CardDraft::new("Q2", "A2", &[], &[]).unwrap()];
        let imported = db
            .create_deck_with_cards("u1", details("Imported"), drafts)
            .unwrap();
        assert_eq!(imported.cards[0].state.easiness, 2.0);
        assert_eq!(imported.new_count, 1);
    }

    #[test]
    fn deck_with_cards_is_a_single_record() {
        let db = database();
        let drafts = vec![
            CardDraft::new("Q1", "A1", &[], &[]).unwrap(),
            CardDraft::new("Q2", "A2", &[], &[]).unwrap(),
        ];
        let deck = db.create_deck_with_cards("u1", details("Rust"), drafts).unwrap();
        assert_eq!(deck.card_count, 2);
        assert_ne!(deck.cards[0].id, deck.cards[1].id);
        assert_eq!(db.require_deck(&deck.id).unwrap(), deck);
    }
}
