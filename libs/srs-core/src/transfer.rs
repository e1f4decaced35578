//! Portable deck format for import and export.
//!
//! Exports carry content only; scheduling state never leaves the deck.
//!
//! ```json
//! {
//!   "name": "Rust",
//!   "description": "Ownership and borrowing",
//!   "subject": "programming",
//!   "tags": ["rust"],
//!   "cards": [{ "front": "What is a borrow?", "back": "A reference", "hints": [], "tags": [] }]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::types::{CardDraft, Deck, DeckDetails};

/// Exported deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckExport {
    pub name: String,
    pub description: String,
    pub subject: String,
    pub tags: Vec<String>,
    pub cards: Vec<ExportedCard>,
}

/// Exported card content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedCard {
    pub front: String,
    pub back: String,
    pub hints: Vec<String>,
    pub tags: Vec<String>,
}

impl From<&Deck> for DeckExport {
    fn from(deck: &Deck) -> Self {
        Self {
            name: deck.name.clone(),
            description: deck.description.clone(),
            subject: deck.subject.clone(),
            tags: deck.tags.clone(),
            cards: deck
                .cards
                .iter()
                .map(|c| ExportedCard {
                    front: c.front.clone(),
                    back: c.back.clone(),
                    hints: c.hints.clone(),
                    tags: c.tags.clone(),
                })
                .collect(),
        }
    }
}

/// Deck as supplied for import. Everything except the name is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckImport {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Entries of any shape are accepted here and filtered by [`drafts`](Self::drafts).
    #[serde(default, deserialize_with = "lenient_cards")]
    pub cards: Vec<ImportCard>,
}

/// Card as supplied for import; malformed entries are skipped rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportCard {
    #[serde(default)]
    pub front: Option<String>,
    #[serde(default)]
    pub back: Option<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ImportCard {
    /// Read whatever usable fields an arbitrary JSON entry carries.
    ///
    /// Non-string fronts and backs come out as `None`; non-string hints and
    /// tags are dropped.
    pub fn from_value(entry: &Value) -> Self {
        let text = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_string);
        let list = |key: &str| -> Vec<String> {
            entry
                .get(key)
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default()
        };
        Self {
            front: text("front"),
            back: text("back"),
            hints: list("hints"),
            tags: list("tags"),
        }
    }

    /// Validated draft, or `None` when front or back is missing.
    pub fn to_draft(&self) -> Option<CardDraft> {
        let front = self.front.as_deref()?;
        let back = self.back.as_deref()?;
        CardDraft::new(front, back, &self.hints, &self.tags).ok()
    }
}

impl DeckImport {
    pub fn details(&self) -> Result<DeckDetails> {
        DeckDetails::new(
            &self.name,
            self.description.as_deref().unwrap_or_default(),
            self.subject.as_deref().unwrap_or_default(),
            &self.tags,
        )
    }

    /// Usable card drafts in input order, and how many entries were skipped.
    pub fn drafts(&self) -> (Vec<CardDraft>, usize) {
        let drafts: Vec<CardDraft> = self.cards.iter().filter_map(ImportCard::to_draft).collect();
        let skipped = self.cards.len() - drafts.len();
        (drafts, skipped)
    }

    /// Like [`drafts`](Self::drafts), but an import with nothing usable is an error.
    pub fn require_drafts(&self) -> Result<(Vec<CardDraft>, usize)> {
        let (drafts, skipped) = self.drafts();
        if drafts.is_empty() {
            return Err(ValidationError::EmptyImport);
        }
        Ok((drafts, skipped))
    }
}

fn lenient_cards<'de, D>(deserializer: D) -> std::result::Result<Vec<ImportCard>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.iter().map(ImportCard::from_value).collect())
}
