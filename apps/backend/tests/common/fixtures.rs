//! Request bodies for integration tests.

use serde_json::{json, Value};

pub fn create_deck_request(owner_id: &str, name: &str) -> Value {
    json!({
        "owner_id": owner_id,
        "name": name,
        "description": "Test deck",
        "subject": "testing",
        "tags": ["Test"]
    })
}

pub fn new_card_request(front: &str, back: &str) -> Value {
    json!({ "front": front, "back": back })
}

pub fn result_request(outcome: &str) -> Value {
    json!({ "outcome": outcome })
}

/// Import body with `num_cards` well-formed cards.
pub fn import_request(owner_id: &str, name: &str, num_cards: usize) -> Value {
    let cards: Vec<Value> = (0..num_cards)
        .map(|i| {
            json!({
                "front": format!("Question {}?", i + 1),
                "back": format!("Answer {}.", i + 1)
            })
        })
        .collect();
    json!({ "owner_id": owner_id, "name": name, "cards": cards })
}
