// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A card's identity. Caller-assigned, globally unique, and used as the
/// sort key of the id-ordered collection.
pub type CardId = u32;

/// A stable identity for a homonym group. Assigned once, monotonically
/// increasing, never reused even after the group is fully removed.
pub type HomonymId = u32;

/// Creation time of a card, unix epoch milliseconds. Sort key of the
/// date-ordered collection.
pub type Timestamp = i64;

/// A single vocabulary card. The fields beyond `id`, `word`, `definition`
/// and `date` that the surrounding application stores (picture, part of
/// speech, badges, flashcard-sync metadata) are opaque to this core and
/// ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub word: String,
    pub definition: String,
    pub date: Timestamp,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub extra: serde_json::Value,
}

impl Card {
    pub fn new(id: CardId, word: &str, definition: &str, date: Timestamp) -> Self {
        Self {
            id,
            word: word.to_string(),
            definition: definition.to_string(),
            date,
            extra: serde_json::Value::Null,
        }
    }
}

/// Outcome of matching one typed syllable against one syllable of a
/// candidate word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The typed syllable cannot grow into the candidate's syllable.
    None,
    /// The typed syllable is exactly the candidate's syllable.
    Exact,
    /// The typed syllable is an unfinished prefix of the candidate's
    /// syllable (the user is mid-keystroke).
    Part,
}
