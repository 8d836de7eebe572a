// src/persistence.rs
use crate::core::collection::Collection;
use crate::core::types::{Card, CardId, Timestamp};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error, ErrorKind};
use std::path::Path;
use tempfile::NamedTempFile;

/// The durable form of one card. `extra` travels as JSON text: the
/// snapshot is bincode, a non-self-describing format that cannot carry a
/// free-form `serde_json::Value`.
#[derive(serde::Serialize, serde::Deserialize)]
struct StoredCard {
    id: CardId,
    word: String,
    definition: String,
    date: Timestamp,
    extra: String,
}

impl From<&Card> for StoredCard {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            word: card.word.clone(),
            definition: card.definition.clone(),
            date: card.date,
            extra: card.extra.to_string(),
        }
    }
}

/// The durable form of a collection. Only the cards are stored; the date
/// ordering and the homonym index are derived and get rebuilt on load.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    cards: Vec<StoredCard>,
}

/// Writes a snapshot of the collection, atomically: serialize into a temp
/// file next to the destination, then persist it over the target path.
pub fn save_to_disk(collection: &Collection, path: &Path) -> Result<(), Error> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let state = SerializableState {
        cards: collection.cards().iter().map(StoredCard::from).collect(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);

    bincode::serialize_into(writer, &state)
        .map_err(|e| Error::new(ErrorKind::Other, e))?;

    temp_file.persist(path)?;
    Ok(())
}

/// Loads a snapshot and replays every card through [`Collection`] to
/// rebuild both orderings and the word index. A snapshot holding two
/// cards with the same id is corrupt and fails the load rather than
/// dropping cards.
pub fn load_from_disk(path: &Path) -> Result<Collection, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SerializableState = bincode::deserialize_from(reader)?;

    let mut collection = Collection::new();
    for stored in state.cards {
        let mut card = Card::new(stored.id, &stored.word, &stored.definition, stored.date);
        card.extra = serde_json::from_str(&stored.extra)?;

        if collection.insert_card(card).is_none() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("duplicate card id {} in snapshot", stored.id),
            )
            .into());
        }
    }

    Ok(collection)
}
