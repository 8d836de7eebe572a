// src/core/collection.rs
use crate::core::homonyms::{Homonym, Homonyms};
use crate::core::types::{Card, CardId, HomonymId, Timestamp};

/// Entry of the date-ordered listing. Dates can collide, so the card id
/// breaks ties and makes the key unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct DateKey {
    date: Timestamp,
    card: CardId,
}

/// The owner of all card state: the cards themselves sorted by id, a
/// parallel listing sorted by creation date, and the word index. Every
/// mutation goes through `&mut self`, so exclusive access (one writer, or
/// one coarse lock around the whole collection) is enforced by the type.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Sorted by id. This array owns the cards.
    cards: Vec<Card>,
    /// Sorted by (date, id); positions here are the user-facing ordinals.
    date_order: Vec<DateKey>,
    homonyms: Homonyms,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards. Equals the date-ordered listing length.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The id a caller following the "next free id" policy would assign.
    pub fn next_card_id(&self) -> CardId {
        self.cards.last().map_or(0, |c| c.id + 1)
    }

    fn index_of(&self, id: CardId) -> Result<usize, usize> {
        self.cards.binary_search_by_key(&id, |c| c.id)
    }

    fn date_index_of(&self, key: DateKey) -> Result<usize, usize> {
        self.date_order.binary_search(&key)
    }

    /// Inserts a card into both orderings and the word index, returning
    /// the id of the homonym it joined. Returns `None` when a card with
    /// the same id already exists; nothing is modified in that case.
    pub fn insert_card(&mut self, card: Card) -> Option<HomonymId> {
        let Err(index) = self.index_of(card.id) else {
            return None;
        };

        let key = DateKey { date: card.date, card: card.id };
        let date_index = self.date_index_of(key).unwrap_or_else(|at| at);
        self.date_order.insert(date_index, key);

        let homonym = self.homonyms.add_card(&card);
        self.cards.insert(index, card);
        Some(homonym)
    }

    pub fn get_card(&self, id: CardId) -> Option<&Card> {
        let index = self.index_of(id).ok()?;
        Some(&self.cards[index])
    }

    /// Removes a card from both orderings and its homonym, returning the
    /// card, or `None` if the id is unknown.
    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let index = self.index_of(id).ok()?;
        let card = self.cards.remove(index);

        let key = DateKey { date: card.date, card: card.id };
        if let Ok(date_index) = self.date_index_of(key) {
            self.date_order.remove(date_index);
        }
        self.homonyms.remove_card(&card);

        Some(card)
    }

    /// Changes a card's word, moving it between homonyms. Renaming to the
    /// word the card already has is a no-op. Returns the card's (possibly
    /// new) homonym id, or `None` if the id is unknown.
    pub fn rename_card(&mut self, id: CardId, new_word: &str) -> Option<HomonymId> {
        let index = self.index_of(id).ok()?;

        let old_word = std::mem::replace(&mut self.cards[index].word, new_word.to_string());
        self.homonyms.rename_card(&self.cards[index], &old_word)
    }

    /// Replaces a card's definition text. Returns false if the id is
    /// unknown.
    pub fn set_definition(&mut self, id: CardId, definition: &str) -> bool {
        let Ok(index) = self.index_of(id) else {
            return false;
        };
        self.cards[index].definition = definition.to_string();
        true
    }

    /// 1-based position of a card in the date-ordered listing, the number
    /// shown to the user.
    pub fn date_ordinal(&self, date: Timestamp, id: CardId) -> Option<usize> {
        let index = self.date_index_of(DateKey { date, card: id }).ok()?;
        Some(index + 1)
    }

    /// The card at a 0-based position of the date-ordered listing.
    pub fn card_at_date_index(&self, index: usize) -> Option<&Card> {
        let key = self.date_order.get(index)?;
        self.get_card(key.card)
    }

    pub fn homonyms(&self) -> &Homonyms {
        &self.homonyms
    }

    pub fn homonym_of(&self, word: &str) -> Option<&Homonym> {
        self.homonyms.by_word(word)
    }

    /// All cards in id order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Collection {
        let mut collection = Collection::new();
        // ids out of date order on purpose
        collection.insert_card(Card::new(0, "가다", "to go", 300)).unwrap();
        collection.insert_card(Card::new(1, "나무", "tree", 100)).unwrap();
        collection.insert_card(Card::new(2, "가다", "to go (2)", 200)).unwrap();
        collection
    }

    #[test]
    fn keeps_both_orderings() {
        let collection = filled();

        let ids: Vec<CardId> = collection.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        let by_date: Vec<CardId> = (0..collection.len())
            .map(|i| collection.card_at_date_index(i).unwrap().id)
            .collect();
        assert_eq!(by_date, vec![1, 2, 0]);

        assert_eq!(collection.date_ordinal(100, 1), Some(1));
        assert_eq!(collection.date_ordinal(300, 0), Some(3));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut collection = filled();
        assert!(collection.insert_card(Card::new(1, "딴말", "other", 999)).is_none());
        assert_eq!(collection.len(), 3);
        // the duplicate left no trace in the date ordering
        assert_eq!(collection.date_ordinal(999, 1), None);
    }

    #[test]
    fn removal_updates_everything() {
        let mut collection = filled();

        let removed = collection.remove_card(2).unwrap();
        assert_eq!(removed.word, "가다");

        assert_eq!(collection.len(), 2);
        assert!(collection.get_card(2).is_none());
        assert_eq!(collection.date_ordinal(200, 2), None);
        // the other 가다 card keeps the homonym alive
        assert_eq!(collection.homonym_of("가다").unwrap().members().len(), 1);

        assert!(collection.remove_card(2).is_none());
    }

    #[test]
    fn rename_moves_between_homonyms() {
        let mut collection = filled();

        let new_id = collection.rename_card(1, "가다").unwrap();
        assert_eq!(new_id, collection.homonym_of("가다").unwrap().id());
        assert!(collection.homonym_of("나무").is_none());
        assert_eq!(collection.homonym_of("가다").unwrap().members().len(), 3);

        assert!(collection.rename_card(77, "없다").is_none());
    }

    #[test]
    fn next_card_id_follows_the_highest() {
        let mut collection = Collection::new();
        assert_eq!(collection.next_card_id(), 0);

        collection.insert_card(Card::new(4, "가다", "to go", 1)).unwrap();
        assert_eq!(collection.next_card_id(), 5);
    }

    #[test]
    fn edits_definitions_in_place() {
        let mut collection = filled();
        assert!(collection.set_definition(1, "나무 (tree)"));
        assert_eq!(collection.get_card(1).unwrap().definition, "나무 (tree)");
        assert!(!collection.set_definition(99, "x"));
    }
}
