// src/core/homonyms.rs
use crate::core::types::{Card, CardId, HomonymId, Timestamp};
use std::collections::HashMap;

/// One member of a homonym group: the card's identity plus the creation
/// date the group orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub card: CardId,
    pub date: Timestamp,
}

/// A group of cards sharing the same exact word text. The id is assigned
/// once and never reused; a group whose last member was removed stays in
/// the id-ordered listing as an empty tombstone.
#[derive(Debug, Clone)]
pub struct Homonym {
    id: HomonymId,
    word: String,
    /// Sorted by (date, card id).
    members: Vec<Member>,
}

impl Homonym {
    pub fn id(&self) -> HomonymId {
        self.id
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    fn is_tombstone(&self) -> bool {
        self.members.is_empty()
    }

    fn insert_member(&mut self, card: &Card) {
        let member = Member { card: card.id, date: card.date };
        let at = self
            .members
            .partition_point(|m| (m.date, m.card) < (member.date, member.card));
        self.members.insert(at, member);
    }
}

/// The word index: every distinct word text maps to a [`Homonym`] with a
/// stable numeric identity. Lookup goes two ways, by word through a hash
/// map and by id through binary search over the id-ordered listing.
#[derive(Debug, Clone, Default)]
pub struct Homonyms {
    map: HashMap<String, HomonymId>,
    /// Sorted by id. Entries get deleted in place; empty member lists are
    /// left behind so later ids keep their positions.
    list: Vec<Homonym>,
}

impl Homonyms {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> HomonymId {
        self.list.last().map_or(0, |h| h.id + 1)
    }

    fn index_of(&self, id: HomonymId) -> Result<usize, usize> {
        self.list.binary_search_by_key(&id, |h| h.id)
    }

    /// Inserts a card under its word, creating the homonym if the word has
    /// not been seen before, and returns the homonym's id.
    pub fn add_card(&mut self, card: &Card) -> HomonymId {
        if let Some(&id) = self.map.get(&card.word) {
            if let Ok(index) = self.index_of(id) {
                self.list[index].insert_member(card);
                return id;
            }
        }

        let id = self.next_id();
        let mut homonym = Homonym { id, word: card.word.clone(), members: Vec::new() };
        homonym.insert_member(card);

        // next_id is past every existing id, so the sorted position is the end
        self.list.push(homonym);
        self.map.insert(card.word.clone(), id);
        id
    }

    /// Drops the card from the homonym holding its word. When the last
    /// member goes, the word lookup is dropped too; the listing entry
    /// stays behind as a tombstone.
    ///
    /// Returns false if no homonym holds the card's word.
    pub fn remove_card(&mut self, card: &Card) -> bool {
        let Some(&id) = self.map.get(&card.word) else {
            return false;
        };
        let Ok(index) = self.index_of(id) else {
            return false;
        };

        let homonym = &mut self.list[index];
        homonym.members.retain(|m| m.card != card.id);

        if homonym.is_tombstone() {
            self.map.remove(&card.word);
        }
        true
    }

    /// Moves a card from the homonym of `old_word` to the homonym of its
    /// current word. The card must already carry the new word text. A
    /// rename to the same word is a no-op. Returns the card's (possibly
    /// new) homonym id, or `None` if `old_word` has no homonym.
    pub fn rename_card(&mut self, card: &Card, old_word: &str) -> Option<HomonymId> {
        let &old_id = self.map.get(old_word)?;
        if card.word == old_word {
            return Some(old_id);
        }

        if let Ok(index) = self.index_of(old_id) {
            let homonym = &mut self.list[index];
            homonym.members.retain(|m| m.card != card.id);
            if homonym.is_tombstone() {
                self.map.remove(old_word);
            }
        }

        Some(self.add_card(card))
    }

    /// Looks a homonym up by id. Tombstones read as not found.
    pub fn by_id(&self, id: HomonymId) -> Option<&Homonym> {
        let index = self.index_of(id).ok()?;
        let homonym = &self.list[index];
        if homonym.is_tombstone() {
            None
        } else {
            Some(homonym)
        }
    }

    /// Looks a homonym up by its exact word text.
    pub fn by_word(&self, word: &str) -> Option<&Homonym> {
        let &id = self.map.get(word)?;
        let index = self.index_of(id).ok()?;
        Some(&self.list[index])
    }

    /// Iterates live homonyms in id order, skipping tombstones.
    pub fn iter(&self) -> impl Iterator<Item = &Homonym> {
        self.list.iter().filter(|h| !h.is_tombstone())
    }

    /// Number of live homonyms. Not the listing length, which also counts
    /// tombstones.
    pub fn live_len(&self) -> usize {
        self.map.len()
    }
}
