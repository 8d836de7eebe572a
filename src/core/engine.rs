// src/core/engine.rs
use crate::core::collection::Collection;
use crate::core::syllable::Syllable;
use crate::core::types::{HomonymId, MatchResult};
use serde::Serialize;

/// A `!`-prefixed shortcut: typing `!lat` offers every command whose name
/// starts with "lat". Supplied as configuration at startup.
#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub url: String,
}

impl Command {
    pub fn new(name: &str, url: &str) -> Self {
        Self { name: name.to_string(), url: url.to_string() }
    }
}

/// One row of a search response, in the wire shape the browser consumes.
/// `numbers` are 1-based positions in the date-ordered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub numbers: Vec<usize>,
    pub word: String,
    pub url: String,
    pub definitions: Vec<String>,
}

/// A matched word awaiting ranking. Lower sort value is better.
struct PreResult {
    word: String,
    sort_value: u32,
    homonym: HomonymId,
}

/// Turns raw query strings into ranked result rows. Holds only the
/// command table; all card state is borrowed per call, which keeps the
/// single-owner discipline on [`Collection`] visible in the signatures.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    commands: Vec<Command>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::with_commands(vec![
            Command::new("latest", "/cards/latest"),
            Command::new("random", "/cards/random"),
            Command::new("settings", "/settings"),
            Command::new("badges", "/badges"),
        ])
    }
}

impl SearchEngine {
    pub fn with_commands(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Searches the collection for `phrase`, returning at most `limit`
    /// rows. Never fails; malformed input degrades to an empty or
    /// truncated result list.
    pub fn search(&self, collection: &Collection, phrase: &str, limit: usize) -> Vec<SearchResult> {
        if phrase.is_empty() || limit == 0 {
            return Vec::new();
        }

        if let Some(rest) = phrase.strip_prefix('!') {
            return self.search_commands(rest, limit);
        }

        if let Some(rest) = phrase.strip_prefix('#') {
            return search_by_number(collection, rest, limit);
        }

        search_words(collection, phrase, limit)
    }

    fn search_commands(&self, prefix: &str, limit: usize) -> Vec<SearchResult> {
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, command)| command.name.starts_with(prefix))
            .map(|(i, command)| SearchResult {
                numbers: vec![i + 1],
                word: format!("!{}", command.name),
                url: command.url.clone(),
                definitions: Vec::new(),
            })
            .take(limit)
            .collect()
    }
}

/// `#N` browsing: walk the date-ordered listing downward from the N-th
/// card. An unparseable N means the most recent card.
fn search_by_number(collection: &Collection, rest: &str, limit: usize) -> Vec<SearchResult> {
    let last = collection.len() as i64 - 1;
    if last < 0 {
        return Vec::new();
    }

    let target = rest.parse::<i64>().map(|n| n - 1).unwrap_or(last);
    if target == -1 {
        return Vec::new();
    }

    let high = target.min(last);
    let low = (high - limit as i64 + 1).max(0);

    let mut results = Vec::new();
    let mut index = high;
    while index >= low {
        if let Some(card) = collection.card_at_date_index(index as usize) {
            results.push(SearchResult {
                numbers: vec![index as usize + 1],
                word: card.word.clone(),
                url: format!("/cards/card/{}", card.id),
                definitions: vec![card.definition.clone()],
            });
        }
        index -= 1;
    }
    results
}

/// The general path: split the phrase into an anchor (fully typed, matched
/// literally) and a possibly-incomplete trailing syllable, then scan every
/// distinct word through the partial matcher and rank the hits.
fn search_words(collection: &Collection, phrase: &str, limit: usize) -> Vec<SearchResult> {
    let chars: Vec<char> = phrase.chars().collect();

    // potentially incomplete syllable
    let last_syllable = Syllable::decompose(chars[chars.len() - 1]);

    // characters to fully match
    let anchor: &[char] = if last_syllable.is_some() {
        &chars[..chars.len() - 1]
    } else {
        &chars
    };

    let mut pre: Vec<PreResult> = Vec::new();

    for homonym in collection.homonyms().iter() {
        let word: Vec<char> = homonym.word().chars().collect();

        let matched = match (&last_syllable, anchor.is_empty()) {
            (Some(syllable), true) => match_word_syllable(syllable, &word),
            _ => match_word_anchored(anchor, last_syllable.as_ref(), &word),
        };

        let Some((start, kind)) = matched else {
            continue;
        };

        let exact_tier = if kind == MatchResult::Exact { 0 } else { 10_000 };
        let start_tier = if start == 0 { 0 } else { 1_000 };
        let sort_value = exact_tier + start_tier + word.len() as u32;

        // stable among equal keys: ties keep homonym-id scan order
        let at = pre.partition_point(|r| r.sort_value <= sort_value);
        pre.insert(
            at,
            PreResult { word: homonym.word().to_string(), sort_value, homonym: homonym.id() },
        );
    }

    pre.truncate(limit);
    pre.iter().map(|p| expand(collection, p)).collect()
}

/// The whole query is one (possibly incomplete) syllable: find the first
/// position anywhere in the word it could match.
fn match_word_syllable(syllable: &Syllable, word: &[char]) -> Option<(usize, MatchResult)> {
    for i in 0..word.len() {
        let kind = match_syllable_at(syllable, word, i);
        if kind != MatchResult::None {
            return Some((i, kind));
        }
    }
    None
}

/// Match the anchor literally at its first occurrence, then apply the
/// partial matcher to the character right after it. Only the first anchor
/// occurrence is considered.
fn match_word_anchored(
    anchor: &[char],
    syllable: Option<&Syllable>,
    word: &[char],
) -> Option<(usize, MatchResult)> {
    let start = word.windows(anchor.len()).position(|window| window == anchor)?;

    match syllable {
        None => Some((start, MatchResult::Exact)),
        Some(syllable) => {
            let kind = match_syllable_at(syllable, word, start + anchor.len());
            if kind == MatchResult::None {
                None
            } else {
                Some((start, kind))
            }
        }
    }
}

fn match_syllable_at(syllable: &Syllable, word: &[char], index: usize) -> MatchResult {
    if index >= word.len() {
        return MatchResult::None;
    }
    let Some(target) = Syllable::decompose(word[index]) else {
        return MatchResult::None;
    };
    let next = word.get(index + 1).and_then(|&c| Syllable::decompose(c));

    syllable.sub_syllable_of(&target, next.as_ref())
}

/// Expands a ranked word into its result row: one ordinal and one
/// definition per member card, in member (date) order.
fn expand(collection: &Collection, pre: &PreResult) -> SearchResult {
    let url = format!("/cards/homonym/{}", pre.homonym);

    let Some(homonym) = collection.homonyms().by_id(pre.homonym) else {
        return SearchResult {
            numbers: Vec::new(),
            word: pre.word.clone(),
            url,
            definitions: Vec::new(),
        };
    };

    SearchResult {
        numbers: homonym
            .members()
            .iter()
            .filter_map(|m| collection.date_ordinal(m.date, m.card))
            .collect(),
        word: pre.word.clone(),
        url,
        definitions: homonym
            .members()
            .iter()
            .filter_map(|m| collection.get_card(m.card).map(|c| c.definition.clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Card;

    fn sample() -> Collection {
        let mut collection = Collection::new();
        collection.insert_card(Card::new(0, "가다", "to go", 100)).unwrap();
        collection.insert_card(Card::new(1, "가게", "store", 200)).unwrap();
        collection.insert_card(Card::new(2, "나무", "tree", 300)).unwrap();
        collection
    }

    fn words(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.word.as_str()).collect()
    }

    #[test]
    fn empty_phrase_and_zero_limit_yield_nothing() {
        let engine = SearchEngine::default();
        let collection = sample();

        assert!(engine.search(&collection, "", 10).is_empty());
        assert!(engine.search(&collection, "가", 0).is_empty());
        assert!(engine.search(&Collection::new(), "가", 10).is_empty());
    }

    #[test]
    fn single_syllable_finds_both_prefixed_words() {
        let engine = SearchEngine::default();
        let collection = sample();

        let results = engine.search(&collection, "가", 10);
        assert_eq!(words(&results), vec!["가다", "가게"]);

        // exact-at-start rows carry their homonym url and date ordinals
        assert_eq!(results[0].url, "/cards/homonym/0");
        assert_eq!(results[0].numbers, vec![1]);
        assert_eq!(results[0].definitions, vec!["to go"]);
    }

    #[test]
    fn trailing_syllable_narrows_the_candidates() {
        let engine = SearchEngine::default();
        let collection = sample();

        // ㄱ after 가 can only start 게
        assert_eq!(words(&engine.search(&collection, "가ㄱ", 10)), vec!["가게"]);
        // ㅁ after 나 is an unfinished 무
        assert_eq!(words(&engine.search(&collection, "나ㅁ", 10)), vec!["나무"]);
        assert_eq!(words(&engine.search(&collection, "나민", 10)), Vec::<&str>::new());
    }

    #[test]
    fn syllable_matches_anywhere_in_the_word() {
        let engine = SearchEngine::default();
        let collection = sample();

        // 무 only occurs mid-word in 나무
        let results = engine.search(&collection, "무", 10);
        assert_eq!(words(&results), vec!["나무"]);
    }

    #[test]
    fn exact_and_start_anchored_rank_first() {
        let engine = SearchEngine::default();
        let mut collection = sample();
        collection.insert_card(Card::new(3, "맛없다", "tasteless", 400)).unwrap();
        collection.insert_card(Card::new(4, "없다", "to not exist", 500)).unwrap();

        let results = engine.search(&collection, "없다", 10);
        // start-anchored exact match beats the mid-word one
        assert_eq!(words(&results), vec!["없다", "맛없다"]);
    }

    #[test]
    fn shorter_words_win_within_a_tier() {
        let engine = SearchEngine::default();
        let mut collection = Collection::new();
        collection.insert_card(Card::new(0, "가르치다", "to teach", 1)).unwrap();
        collection.insert_card(Card::new(1, "가다", "to go", 2)).unwrap();

        assert_eq!(words(&engine.search(&collection, "가", 10)), vec!["가다", "가르치다"]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let engine = SearchEngine::default();
        let collection = sample();

        let first = engine.search(&collection, "가", 10);
        let second = engine.search(&collection, "가", 10);
        assert_eq!(first, second);
    }

    #[test]
    fn limit_truncates_after_ranking() {
        let engine = SearchEngine::default();
        let collection = sample();

        let results = engine.search(&collection, "가", 1);
        assert_eq!(words(&results), vec!["가다"]);
    }

    #[test]
    fn homonym_rows_list_every_member() {
        let engine = SearchEngine::default();
        let mut collection = sample();
        collection.insert_card(Card::new(3, "가다", "to go (2)", 400)).unwrap();

        let results = engine.search(&collection, "가다", 10);
        assert_eq!(results[0].numbers, vec![1, 4]);
        assert_eq!(results[0].definitions, vec!["to go", "to go (2)"]);
    }

    #[test]
    fn removed_words_stop_matching() {
        let engine = SearchEngine::default();
        let mut collection = sample();

        collection.remove_card(2);
        assert!(engine.search(&collection, "나무", 10).is_empty());
    }

    #[test]
    fn command_queries_prefix_match_the_table() {
        let engine = SearchEngine::default();
        let collection = sample();

        let results = engine.search(&collection, "!", 10);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].word, "!latest");
        assert_eq!(results[0].numbers, vec![1]);
        assert_eq!(results[0].url, "/cards/latest");

        let results = engine.search(&collection, "!ba", 10);
        assert_eq!(words(&results), vec!["!badges"]);
        assert_eq!(results[0].numbers, vec![4]);

        assert!(engine.search(&collection, "!zzz", 10).is_empty());
    }

    fn ten_cards() -> Collection {
        let mut collection = Collection::new();
        for i in 0..10u32 {
            let word = format!("단어{i}");
            let definition = format!("word {i}");
            collection
                .insert_card(Card::new(i, &word, &definition, 1000 + i as i64))
                .unwrap();
        }
        collection
    }

    #[test]
    fn number_queries_walk_backwards_from_the_target() {
        let engine = SearchEngine::default();
        let collection = ten_cards();

        let results = engine.search(&collection, "#7", 3);
        let numbers: Vec<usize> = results.iter().map(|r| r.numbers[0]).collect();
        assert_eq!(numbers, vec![7, 6, 5]);
        assert_eq!(results[0].url, "/cards/card/6");
        assert_eq!(results[0].definitions, vec!["word 6"]);
    }

    #[test]
    fn unparseable_numbers_default_to_the_most_recent() {
        let engine = SearchEngine::default();
        let collection = ten_cards();

        let results = engine.search(&collection, "#1x", 5);
        let numbers: Vec<usize> = results.iter().map(|r| r.numbers[0]).collect();
        assert_eq!(numbers, vec![10, 9, 8, 7, 6]);
    }

    #[test]
    fn number_queries_clamp_at_both_ends() {
        let engine = SearchEngine::default();
        let collection = ten_cards();

        // past the end clamps to the last card
        let results = engine.search(&collection, "#99", 3);
        let numbers: Vec<usize> = results.iter().map(|r| r.numbers[0]).collect();
        assert_eq!(numbers, vec![10, 9, 8]);

        // near the start stops at the first card
        let results = engine.search(&collection, "#2", 5);
        let numbers: Vec<usize> = results.iter().map(|r| r.numbers[0]).collect();
        assert_eq!(numbers, vec![2, 1]);

        assert!(engine.search(&collection, "#0", 5).is_empty());
    }

    #[test]
    fn result_rows_serialize_to_the_wire_shape() {
        let engine = SearchEngine::default();
        let collection = sample();

        let results = engine.search(&collection, "나무", 10);
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "numbers": [3],
                "word": "나무",
                "url": "/cards/homonym/2",
                "definitions": ["tree"]
            }])
        );
    }
}
