// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

use crate::catalog::SymbolRow;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::timestamp::Timestamp;

/// The learner's judgment of one round.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Correct,
    Wrong,
}

impl Answer {
    pub fn as_str(&self) -> &str {
        match self {
            Answer::Correct => "correct",
            Answer::Wrong => "wrong",
        }
    }
}

/// Per-item performance counters. Created all-zero when an item enters
/// the deck and updated only by [`apply_result`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ItemStats {
    pub correct: u32,
    pub wrong: u32,
    pub last_seen_at: Timestamp,
    pub last_result: Option<Answer>,
}

/// A catalog row together with the learner's stats for it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DeckItem {
    pub row: SymbolRow,
    pub stats: ItemStats,
}

impl DeckItem {
    pub fn id(&self) -> &str {
        &self.row.id
    }
}

/// The learner's full working set. An ordered sequence of items; the
/// order is stable within a session but carries no meaning. Every
/// mutation goes through [`apply_result`], which returns a fresh
/// snapshot, so holders of an older snapshot are never surprised.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    items: Vec<DeckItem>,
}

impl Deck {
    /// Build a fresh deck from catalog rows, with all-zero stats.
    pub fn seed(rows: Vec<SymbolRow>) -> Self {
        let items = rows
            .into_iter()
            .map(|row| DeckItem {
                row,
                stats: ItemStats::default(),
            })
            .collect();
        Deck { items }
    }

    pub fn items(&self) -> &[DeckItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The first item with the given id, if any.
    pub fn find(&self, id: &str) -> Option<&DeckItem> {
        self.items.iter().find(|item| item.row.id == id)
    }
}

/// Record a judgment against an item, returning a new deck snapshot.
/// Sets `last_seen_at` and `last_result` and increments the matching
/// counter. Every item whose id matches is updated (duplicate catalog
/// ids move together); all other items are unchanged. An id not present
/// in the deck is a caller bug and is reported as an error rather than
/// silently ignored.
pub fn apply_result(
    deck: &Deck,
    item_id: &str,
    result: Answer,
    now: Timestamp,
) -> Fallible<Deck> {
    let mut matched = false;
    let items = deck
        .items
        .iter()
        .map(|item| {
            if item.row.id != item_id {
                return item.clone();
            }
            matched = true;
            let mut item = item.clone();
            item.stats.last_seen_at = now;
            item.stats.last_result = Some(result);
            match result {
                Answer::Correct => item.stats.correct += 1,
                Answer::Wrong => item.stats.wrong += 1,
            }
            item
        })
        .collect();
    if !matched {
        return fail(format!("no item with id '{item_id}' in the deck"));
    }
    Ok(Deck { items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;

    fn test_deck() -> Deck {
        Deck::seed(parse_catalog("a\tあ\tア\nka\tか\tカ\nki\tき\tキ"))
    }

    #[test]
    fn test_seed_stats_are_zero() {
        let deck = test_deck();
        assert_eq!(deck.len(), 3);
        for item in deck.items() {
            assert_eq!(item.stats.correct, 0);
            assert_eq!(item.stats.wrong, 0);
            assert_eq!(item.stats.last_seen_at, Timestamp::NEVER);
            assert_eq!(item.stats.last_result, None);
        }
    }

    #[test]
    fn test_apply_changes_exactly_one_item() -> Fallible<()> {
        let deck = test_deck();
        let now = Timestamp::from_millis(1_000_000);
        let updated = apply_result(&deck, "ka", Answer::Correct, now)?;

        let ka = updated.find("ka").unwrap();
        assert_eq!(ka.stats.correct, 1);
        assert_eq!(ka.stats.wrong, 0);
        assert_eq!(ka.stats.last_seen_at, now);
        assert_eq!(ka.stats.last_result, Some(Answer::Correct));

        // All other items are identical to the originals.
        for (before, after) in deck.items().iter().zip(updated.items()) {
            if before.row.id != "ka" {
                assert_eq!(before, after);
            }
        }
        Ok(())
    }

    #[test]
    fn test_input_deck_is_untouched() -> Fallible<()> {
        let deck = test_deck();
        let snapshot = deck.clone();
        let _ = apply_result(&deck, "a", Answer::Wrong, Timestamp::from_millis(1))?;
        assert_eq!(deck, snapshot);
        Ok(())
    }

    #[test]
    fn test_wrong_twice() -> Fallible<()> {
        let deck = test_deck();
        let t1 = Timestamp::from_millis(1_000);
        let t2 = Timestamp::from_millis(2_000);
        let deck = apply_result(&deck, "a", Answer::Wrong, t1)?;
        assert_eq!(deck.find("a").unwrap().stats.wrong, 1);
        let deck = apply_result(&deck, "a", Answer::Wrong, t2)?;
        let stats = deck.find("a").unwrap().stats;
        assert_eq!(stats.wrong, 2);
        assert!(stats.last_seen_at >= t1);
        assert_eq!(stats.last_seen_at, t2);
        Ok(())
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let deck = test_deck();
        let result = apply_result(&deck, "zz", Answer::Correct, Timestamp::from_millis(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_ids_move_together() -> Fallible<()> {
        // The catalog does not deduplicate ids. When two entries share
        // an id, a result applies to both. This documents a latent
        // ambiguity inherited from the data format, not a feature.
        let deck = Deck::seed(parse_catalog("ka\tか\tカ\nka\tか\tカ"));
        let deck = apply_result(&deck, "ka", Answer::Wrong, Timestamp::from_millis(1))?;
        assert_eq!(deck.items()[0].stats.wrong, 1);
        assert_eq!(deck.items()[1].stats.wrong, 1);
        Ok(())
    }

    #[test]
    fn test_serde_round_trip() -> Fallible<()> {
        let deck = test_deck();
        let deck = apply_result(&deck, "ki", Answer::Correct, Timestamp::from_millis(5))?;
        let json = serde_json::to_string(&deck)?;
        let back: Deck = serde_json::from_str(&json)?;
        assert_eq!(deck, back);
        Ok(())
    }

    #[test]
    fn test_answer_serde_format() -> Fallible<()> {
        // Persisted blobs use lowercase strings for results.
        assert_eq!(serde_json::to_string(&Answer::Correct)?, "\"correct\"");
        assert_eq!(serde_json::to_string(&Answer::Wrong)?, "\"wrong\"");
        Ok(())
    }
}
