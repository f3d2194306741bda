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

//! The per-mode statistics ledger: a tally keyed by (direction, side,
//! item), orthogonal to the deck's own stats.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::deck::Answer;
use crate::error::ErrorReport;
use crate::error::fail;
use crate::srs::Side;

/// Which quiz mode is active.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Direction {
    /// Romaji is shown; the learner produces the kana.
    #[serde(rename = "R2K")]
    RomajiToKana,
    /// Kana is shown; the learner produces the romaji.
    #[serde(rename = "K2R")]
    KanaToRomaji,
}

impl Direction {
    pub fn as_str(&self) -> &str {
        match self {
            Direction::RomajiToKana => "R2K",
            Direction::KanaToRomaji => "K2R",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "R2K" => Ok(Direction::RomajiToKana),
            "K2R" => Ok(Direction::KanaToRomaji),
            _ => fail(format!("invalid direction: '{s}'")),
        }
    }
}

/// Identity of one ledger tally. In memory it is a structured key;
/// persisted blobs render it as the composite string
/// `"<direction>:<side>:<id>"`. Romaji never contains a colon, so the
/// rendering is unambiguous.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LedgerKey {
    pub direction: Direction,
    pub side: Side,
    pub item_id: String,
}

impl LedgerKey {
    pub fn new(direction: Direction, side: Side, item_id: impl Into<String>) -> Self {
        LedgerKey {
            direction,
            side,
            item_id: item_id.into(),
        }
    }
}

impl Display for LedgerKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.direction, self.side, self.item_id)
    }
}

impl TryFrom<String> for LedgerKey {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut parts = value.splitn(3, ':');
        let (Some(direction), Some(side), Some(item_id)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(ErrorReport::new(format!("malformed ledger key: '{value}'")));
        };
        Ok(LedgerKey {
            direction: direction.parse()?,
            side: side.parse()?,
            item_id: item_id.to_string(),
        })
    }
}

impl From<LedgerKey> for String {
    fn from(key: LedgerKey) -> String {
        key.to_string()
    }
}

/// A correct/wrong tally.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub wrong: u32,
}

/// The full set of per-(direction, side, item) tallies. Grows
/// monotonically; nothing prunes it short of an explicit clear in the
/// shell.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeLedger {
    entries: BTreeMap<LedgerKey, Tally>,
}

impl ModeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tally under a key; missing entries read as zero.
    pub fn get(&self, key: &LedgerKey) -> Tally {
        self.entries.get(key).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LedgerKey, &Tally)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Record a judgment under (direction, side, item), returning a new
/// ledger. Missing entries start from zero. The caller is responsible
/// for only passing ids that exist in its deck; the ledger itself has
/// no deck to check against.
pub fn bump(
    ledger: &ModeLedger,
    direction: Direction,
    side: Side,
    item_id: &str,
    result: Answer,
) -> ModeLedger {
    let key = LedgerKey::new(direction, side, item_id);
    let mut entries = ledger.entries.clone();
    let tally = entries.entry(key).or_default();
    match result {
        Answer::Correct => tally.correct += 1,
        Answer::Wrong => tally.wrong += 1,
    }
    ModeLedger { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_bump_round_trip() {
        let ledger = ModeLedger::new();
        let ledger = bump(
            &ledger,
            Direction::RomajiToKana,
            Side::Hiragana,
            "ka",
            Answer::Correct,
        );
        let ledger = bump(
            &ledger,
            Direction::RomajiToKana,
            Side::Hiragana,
            "ka",
            Answer::Wrong,
        );
        let key = LedgerKey::new(Direction::RomajiToKana, Side::Hiragana, "ka");
        assert_eq!(ledger.get(&key), Tally { correct: 1, wrong: 1 });
    }

    #[test]
    fn test_unrelated_keys_unaffected() {
        let ledger = bump(
            &ModeLedger::new(),
            Direction::RomajiToKana,
            Side::Hiragana,
            "ka",
            Answer::Correct,
        );
        let other = LedgerKey::new(Direction::KanaToRomaji, Side::Hiragana, "ka");
        assert_eq!(ledger.get(&other), Tally::default());
        let other = LedgerKey::new(Direction::RomajiToKana, Side::Katakana, "ka");
        assert_eq!(ledger.get(&other), Tally::default());
        let other = LedgerKey::new(Direction::RomajiToKana, Side::Hiragana, "ki");
        assert_eq!(ledger.get(&other), Tally::default());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_bump_is_pure() {
        let before = ModeLedger::new();
        let _ = bump(
            &before,
            Direction::KanaToRomaji,
            Side::Katakana,
            "a",
            Answer::Wrong,
        );
        assert!(before.is_empty());
    }

    #[test]
    fn test_key_string_round_trip() -> Fallible<()> {
        let key = LedgerKey::new(Direction::KanaToRomaji, Side::Katakana, "shi");
        assert_eq!(key.to_string(), "K2R:katakana:shi");
        let back = LedgerKey::try_from("K2R:katakana:shi".to_string())?;
        assert_eq!(back, key);
        Ok(())
    }

    #[test]
    fn test_malformed_key_is_rejected() {
        assert!(LedgerKey::try_from("R2K:hiragana".to_string()).is_err());
        assert!(LedgerKey::try_from("X2Y:hiragana:ka".to_string()).is_err());
        assert!(LedgerKey::try_from("R2K:kanji:ka".to_string()).is_err());
    }

    #[test]
    fn test_serde_uses_composite_string_keys() -> Fallible<()> {
        // The persisted format is a JSON object keyed by the composite
        // string, matching the original storage blobs.
        let ledger = bump(
            &ModeLedger::new(),
            Direction::RomajiToKana,
            Side::Hiragana,
            "ka",
            Answer::Correct,
        );
        let json = serde_json::to_string(&ledger)?;
        assert_eq!(json, r#"{"R2K:hiragana:ka":{"correct":1,"wrong":0}}"#);
        let back: ModeLedger = serde_json::from_str(&json)?;
        assert_eq!(back, ledger);
        Ok(())
    }
}
