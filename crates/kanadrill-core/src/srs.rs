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

//! Adaptive item selection: the weighting function and the
//! weighted-random picker.

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::catalog::SymbolRow;
use crate::deck::Deck;
use crate::deck::DeckItem;
use crate::deck::ItemStats;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::types::timestamp::Timestamp;

/// The floor below which no item's weight may drop, so no item becomes
/// permanently unreachable.
const MIN_WEIGHT: f64 = 0.2;

/// Priority points added per wrong answer.
const WRONG_BOOST: f64 = 3.0;

/// Priority points removed per correct answer.
const CORRECT_PENALTY: f64 = 0.5;

/// Cap on the recency boost. A never-seen item gets the cap, not an
/// unbounded boost.
const MAX_RECENCY_BOOST: f64 = 5.0;

/// Minutes of no exposure per point of recency boost. The cap is
/// reached after 50 minutes unseen.
const MINUTES_PER_POINT: f64 = 10.0;

/// The selection priority of one item: wrong answers dominate the
/// signal, correct answers decay priority gently, and items unseen for
/// a while regain priority up to a cap.
pub fn weight(stats: &ItemStats, now: Timestamp) -> f64 {
    let base = 1.0;
    let wrong_boost = f64::from(stats.wrong) * WRONG_BOOST;
    let correct_penalty = f64::from(stats.correct) * CORRECT_PENALTY;
    let minutes_since = now.minutes_since(stats.last_seen_at);
    let recency_boost = (minutes_since / MINUTES_PER_POINT).min(MAX_RECENCY_BOOST);
    (base + wrong_boost + recency_boost - correct_penalty).max(MIN_WEIGHT)
}

/// Which of the two script variants is being tested.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Hiragana,
    Katakana,
}

impl Side {
    pub fn as_str(&self) -> &str {
        match self {
            Side::Hiragana => "hiragana",
            Side::Katakana => "katakana",
        }
    }

    /// The text of this side for a given row.
    pub fn of<'a>(&self, row: &'a SymbolRow) -> &'a str {
        match self {
            Side::Hiragana => &row.hiragana,
            Side::Katakana => &row.katakana,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hiragana" => Ok(Side::Hiragana),
            "katakana" => Ok(Side::Katakana),
            _ => fail(format!("invalid side: '{s}'")),
        }
    }
}

/// The transient result of selection: one deck item and the side to
/// quiz. Not persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuizPick<'a> {
    pub item: &'a DeckItem,
    pub side: Side,
}

/// Choose the next item by weighted-random sampling over the deck, and
/// flip an unbiased coin for the side. Side and item selection are
/// independent draws. The deck must be non-empty.
pub fn pick<'a>(deck: &'a Deck, now: Timestamp, rng: &mut TinyRng) -> Fallible<QuizPick<'a>> {
    if deck.is_empty() {
        return fail("cannot pick from an empty deck");
    }
    let side = if rng.next_f64() < 0.5 {
        Side::Hiragana
    } else {
        Side::Katakana
    };
    let weights: Vec<f64> = deck
        .items()
        .iter()
        .map(|item| weight(&item.stats, now))
        .collect();
    let total: f64 = weights.iter().sum();
    let mut remainder = rng.next_f64() * total;
    for (item, w) in deck.items().iter().zip(&weights) {
        remainder -= w;
        if remainder <= 0.0 {
            return Ok(QuizPick { item, side });
        }
    }
    // Floating-point drift can leave a residual after the scan; the
    // last item absorbs it, guaranteeing termination.
    let item = &deck.items()[deck.len() - 1];
    Ok(QuizPick { item, side })
}
