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

//! The interactive drill session: the imperative shell that owns the
//! current deck snapshot and drives the core. In R2K mode the learner
//! recalls the kana, reveals it, and judges themselves; in K2R mode the
//! typed romaji is judged automatically.

use std::fs::read_to_string;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::Path;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use kanadrill_core::catalog::parse_catalog;
use kanadrill_core::deck::Answer;
use kanadrill_core::deck::Deck;
use kanadrill_core::deck::apply_result;
use kanadrill_core::error::Fallible;
use kanadrill_core::error::fail;
use kanadrill_core::ledger::Direction;
use kanadrill_core::ledger::ModeLedger;
use kanadrill_core::ledger::bump;
use kanadrill_core::rng::TinyRng;
use kanadrill_core::srs::QuizPick;
use kanadrill_core::srs::pick;
use kanadrill_core::types::timestamp::Timestamp;

use crate::store::Store;

pub struct DrillOptions {
    pub catalog: String,
    pub store: String,
    pub direction: Direction,
    pub target: usize,
    pub seed: Option<u64>,
}

pub fn run_drill(options: DrillOptions) -> Fallible<()> {
    let store = Store::open(Path::new(&options.store))?;

    // Use the saved deck if there is one; otherwise seed a fresh deck
    // from the catalog. Seeding is what establishes the non-empty-deck
    // invariant the picker relies on.
    let deck = match store.load_deck()? {
        Some(deck) if !deck.is_empty() => deck,
        _ => {
            let text = read_to_string(&options.catalog)?;
            let rows = parse_catalog(&text);
            if rows.is_empty() {
                return fail(format!(
                    "catalog '{}' contains no usable rows",
                    options.catalog
                ));
            }
            let deck = Deck::seed(rows);
            store.save_deck(&deck)?;
            log::debug!("seeded a fresh deck of {} items", deck.len());
            deck
        }
    };
    let ledger = store.load_ledger()?;

    let seed = match options.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1),
    };
    let mut rng = TinyRng::from_seed(seed);

    let mut session = Session {
        store,
        deck,
        ledger,
        direction: options.direction,
        correct: 0,
        wrong: 0,
    };
    println!(
        "Drilling {} items ({}). Answer 'q' to stop early.",
        session.deck.len(),
        options.direction
    );
    for _ in 0..options.target {
        if !session.round(&mut rng)? {
            break;
        }
    }
    session.summary();
    Ok(())
}

/// Session state. The session is the sole holder of the current deck
/// and ledger snapshots; each judgment replaces them wholesale.
struct Session {
    store: Store,
    deck: Deck,
    ledger: ModeLedger,
    direction: Direction,
    correct: u32,
    wrong: u32,
}

impl Session {
    /// Run one round. Returns false when the learner quits or input
    /// ends.
    fn round(&mut self, rng: &mut TinyRng) -> Fallible<bool> {
        let QuizPick { item, side } = pick(&self.deck, Timestamp::now(), rng)?;
        let id = item.row.id.clone();
        let romaji = item.row.romaji.clone();
        let kana = side.of(&item.row).to_string();
        log::debug!("picked '{id}' ({side})");

        let result = match self.direction {
            Direction::RomajiToKana => {
                let Some(line) = ask(&format!("{romaji} in {side}? [Enter to reveal] "))? else {
                    return Ok(false);
                };
                if line == "q" {
                    return Ok(false);
                }
                println!("  -> {kana}");
                match self.ask_self_judgment()? {
                    Some(answer) => answer,
                    None => return Ok(false),
                }
            }
            Direction::KanaToRomaji => {
                let Some(line) = ask(&format!("romaji for {kana}? "))? else {
                    return Ok(false);
                };
                if line == "q" {
                    return Ok(false);
                }
                let answer = judge_romaji(&line, &romaji);
                match answer {
                    Answer::Correct => println!("  correct"),
                    Answer::Wrong => println!("  wrong, it is '{romaji}'"),
                }
                answer
            }
        };

        self.deck = apply_result(&self.deck, &id, result, Timestamp::now())?;
        self.ledger = bump(&self.ledger, self.direction, side, &id, result);
        match result {
            Answer::Correct => self.correct += 1,
            Answer::Wrong => self.wrong += 1,
        }

        // Saves are best-effort: a failed write must not interrupt the
        // session.
        if let Err(e) = self.store.save_deck(&self.deck) {
            log::warn!("failed to save deck: {e}");
        }
        if let Err(e) = self.store.save_ledger(&self.ledger) {
            log::warn!("failed to save mode tallies: {e}");
        }
        Ok(true)
    }

    fn ask_self_judgment(&self) -> Fallible<Option<Answer>> {
        loop {
            let Some(line) = ask("  got it right? [y/n] ")? else {
                return Ok(None);
            };
            if line == "q" {
                return Ok(None);
            }
            if let Some(answer) = parse_self_judgment(&line) {
                return Ok(Some(answer));
            }
        }
    }

    fn summary(&self) {
        let total = self.correct + self.wrong;
        if total == 0 {
            println!("No answers recorded.");
            return;
        }
        let pct = 100.0 * f64::from(self.correct) / f64::from(total);
        println!(
            "Session over: {}/{total} correct ({pct:.0}%).",
            self.correct
        );
    }
}

/// Prompt and read one line, trimmed. Returns None at end of input.
fn ask(prompt: &str) -> Fallible<Option<String>> {
    print!("{prompt}");
    stdout().flush()?;
    let mut line = String::new();
    let n = stdin().read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Judge a typed romaji answer against the expected transliteration.
fn judge_romaji(typed: &str, expected: &str) -> Answer {
    if typed.trim().eq_ignore_ascii_case(expected) {
        Answer::Correct
    } else {
        Answer::Wrong
    }
}

/// Interpret a self-judgment line. `None` means the line was not a
/// recognized judgment and the learner should be asked again.
fn parse_self_judgment(line: &str) -> Option<Answer> {
    match line {
        "y" | "Y" | "yes" => Some(Answer::Correct),
        "n" | "N" | "no" => Some(Answer::Wrong),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_romaji() {
        assert_eq!(judge_romaji("ka", "ka"), Answer::Correct);
        assert_eq!(judge_romaji(" KA ", "ka"), Answer::Correct);
        assert_eq!(judge_romaji("ki", "ka"), Answer::Wrong);
        assert_eq!(judge_romaji("", "ka"), Answer::Wrong);
    }

    #[test]
    fn test_parse_self_judgment() {
        assert_eq!(parse_self_judgment("y"), Some(Answer::Correct));
        assert_eq!(parse_self_judgment("yes"), Some(Answer::Correct));
        assert_eq!(parse_self_judgment("N"), Some(Answer::Wrong));
        assert_eq!(parse_self_judgment("maybe"), None);
        assert_eq!(parse_self_judgment(""), None);
    }
}
