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

use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use kanadrill_core::deck::Deck;
use kanadrill_core::error::Fallible;
use kanadrill_core::ledger::ModeLedger;

use crate::store::Store;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// Human-readable table.
    Table,
    /// Machine-readable JSON.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Table => write!(f, "table"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(store_path: &str, format: StatsFormat) -> Fallible<()> {
    let store = Store::open(Path::new(store_path))?;
    let deck = store.load_deck()?;
    let ledger = store.load_ledger()?;
    match format {
        StatsFormat::Table => print_table(deck.as_ref(), &ledger),
        StatsFormat::Json => print_json(deck.as_ref(), &ledger)?,
    }
    Ok(())
}

fn print_table(deck: Option<&Deck>, ledger: &ModeLedger) {
    match deck {
        None => println!("No saved deck."),
        Some(deck) => {
            println!("Deck ({} items):", deck.len());
            for item in deck.items() {
                let stats = &item.stats;
                println!(
                    "  {:<8} {:>4} correct {:>4} wrong   last seen {}",
                    item.row.id, stats.correct, stats.wrong, stats.last_seen_at
                );
            }
        }
    }
    if ledger.is_empty() {
        println!("No mode tallies.");
        return;
    }
    println!("Mode tallies:");
    for (key, tally) in ledger.iter() {
        let total = tally.correct + tally.wrong;
        let pct = 100.0 * f64::from(tally.correct) / f64::from(total);
        println!(
            "  {:<24} {:>4}/{:<4} ({pct:.0}%)",
            key.to_string(),
            tally.correct,
            total
        );
    }
}

fn print_json(deck: Option<&Deck>, ledger: &ModeLedger) -> Fallible<()> {
    #[derive(Serialize)]
    struct StatsReport<'a> {
        deck: Option<&'a Deck>,
        modes: &'a ModeLedger,
    }
    let report = StatsReport {
        deck,
        modes: ledger,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
