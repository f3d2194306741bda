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

use clap::Parser;

use kanadrill_core::error::Fallible;
use kanadrill_core::ledger::Direction;

use crate::cmd::drill::DrillOptions;
use crate::cmd::drill::run_drill;
use crate::cmd::reset::run_reset;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::config::Config;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Run a drill session in the terminal.
    Drill {
        /// Path to the catalog TSV file. Used only when there is no saved deck.
        #[arg(long)]
        catalog: Option<String>,
        /// Path to the progress database.
        #[arg(long)]
        store: Option<String>,
        /// Quiz direction: r2k (romaji to kana) or k2r (kana to romaji).
        #[arg(long, value_parser = parse_direction)]
        direction: Option<Direction>,
        /// Number of answers in a session. Default is 20.
        #[arg(long)]
        target: Option<usize>,
        /// Seed for the card picker. By default, seeded from the clock.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print deck statistics and the per-mode tallies.
    Stats {
        /// Path to the progress database.
        #[arg(long)]
        store: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Table)]
        format: StatsFormat,
    },
    /// Clear saved drill progress.
    Reset {
        /// Path to the progress database.
        #[arg(long)]
        store: Option<String>,
        /// Also clear the per-mode tallies.
        #[arg(long)]
        all: bool,
    },
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    s.parse::<Direction>().map_err(|e| e.to_string())
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let config = Config::load()?;
    match cli {
        Command::Drill {
            catalog,
            store,
            direction,
            target,
            seed,
        } => {
            let options = DrillOptions {
                catalog: catalog.unwrap_or_else(|| config.catalog.clone()),
                store: store.unwrap_or_else(|| config.store.clone()),
                direction: direction.unwrap_or(config.direction),
                target: target.unwrap_or(config.session_target),
                seed,
            };
            run_drill(options)
        }
        Command::Stats { store, format } => {
            print_stats(&store.unwrap_or_else(|| config.store.clone()), format)
        }
        Command::Reset { store, all } => {
            run_reset(&store.unwrap_or_else(|| config.store.clone()), all)
        }
    }
}
