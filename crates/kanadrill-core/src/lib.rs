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

//! kanadrill-core: Core library for the kanadrill kana trainer.
//!
//! This library provides the adaptive item-selection engine:
//! - Parsing the tab-separated kana catalog
//! - The deck model with per-item performance stats
//! - The weighting function and weighted-random picker
//! - The result applier
//! - The per-mode statistics ledger
//!
//! Everything here is pure and synchronous; the shell owns the current
//! deck snapshot and all I/O.

pub mod catalog;
pub mod deck;
pub mod error;
pub mod ledger;
pub mod rng;
pub mod srs;
pub mod types;

// Re-exports for convenience
pub use catalog::{SymbolRow, parse_catalog};
pub use deck::{Answer, Deck, DeckItem, ItemStats, apply_result};
pub use error::{ErrorReport, Fallible, fail};
pub use ledger::{Direction, LedgerKey, ModeLedger, Tally, bump};
pub use rng::TinyRng;
pub use srs::{QuizPick, Side, pick, weight};
pub use types::timestamp::Timestamp;
