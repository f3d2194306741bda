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

//! SQLite-backed key-value persistence for drill progress. Blobs are
//! JSON under fixed keys; absent or corrupt data reads as "nothing
//! saved", so the worst failure mode is starting over with a fresh
//! deck.

use std::path::Path;

use rusqlite::Connection;
use rusqlite::OptionalExtension;

use kanadrill_core::deck::Deck;
use kanadrill_core::error::ErrorReport;
use kanadrill_core::error::Fallible;
use kanadrill_core::ledger::ModeLedger;

/// Storage key for the deck snapshot.
const DECK_KEY: &str = "kana_deck_v1";

/// Storage key for the mode ledger.
const LEDGER_KEY: &str = "kana_mode_stats_v1";

pub struct Store {
    conn: Connection,
}

fn db_err(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

impl Store {
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            (),
        )
        .map_err(db_err)?;
        Ok(Store { conn })
    }

    fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(db_err)
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2) \
                 ON CONFLICT (key) DO UPDATE SET value = excluded.value",
                [key, value],
            )
            .map_err(db_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Fallible<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(db_err)?;
        Ok(())
    }

    /// The saved deck, if any. Corrupt data reads as absent.
    pub fn load_deck(&self) -> Fallible<Option<Deck>> {
        let Some(raw) = self.get(DECK_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(deck) => Ok(Some(deck)),
            Err(e) => {
                log::warn!("discarding corrupt deck snapshot: {e}");
                Ok(None)
            }
        }
    }

    pub fn save_deck(&self, deck: &Deck) -> Fallible<()> {
        self.set(DECK_KEY, &serde_json::to_string(deck)?)
    }

    /// The saved ledger, or an empty one. Corrupt data reads as empty.
    pub fn load_ledger(&self) -> Fallible<ModeLedger> {
        let Some(raw) = self.get(LEDGER_KEY)? else {
            return Ok(ModeLedger::new());
        };
        match serde_json::from_str(&raw) {
            Ok(ledger) => Ok(ledger),
            Err(e) => {
                log::warn!("discarding corrupt mode tallies: {e}");
                Ok(ModeLedger::new())
            }
        }
    }

    pub fn save_ledger(&self, ledger: &ModeLedger) -> Fallible<()> {
        self.set(LEDGER_KEY, &serde_json::to_string(ledger)?)
    }

    pub fn clear_deck(&self) -> Fallible<()> {
        self.remove(DECK_KEY)
    }

    pub fn clear_ledger(&self) -> Fallible<()> {
        self.remove(LEDGER_KEY)
    }
}
