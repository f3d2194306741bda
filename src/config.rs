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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use kanadrill_core::error::ErrorReport;
use kanadrill_core::error::Fallible;
use kanadrill_core::ledger::Direction;

/// Name of the optional config file, looked up in the working directory.
const CONFIG_FILE: &str = "kanadrill.toml";

const DEFAULT_CATALOG: &str = "kana.tsv";
const DEFAULT_STORE: &str = "kanadrill.db";
const DEFAULT_SESSION_TARGET: usize = 20;

/// What can be specified in `kanadrill.toml`. All fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    catalog: Option<String>,
    store: Option<String>,
    direction: Option<Direction>,
    session_target: Option<usize>,
}

/// Effective settings: defaults, overridden by `kanadrill.toml` where
/// present. CLI flags override both.
pub struct Config {
    pub catalog: String,
    pub store: String,
    pub direction: Direction,
    pub session_target: usize,
}

impl Config {
    pub fn load() -> Fallible<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    fn load_from(path: &Path) -> Fallible<Self> {
        let file: ConfigFile = if path.exists() {
            let text = read_to_string(path)?;
            toml::from_str(&text).map_err(|e| {
                ErrorReport::new(format!("failed to parse {}: {e}", path.display()))
            })?
        } else {
            ConfigFile::default()
        };
        Ok(Config {
            catalog: file.catalog.unwrap_or_else(|| DEFAULT_CATALOG.to_string()),
            store: file.store.unwrap_or_else(|| DEFAULT_STORE.to_string()),
            direction: file.direction.unwrap_or(Direction::RomajiToKana),
            session_target: file.session_target.unwrap_or(DEFAULT_SESSION_TARGET),
        })
    }
}
