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

use std::path::Path;

use kanadrill_core::error::Fallible;

use crate::store::Store;

/// Clear the saved deck; with `all`, also clear the mode tallies. The
/// next drill session reseeds from the catalog.
pub fn run_reset(store_path: &str, all: bool) -> Fallible<()> {
    let store = Store::open(Path::new(store_path))?;
    store.clear_deck()?;
    if all {
        store.clear_ledger()?;
        println!("Cleared deck progress and mode tallies.");
    } else {
        println!("Cleared deck progress.");
    }
    Ok(())
}
