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

/// One row of the kana catalog: a romanized transliteration and its two
/// script variants. Immutable once parsed.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SymbolRow {
    /// Stable identity, equal to the romaji.
    pub id: String,
    pub romaji: String,
    pub hiragana: String,
    pub katakana: String,
}

/// Parse the tab-separated catalog format: one symbol per line, fields
/// in the order romaji, hiragana, katakana. Lines are trimmed; blank
/// lines and lines with fewer than three non-empty fields are silently
/// skipped. Extra fields are ignored. Rows keep their source order and
/// ids are not deduplicated.
pub fn parse_catalog(text: &str) -> Vec<SymbolRow> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t').map(str::trim);
        let (Some(romaji), Some(hiragana), Some(katakana)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        if romaji.is_empty() || hiragana.is_empty() || katakana.is_empty() {
            continue;
        }
        rows.push(SymbolRow {
            id: romaji.to_string(),
            romaji: romaji.to_string(),
            hiragana: hiragana.to_string(),
            katakana: katakana.to_string(),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(parse_catalog("").len(), 0);
    }

    #[test]
    fn test_whitespace_string() {
        assert_eq!(parse_catalog("\n  \n\t\n").len(), 0);
    }

    #[test]
    fn test_two_rows() {
        let rows = parse_catalog("a\tあ\tア\nka\tか\tカ");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "a");
        assert_eq!(rows[0].hiragana, "あ");
        assert_eq!(rows[0].katakana, "ア");
        assert_eq!(rows[1].id, "ka");
    }

    #[test]
    fn test_missing_field_is_skipped() {
        let rows = parse_catalog("a\tあ");
        assert_eq!(rows.len(), 0);
    }

    #[test]
    fn test_empty_field_is_skipped() {
        let rows = parse_catalog("a\t\tア\nka\tか\tカ");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "ka");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let rows = parse_catalog(" a \t あ \t ア \r\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].romaji, "a");
        assert_eq!(rows[0].hiragana, "あ");
        assert_eq!(rows[0].katakana, "ア");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let rows = parse_catalog("a\tあ\tア\tgojuon\tvowel");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].katakana, "ア");
    }

    #[test]
    fn test_source_order_preserved() {
        let rows = parse_catalog("ka\tか\tカ\n\na\tあ\tア\n");
        assert_eq!(rows[0].id, "ka");
        assert_eq!(rows[1].id, "a");
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        // The catalog does not deduplicate; both rows become deck
        // entries with the same id.
        let rows = parse_catalog("ka\tか\tカ\nka\tか\tカ");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, rows[1].id);
    }
}
