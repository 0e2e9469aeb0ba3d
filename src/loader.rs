/*
loader.rs

Copyright 2025 Hervé Quatremain

This file is part of Crossgen.

Crossgen is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Crossgen is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Crossgen. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Load the word list and the clues.
//!
//! The word list is a text file with one word per line.
//!
//! The clues are extracted from the page of the game, where they are declared as a JavaScript
//! object:
//!
//! ```js
//! const KNOWN_HINTS = {
//!     "APPLE": "Red or green fruit",
//!     "RIVER": "Flows to the sea",
//! };
//! ```
//!
//! A flat JSON object (word to clue) can also be used, in a file with the `.json` extension.
//! Clues are optional: problems with the clue file are reported as warnings, and words without
//! clues get a placeholder clue.

use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::MIN_WORD_LENGTH;
use crate::error::{Error, Result};

/// Name of the JavaScript object that declares the clues.
const HINTS_OBJECT: &str = "KNOWN_HINTS";

/// Keep the lines that are words: alphabetic, and at least [`MIN_WORD_LENGTH`] letters long.
/// The words are returned in uppercase.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_uppercase())
        .filter(|w| w.len() >= MIN_WORD_LENGTH && w.bytes().all(|b| b.is_ascii_alphabetic()))
        .collect()
}

/// Read the word list.
///
/// # Errors
///
/// The function returns an error if the file cannot be read, or if it does not contain any
/// usable word.
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    let text: String = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let words: Vec<String> = parse_words(&text);
    if words.is_empty() {
        return Err(Error::EmptyWordList(path.to_path_buf()));
    }
    info!("Loaded {} words from {path:?}", words.len());
    Ok(words)
}

/// Read the clues.
///
/// Errors are logged and an empty or partial list is returned.
pub fn load_clues(path: &Path) -> HashMap<String, String> {
    let text: String = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            if e.kind() == ErrorKind::NotFound {
                warn!("Clue file {path:?} does not exist");
            } else {
                warn!("Cannot read the clue file {path:?}: {e}");
            }
            return HashMap::new();
        }
    };

    let clues: HashMap<String, String> =
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            match serde_json::from_str::<HashMap<String, String>>(&text) {
                Ok(c) => c
                    .into_iter()
                    .map(|(word, clue)| (word.trim().to_uppercase(), clue))
                    .collect(),
                Err(e) => {
                    warn!("Cannot parse the clue file {path:?}: {e}");
                    HashMap::new()
                }
            }
        } else {
            parse_known_hints(&text)
        };
    info!("Loaded {} clues from {path:?}", clues.len());
    clues
}

/// Extract the clues from the `KNOWN_HINTS` object declaration.
///
/// Parsing is best effort: an unterminated object or malformed entries are reported as warnings,
/// and the entries that could be read are returned.
pub fn parse_known_hints(text: &str) -> HashMap<String, String> {
    let Some((block, terminated)) = find_hints_block(text) else {
        warn!("No {HINTS_OBJECT} object in the clue file");
        return HashMap::new();
    };
    if !terminated {
        warn!("The {HINTS_OBJECT} object is not terminated; reading what is available");
    }

    let (clues, malformed) = parse_entries(block);
    if malformed > 0 {
        warn!("Skipped {malformed} malformed {HINTS_OBJECT} entries");
    }
    clues
}

/// Return the content between the braces of the `KNOWN_HINTS = { ... }` declaration, and whether
/// the closing brace was found.
fn find_hints_block(text: &str) -> Option<(&str, bool)> {
    let mut offset: usize = 0;
    while let Some(i) = text[offset..].find(HINTS_OBJECT) {
        offset += i + HINTS_OBJECT.len();
        let rest: &str = text[offset..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let Some(rest) = rest.trim_start().strip_prefix('{') else {
            continue;
        };
        return Some(match rest.find('}') {
            Some(end) => (&rest[..end], true),
            None => (rest, false),
        });
    }
    None
}

/// Read a double-quoted string starting at `chars[*i]`, which must be the opening quote.
///
/// Return None when the closing quote is missing.
fn read_string(chars: &[char], i: &mut usize) -> Option<String> {
    let mut s = String::new();
    *i += 1;
    while *i < chars.len() {
        match chars[*i] {
            '"' => {
                *i += 1;
                return Some(s);
            }
            '\\' if *i + 1 < chars.len() => {
                *i += 1;
                match chars[*i] {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    c => s.push(c),
                }
            }
            c => s.push(c),
        }
        *i += 1;
    }
    None
}

fn skip_whitespace(chars: &[char], i: &mut usize) {
    while *i < chars.len() && chars[*i].is_whitespace() {
        *i += 1;
    }
}

/// Parse the `"key": "value"` entries. Return the entries and the number of malformed entries.
fn parse_entries(block: &str) -> (HashMap<String, String>, usize) {
    let chars: Vec<char> = block.chars().collect();
    let mut clues: HashMap<String, String> = HashMap::new();
    let mut malformed: usize = 0;
    let mut i: usize = 0;

    loop {
        // Next key
        while i < chars.len() && chars[i] != '"' {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }
        let Some(key) = read_string(&chars, &mut i) else {
            malformed += 1;
            break;
        };

        skip_whitespace(&chars, &mut i);
        if i >= chars.len() || chars[i] != ':' {
            malformed += 1;
            continue;
        }
        i += 1;
        skip_whitespace(&chars, &mut i);
        if i >= chars.len() || chars[i] != '"' {
            malformed += 1;
            continue;
        }
        let Some(value) = read_string(&chars, &mut i) else {
            malformed += 1;
            break;
        };

        let key: String = key.trim().to_uppercase();
        if key.is_empty() {
            malformed += 1;
            continue;
        }
        clues.insert(key, value);
    }
    (clues, malformed)
}
