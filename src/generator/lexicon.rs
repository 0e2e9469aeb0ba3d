/*
lexicon.rs

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

//! Word bank with its clues and lookup indexes.

use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Candidate words and their clues.
///
/// The word list is indexed twice when the object is created:
///
/// * by word length, to select the candidate words for a difficulty tier.
/// * by letter position, to find the words that have a given letter at a given index. This is
///   the lookup used to find words that can cross a word already in the grid.
///
/// The object is read-only after creation, and can be shared between generation attempts.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    /// Words, in the order of the source list, without duplicates.
    words: Vec<String>,

    /// Clues indexed by the uppercase word.
    clues: HashMap<String, String>,

    /// Indexes in [`Lexicon::words`] grouped by word length.
    by_length: BTreeMap<usize, Vec<usize>>,

    /// Indexes in [`Lexicon::words`] grouped by (position in the word, letter).
    by_letter_at: HashMap<(usize, u8), Vec<usize>>,
}

impl Lexicon {
    /// Create a [`Lexicon`] object.
    ///
    /// The words are trimmed and uppercased. Empty entries and duplicates are dropped.
    /// The words are expected to be alphabetic and at least three letters long; filtering the
    /// source list is the job of the loader.
    pub fn new<I, S>(words: I, clues: HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .collect();
        let clues: HashMap<String, String> = clues
            .into_iter()
            .map(|(word, clue)| (word.trim().to_uppercase(), clue))
            .collect();

        let mut lexicon = Self {
            words,
            clues,
            by_length: BTreeMap::new(),
            by_letter_at: HashMap::new(),
        };
        lexicon.build_index();
        lexicon
    }

    fn build_index(&mut self) {
        for (id, word) in self.words.iter().enumerate() {
            self.by_length.entry(word.len()).or_default().push(id);
            for (i, letter) in word.bytes().enumerate() {
                self.by_letter_at.entry((i, letter)).or_default().push(id);
            }
        }
        debug!(
            "Lexicon: {} words, {} lengths, {} letter positions, {} clues",
            self.words.len(),
            self.by_length.len(),
            self.by_letter_at.len(),
            self.clues.len()
        );
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All the words, in the source order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Return the words with a length between `min_len` and `max_len` (inclusive), shortest
    /// words first.
    pub fn words_by_length(&self, min_len: usize, max_len: usize) -> Vec<&str> {
        if min_len > max_len {
            return Vec::new();
        }
        self.by_length
            .range(min_len..=max_len)
            .flat_map(|(_, ids)| ids.iter().map(|id| self.words[*id].as_str()))
            .collect()
    }

    /// Return the words that have `letter` at position `index`.
    pub fn words_with_letter_at(&self, index: usize, letter: u8) -> impl Iterator<Item = &str> {
        self.by_letter_at
            .get(&(index, letter.to_ascii_uppercase()))
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|id| self.words[*id].as_str())
    }

    /// Return the clue for the word.
    ///
    /// When the clue source does not know the word, a placeholder clue that references the word
    /// is returned, so the returned string is never empty.
    pub fn clue(&self, word: &str) -> String {
        match self.clues.get(&word.to_uppercase()) {
            Some(clue) if !clue.trim().is_empty() => clue.clone(),
            _ => format!("Definition of {word}"),
        }
    }
}
