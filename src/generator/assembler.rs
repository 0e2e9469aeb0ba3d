/*
assembler.rs

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

//! Turn placed words into a puzzle.
//!
//! Words are numbered the crossword way: start cells are numbered in reading order, and a
//! horizontal and a vertical word that start in the same cell share the same number.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lexicon::Lexicon;
use super::placement::{Orientation, Placement, Position};

/// Grid dimensions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

/// A word of a puzzle, with its clue and number.
///
/// The serialized field names are the ones expected by the game that reads the puzzle database.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PuzzleWord {
    #[serde(rename = "w")]
    pub word: String,

    #[serde(rename = "r")]
    pub row: usize,

    #[serde(rename = "c")]
    pub col: usize,

    #[serde(rename = "d")]
    pub orientation: Orientation,

    #[serde(rename = "h")]
    pub clue: String,

    #[serde(rename = "n")]
    pub number: u32,
}

impl PuzzleWord {
    pub fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Finished puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    #[serde(rename = "gridSize")]
    pub grid_size: GridSize,

    /// Words in placement order. The first word is the seed word.
    pub words: Vec<PuzzleWord>,
}

/// Return the number of each word, in the order of `placements`.
///
/// The numbers only depend on the start cells of the words.
pub fn number(placements: &[Placement]) -> Vec<u32> {
    let mut starts: BTreeMap<Position, u32> = BTreeMap::new();
    for p in placements {
        starts.insert(p.start, 0);
    }
    for (n, number) in starts.values_mut().enumerate() {
        *number = n as u32 + 1;
    }
    placements.iter().map(|p| starts[&p.start]).collect()
}

/// Build the puzzle: number the words and attach their clues.
pub fn assemble(
    placements: Vec<Placement>,
    rows: usize,
    cols: usize,
    lexicon: &Lexicon,
) -> Puzzle {
    let numbers: Vec<u32> = number(&placements);
    let words: Vec<PuzzleWord> = placements
        .into_iter()
        .zip(numbers)
        .map(|(p, number)| PuzzleWord {
            clue: lexicon.clue(&p.word),
            row: p.start.row,
            col: p.start.col,
            orientation: p.orientation,
            word: p.word,
            number,
        })
        .collect();

    Puzzle {
        grid_size: GridSize { rows, cols },
        words,
    }
}
