/*
placement.rs

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

//! Words placed in the grid.

use serde::{Deserialize, Serialize};

/// Cell coordinates.
///
/// The ordering is the reading order: top to bottom, then left to right.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn distance(&self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Direction of a word in the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[serde(rename = "H")]
    Horizontal,
    #[serde(rename = "V")]
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn opposite(&self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Row and column offsets to go from one letter of the word to the next.
    pub fn step(&self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }

    /// Row and column offsets to reach the cells alongside the word.
    pub fn side_step(&self) -> (isize, isize) {
        self.opposite().step()
    }
}

/// A word committed to the grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub start: Position,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(word: &str, start: Position, orientation: Orientation) -> Self {
        Self {
            word: word.to_string(),
            start,
            orientation,
        }
    }

    /// Number of letters in the word.
    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Position of the letter at the given index in the word.
    pub fn cell(&self, index: usize) -> Position {
        match self.orientation {
            Orientation::Horizontal => Position::new(self.start.row, self.start.col + index),
            Orientation::Vertical => Position::new(self.start.row + index, self.start.col),
        }
    }

    /// Positions of all the letters of the word, with the letters.
    pub fn cells(&self) -> impl Iterator<Item = (Position, u8)> + '_ {
        self.word
            .bytes()
            .enumerate()
            .map(|(i, letter)| (self.cell(i), letter))
    }

    /// Position of the middle letter, used to evaluate how centered the word is.
    pub fn middle(&self) -> Position {
        self.cell(self.len() / 2)
    }

    /// Whether the word occupies the given cell.
    pub fn covers(&self, pos: Position) -> bool {
        match self.orientation {
            Orientation::Horizontal => {
                pos.row == self.start.row
                    && pos.col >= self.start.col
                    && pos.col < self.start.col + self.len()
            }
            Orientation::Vertical => {
                pos.col == self.start.col
                    && pos.row >= self.start.row
                    && pos.row < self.start.row + self.len()
            }
        }
    }
}
