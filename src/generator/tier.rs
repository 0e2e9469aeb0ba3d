/*
tier.rs

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

//! Difficulty tiers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

/// Puzzle difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Display,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Return all the difficulty levels, from the easiest.
    pub fn all() -> Vec<Difficulty> {
        (0..).map_while(Difficulty::from_repr).collect()
    }
}

/// Parameters of a difficulty tier.
///
/// The generator does not provide default values: they come from the configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub difficulty: Difficulty,

    /// Grid height.
    pub grid_rows: usize,

    /// Grid width.
    pub grid_cols: usize,

    /// A generated puzzle has at least `min_words` words.
    pub min_words: usize,

    /// A generated puzzle has at most `max_words` words.
    pub max_words: usize,

    /// Shortest candidate word.
    pub min_word_length: usize,

    /// Longest candidate word.
    pub max_word_length: usize,

    /// Number of puzzles to generate for the tier.
    pub puzzle_count: usize,
}
