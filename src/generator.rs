/*
generator.rs

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

//! Build crossword puzzles from a word list.
//!
//! A [`lexicon::Lexicon`] object holds the candidate words, their clues, and the indexes used to
//! quickly find words that can cross a given letter.
//!
//! To build a puzzle, create a [`engine::PlacementEngine`] object and use its
//! [`engine::PlacementEngine::generate`] method with a [`tier::Tier`] object that describes the
//! grid size and the word count and length ranges.
//! The engine places a seed word in the middle of an empty [`grid::Grid`], and then grows the
//! puzzle by adding words that cross the words already placed.
//! The state of a generation attempt (grid, placed words, used words) is kept in a
//! [`layout::Layout`] object, which also validates and scores candidate placements.
//! Generation is a bounded randomized search: if it takes too many iterations or attempts, then
//! the method returns an error and the caller can retry.
//!
//! The [`assembler`] module numbers the placed words and attaches their clues, producing a
//! [`assembler::Puzzle`] object ready to be saved.
//!
//! The [`batch::BatchDriver`] object repeats the process until the requested number of puzzles
//! is reached for each difficulty tier.

pub mod assembler;
pub mod batch;
pub mod engine;
pub mod grid;
pub mod layout;
pub mod lexicon;
pub mod placement;
pub mod tier;
