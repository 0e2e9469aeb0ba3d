/*
lib.rs

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

//! Crossword puzzle batch generator.
//!
//! The [`generator`] module holds the puzzle construction algorithm.
//! The [`loader`] and [`saver`] modules read the word list and the clues, and write the
//! resulting puzzle database.
//! The [`config`] module provides the difficulty tiers.

pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod saver;
