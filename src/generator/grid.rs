/*
grid.rs

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

//! Letter grid of a puzzle under construction.

use std::fmt;

/// Content of a grid cell.
///
/// - An `Empty` cell does not hold a letter yet.
/// - A `Letter` cell holds an uppercase ASCII letter.
/// - `OutOfBounds` is returned when reading outside the grid.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Letter(u8),
    OutOfBounds,
}

impl Cell {
    /// Whether the cell holds a letter.
    pub fn is_letter(&self) -> bool {
        matches!(self, Cell::Letter(_))
    }
}

/// Fixed size matrix of letters.
///
/// Coordinates are signed so that callers can look at the cells around the border without
/// checking for underflows first. Reading outside the grid never panics.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<u8>>,
}

impl Grid {
    /// Create an empty [`Grid`] object.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Internal index of the cell, or None if the coordinates are outside the grid.
    fn idx(&self, row: isize, col: isize) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Whether the coordinates are inside the grid.
    pub fn contains(&self, row: isize, col: isize) -> bool {
        self.idx(row, col).is_some()
    }

    /// Return the content of the cell.
    pub fn get(&self, row: isize, col: isize) -> Cell {
        match self.idx(row, col) {
            Some(i) => match self.cells[i] {
                Some(letter) => Cell::Letter(letter),
                None => Cell::Empty,
            },
            None => Cell::OutOfBounds,
        }
    }

    /// Write a letter in the cell.
    ///
    /// Writing outside the grid does nothing. Callers are expected to validate the coordinates
    /// first.
    pub fn set(&mut self, row: isize, col: isize, letter: u8) {
        if let Some(i) = self.idx(row, col) {
            self.cells[i] = Some(letter);
        }
    }

    /// Whether the cell is empty. Cells outside the grid are not empty.
    pub fn is_empty(&self, row: isize, col: isize) -> bool {
        self.get(row, col) == Cell::Empty
    }

    /// Number of cells holding a letter.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Display the grid, one line per row, with `.` for the empty cells.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row
                .iter()
                .map(|c| c.map(char::from).unwrap_or('.'))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
