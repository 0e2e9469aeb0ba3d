/*
layout.rs

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

//! State of a generation attempt.
//!
//! A [`Layout`] object owns the grid and the words committed so far. It decides whether a word
//! can be written at a given position ([`Layout::check`]) and how good that position is
//! ([`Layout::score`]).

use log::debug;
use std::collections::{HashMap, HashSet};

use super::grid::{Cell, Grid};
use super::placement::{Orientation, Placement, Position};

/// Points per crossing with a word already in the grid.
const INTERSECTION_POINTS: f64 = 15.0;

/// Points for a word whose middle letter is at the center of the grid. The points decrease
/// linearly with the distance to the center.
const CENTER_POINTS: f64 = 10.0;

/// Reasons for rejecting a candidate position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The word does not fit in the grid.
    OutOfBounds,

    /// A letter is right before the first letter or right after the last letter.
    Abutment,

    /// A cell already holds a different letter.
    Mismatch,

    /// A cell is already used by a word with the same orientation.
    SameOrientationOverlap,

    /// A new letter would sit alongside a word running in the same direction.
    ParallelNeighbor,

    /// The word does not cross any word in the grid.
    NoIntersection,
}

/// Orientations of the words that use a cell.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
struct Claims {
    horizontal: bool,
    vertical: bool,
}

impl Claims {
    fn has(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => self.horizontal,
            Orientation::Vertical => self.vertical,
        }
    }

    fn add(&mut self, orientation: Orientation) {
        match orientation {
            Orientation::Horizontal => self.horizontal = true,
            Orientation::Vertical => self.vertical = true,
        }
    }
}

/// Grid and committed words of a generation attempt.
#[derive(Debug, Clone)]
pub struct Layout {
    grid: Grid,

    /// Committed words, in commit order. The first one is the seed word.
    placements: Vec<Placement>,

    /// For each filled cell, the orientations of the words that use it.
    claims: HashMap<Position, Claims>,

    /// Words already in the grid. A word is used only once per puzzle.
    used: HashSet<String>,
}

impl Layout {
    /// Create a [`Layout`] object with an empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::new(rows, cols),
            placements: Vec::new(),
            claims: HashMap::new(),
            used: HashSet::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of committed words.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Whether the word is already in the grid.
    pub fn is_used(&self, word: &str) -> bool {
        self.used.contains(word)
    }

    /// Consume the object and return the committed words.
    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }

    /// Whether the cell is used by a word with the given orientation.
    fn is_claimed(&self, row: isize, col: isize, orientation: Orientation) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.claims
            .get(&Position::new(row as usize, col as usize))
            .is_some_and(|c| c.has(orientation))
    }

    /// Verify that the word can be written from the `(row, col)` cell, and return the number of
    /// cells it shares with the words already in the grid.
    ///
    /// The start coordinates can be negative: the candidate search computes them by moving back
    /// from a crossing cell.
    pub fn check(
        &self,
        word: &str,
        row: isize,
        col: isize,
        orientation: Orientation,
    ) -> Result<usize, Rejection> {
        let letters: &[u8] = word.as_bytes();
        let len: isize = letters.len() as isize;
        let (dr, dc) = orientation.step();
        let (sr, sc) = orientation.side_step();

        // The whole word must fit in the grid
        if letters.is_empty()
            || !self.grid.contains(row, col)
            || !self.grid.contains(row + dr * (len - 1), col + dc * (len - 1))
        {
            return Err(Rejection::OutOfBounds);
        }

        // The word must not extend another word, before or after
        if self.grid.get(row - dr, col - dc).is_letter()
            || self.grid.get(row + dr * len, col + dc * len).is_letter()
        {
            return Err(Rejection::Abutment);
        }

        let crossing: Orientation = orientation.opposite();
        let mut intersections: usize = 0;
        for (i, letter) in letters.iter().enumerate() {
            let r: isize = row + dr * i as isize;
            let c: isize = col + dc * i as isize;

            match self.grid.get(r, c) {
                Cell::Empty => {
                    // A new letter can only touch, on its sides, letters from crossing words
                    for (nr, nc) in [(r - sr, c - sc), (r + sr, c + sc)] {
                        if self.grid.get(nr, nc).is_letter() && !self.is_claimed(nr, nc, crossing)
                        {
                            return Err(Rejection::ParallelNeighbor);
                        }
                    }
                }
                Cell::Letter(existing) => {
                    if self.is_claimed(r, c, orientation) {
                        return Err(Rejection::SameOrientationOverlap);
                    }
                    if existing != *letter {
                        return Err(Rejection::Mismatch);
                    }
                    intersections += 1;
                }
                Cell::OutOfBounds => return Err(Rejection::OutOfBounds),
            }
        }

        if intersections == 0 {
            return Err(Rejection::NoIntersection);
        }
        Ok(intersections)
    }

    /// Compute the score of a valid position. Higher is better.
    ///
    /// The score rewards crossings, words centered in the grid, and medium length words.
    pub fn score(&self, placement: &Placement, intersections: usize) -> f64 {
        let center: Position = Position::new(self.grid.rows() / 2, self.grid.cols() / 2);
        let max_distance: usize = center.row + center.col;
        let distance: usize = placement.middle().distance(center);

        let centering: f64 = if max_distance == 0 {
            CENTER_POINTS
        } else {
            CENTER_POINTS * (1.0 - distance as f64 / max_distance as f64)
        };

        INTERSECTION_POINTS * intersections as f64 + centering + length_bonus(placement.len())
    }

    /// Write the word in the grid.
    ///
    /// The placement must have been validated with [`Layout::check`] before.
    pub fn commit(&mut self, placement: Placement) {
        for (pos, letter) in placement.cells() {
            let (row, col) = (pos.row as isize, pos.col as isize);
            debug_assert!(self.grid.contains(row, col), "{pos:?} is outside the grid");
            debug_assert!(
                matches!(self.grid.get(row, col), Cell::Empty)
                    || self.grid.get(row, col) == Cell::Letter(letter),
                "conflicting letter at {pos:?}"
            );
            self.grid.set(row, col, letter);
            self.claims.entry(pos).or_default().add(placement.orientation);
        }
        debug!(
            "    Committed {} at ({}, {}) {:?}",
            placement.word, placement.start.row, placement.start.col, placement.orientation
        );
        self.used.insert(placement.word.clone());
        self.placements.push(placement);
    }
}

/// Bonus for medium length words.
fn length_bonus(len: usize) -> f64 {
    match len {
        5..=8 => 5.0,
        4 | 9 => 3.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// 10x10 layout with CATALOG in the middle row, from (5, 1).
    fn catalog_layout() -> Layout {
        let mut layout = Layout::new(10, 10);
        layout.commit(Placement::new(
            "CATALOG",
            Position::new(5, 1),
            Orientation::Horizontal,
        ));
        layout
    }

    #[test]
    fn commit_writes_letters() {
        let layout = catalog_layout();
        assert_eq!(layout.len(), 1);
        assert!(layout.is_used("CATALOG"));
        assert_eq!(layout.grid().get(5, 1), Cell::Letter(b'C'));
        assert_eq!(layout.grid().get(5, 7), Cell::Letter(b'G'));
        assert_eq!(layout.grid().filled(), 7);
    }

    #[test]
    fn crossing_on_matching_letter() {
        let layout = catalog_layout();
        // ATOM going down, its A on the first A of CATALOG at (5, 2)
        assert_eq!(layout.check("ATOM", 5, 2, Orientation::Vertical), Ok(1));
        // The T of ATOM on the T of CATALOG at (5, 3)
        assert_eq!(layout.check("ATOM", 4, 3, Orientation::Vertical), Ok(1));
    }

    #[test]
    fn crossing_on_different_letter() {
        let layout = catalog_layout();
        // The A of ATOM on the C of CATALOG
        assert_eq!(
            layout.check("ATOM", 5, 1, Orientation::Vertical),
            Err(Rejection::Mismatch)
        );
    }

    #[rstest]
    #[case::negative_row(-2, 2, Orientation::Vertical)]
    #[case::past_bottom(7, 2, Orientation::Vertical)]
    #[case::past_right(3, 7, Orientation::Horizontal)]
    fn out_of_bounds(#[case] row: isize, #[case] col: isize, #[case] orientation: Orientation) {
        let layout = catalog_layout();
        assert_eq!(
            layout.check("ATOM", row, col, orientation),
            Err(Rejection::OutOfBounds)
        );
    }

    #[test]
    fn no_intersection() {
        let layout = catalog_layout();
        assert_eq!(
            layout.check("ATOM", 0, 0, Orientation::Horizontal),
            Err(Rejection::NoIntersection)
        );
    }

    #[test]
    fn abutment() {
        let layout = catalog_layout();
        // DOG going down would end right above the C of CATALOG
        assert_eq!(
            layout.check("DOG", 2, 1, Orientation::Vertical),
            Err(Rejection::Abutment)
        );
        // DOG going down would start right below the C of CATALOG
        assert_eq!(
            layout.check("DOG", 6, 1, Orientation::Vertical),
            Err(Rejection::Abutment)
        );
    }

    #[test]
    fn parallel_neighbor() {
        let mut layout = catalog_layout();
        // ATOM down from the first A of CATALOG: (5,2) (6,2) (7,2) (8,2)
        layout.commit(Placement::new("ATOM", Position::new(5, 2), Orientation::Vertical));
        // TAG down from the T of CATALOG would run alongside ATOM
        assert_eq!(
            layout.check("TAG", 5, 3, Orientation::Vertical),
            Err(Rejection::ParallelNeighbor)
        );
        // OAT across, its O on the O of ATOM: the A at (7, 3) is fine, nothing around
        assert_eq!(layout.check("OAT", 7, 2, Orientation::Horizontal), Ok(1));
    }

    #[test]
    fn same_orientation_overlap() {
        let layout = catalog_layout();
        assert_eq!(
            layout.check("CATALOGS", 5, 1, Orientation::Horizontal),
            Err(Rejection::SameOrientationOverlap)
        );
    }

    #[rstest]
    #[case(3, 0.0)]
    #[case(4, 3.0)]
    #[case(5, 5.0)]
    #[case(8, 5.0)]
    #[case(9, 3.0)]
    #[case(12, 0.0)]
    fn length_bonuses(#[case] len: usize, #[case] bonus: f64) {
        assert_eq!(length_bonus(len), bonus);
    }

    #[test]
    fn score_for_single_crossing() {
        let layout = catalog_layout();
        // Middle letter of ATOM down from (5, 2) is at (7, 2), the center is (5, 5)
        let p = Placement::new("ATOM", Position::new(5, 2), Orientation::Vertical);
        let score: f64 = layout.score(&p, 1);
        let expected: f64 = 15.0 + 10.0 * (1.0 - 5.0 / 10.0) + 3.0;
        assert!((score - expected).abs() < 1e-9);
        assert!(score > 15.0 + 3.0);
    }

    #[test]
    fn score_decreases_away_from_center() {
        let layout = Layout::new(11, 11);
        let mut previous: f64 = f64::MAX;
        // Same word, same crossing count, middle letter moving away from (5, 5)
        for col in 5..=10 {
            let p = Placement::new("STONE", Position::new(3, col), Orientation::Vertical);
            let score: f64 = layout.score(&p, 1);
            assert!(score < previous, "column {col}: {score} >= {previous}");
            previous = score;
        }
    }
}
