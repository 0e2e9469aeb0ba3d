/*
batch.rs

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

//! Generate batches of puzzles for the difficulty tiers.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use super::assembler::{self, Puzzle};
use super::engine::{EngineSettings, PlacementEngine, PlacementError};
use super::lexicon::Lexicon;
use super::tier::{Difficulty, Tier};

/// Outcome of a tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TierStatus {
    /// The requested number of puzzles has been generated.
    Complete,

    /// The attempt ceiling was reached first. The tier has fewer puzzles than requested.
    BatchExhausted,

    /// The lexicon does not have enough words in the tier's length range. No puzzle has been
    /// generated.
    InsufficientLexicon { available: usize, required: usize },
}

/// Puzzles and statistics for a tier.
#[derive(Debug, Clone)]
pub struct TierReport {
    pub difficulty: Difficulty,

    /// Number of requested puzzles.
    pub target: usize,

    /// Generated puzzles.
    pub puzzles: Vec<Puzzle>,

    /// Number of calls to the placement engine.
    pub attempts: usize,

    /// Number of growth iterations, over all the calls to the placement engine.
    pub iterations: usize,

    /// Duration in seconds.
    pub duration: f32,

    pub status: TierStatus,
}

/// Batch driver object.
pub struct BatchDriver<'a> {
    lexicon: &'a Lexicon,

    engine: PlacementEngine<'a>,

    /// The driver gives up on a tier after `puzzle_count * attempts_per_puzzle` engine calls.
    attempts_per_puzzle: usize,
}

impl<'a> BatchDriver<'a> {
    /// Create a [`BatchDriver`] object.
    pub fn new(lexicon: &'a Lexicon, settings: EngineSettings, attempts_per_puzzle: usize) -> Self {
        Self {
            lexicon,
            engine: PlacementEngine::new(lexicon, settings),
            attempts_per_puzzle,
        }
    }

    /// Generate the puzzles for all the tiers.
    ///
    /// Each tier gets its own random generator, derived from `rng`, so that the tiers can be
    /// reproduced independently.
    pub fn run<R: Rng>(&mut self, tiers: &[Tier], rng: &mut R) -> Vec<TierReport> {
        let mut reports: Vec<TierReport> = Vec::with_capacity(tiers.len());
        for tier in tiers {
            let mut tier_rng: StdRng = StdRng::from_rng(&mut *rng);
            reports.push(self.run_tier(tier, &mut tier_rng));
        }
        reports
    }

    /// Generate the puzzles for a tier.
    pub fn run_tier<R: Rng + ?Sized>(&mut self, tier: &Tier, rng: &mut R) -> TierReport {
        let start: Instant = Instant::now();
        let max_attempts: usize = tier.puzzle_count.saturating_mul(self.attempts_per_puzzle);
        let mut report = TierReport {
            difficulty: tier.difficulty,
            target: tier.puzzle_count,
            puzzles: Vec::with_capacity(tier.puzzle_count),
            attempts: 0,
            iterations: 0,
            duration: 0.0,
            status: TierStatus::Complete,
        };

        info!(
            "Generating {} {} puzzles ({}x{} grid, {}-{} words)",
            tier.puzzle_count,
            tier.difficulty,
            tier.grid_rows,
            tier.grid_cols,
            tier.min_words,
            tier.max_words
        );

        while report.puzzles.len() < tier.puzzle_count && report.attempts < max_attempts {
            report.attempts += 1;
            let ret: Result<_, PlacementError> = self.engine.generate(tier, rng);
            report.iterations += self.engine.iteration;
            match ret {
                Ok(placements) => {
                    report.puzzles.push(assembler::assemble(
                        placements,
                        tier.grid_rows,
                        tier.grid_cols,
                        self.lexicon,
                    ));
                    if report.puzzles.len() % 100 == 0 {
                        info!(
                            "    {}/{} {} puzzles",
                            report.puzzles.len(),
                            tier.puzzle_count,
                            tier.difficulty
                        );
                    }
                }
                Err(PlacementError::InsufficientLexicon {
                    available,
                    required,
                }) => {
                    // Retrying would not help
                    warn!(
                        "Not enough {} words: {available} words between {} and {} letters, {required} required",
                        tier.difficulty, tier.min_word_length, tier.max_word_length
                    );
                    report.status = TierStatus::InsufficientLexicon {
                        available,
                        required,
                    };
                    break;
                }
                Err(e) => {
                    debug!("ERROR generating a {} puzzle: {e}", tier.difficulty);
                }
            }
        }

        if report.status == TierStatus::Complete && report.puzzles.len() < tier.puzzle_count {
            warn!(
                "Gave up on {} puzzles after {} attempts: {}/{} generated",
                tier.difficulty,
                report.attempts,
                report.puzzles.len(),
                tier.puzzle_count
            );
            report.status = TierStatus::BatchExhausted;
        }
        report.duration = start.elapsed().as_secs_f32();
        info!(
            "Done {}: {} puzzles in {:.2}s",
            tier.difficulty,
            report.puzzles.len(),
            report.duration
        );
        report
    }
}
