/*
engine.rs

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

//! Place words in a grid.
//!
//! The engine places a seed word in the middle of the grid, and then repeatedly adds a word that
//! crosses a word already in the grid.
//! At each step, all the valid crossing positions are scored, and one of the best positions is
//! randomly selected.
//! The search gives up when it cannot reach the minimum number of words. Several independent
//! attempts are made before reporting an error.

use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use super::layout::{Layout, Rejection};
use super::lexicon::Lexicon;
use super::placement::{Orientation, Placement, Position};
use super::tier::Tier;

/// Shortest seed word.
const MIN_SEED_LENGTH: usize = 4;

/// Search limits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Maximum number of growth iterations in an attempt.
    pub max_iterations: usize,

    /// Maximum number of attempts, each one with an empty grid, before giving up.
    pub max_attempts: usize,

    /// The next word is randomly selected among the `top_candidates` best positions.
    pub top_candidates: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            max_attempts: 50,
            top_candidates: 5,
        }
    }
}

/// Type of errors.
///
/// These are not bugs: the search is a heuristic and is expected to fail from time to time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Not enough words with the tier's length range to reach the minimum word count.
    InsufficientLexicon { available: usize, required: usize },

    /// No word can be used as the seed word.
    SeedUnavailable,

    /// The growth stopped before reaching the minimum word count.
    AttemptExhausted { placed: usize, required: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlacementError::InsufficientLexicon {
                available,
                required,
            } => write!(
                f,
                "not enough words ({available} available, {required} required)"
            ),
            PlacementError::SeedUnavailable => write!(f, "no word fits as the seed word"),
            PlacementError::AttemptExhausted { placed, required } => {
                write!(f, "only {placed} words placed ({required} required)")
            }
        }
    }
}

/// Valid position found during the candidate search.
#[derive(Debug, Clone)]
struct Candidate {
    placement: Placement,
    score: f64,

    /// Position of the word in the shuffled word list of the attempt. Breaks score ties.
    rank: usize,
}

/// Result of a growth iteration.
#[derive(Debug)]
enum Search {
    Found(Candidate),
    NotFound,
}

/// Placement engine object.
pub struct PlacementEngine<'a> {
    lexicon: &'a Lexicon,

    settings: EngineSettings,

    /// Number of attempts it took to generate the last puzzle.
    pub attempts: usize,

    /// Number of growth iterations, over all the attempts, for the last puzzle.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last puzzle.
    pub duration: f32,
}

impl<'a> PlacementEngine<'a> {
    /// Create the object.
    pub fn new(lexicon: &'a Lexicon, settings: EngineSettings) -> Self {
        Self {
            lexicon,
            settings,
            attempts: 0,
            iteration: 0,
            duration: 0.0,
        }
    }

    /// Generate and return the words of a puzzle for the given tier.
    ///
    /// All the randomness comes from `rng`, so that a seeded generator gives reproducible
    /// results.
    ///
    /// # Errors
    ///
    /// The method returns an error if the lexicon does not have enough words for the tier, or if
    /// none of the attempts reaches the minimum word count. In that later case, the method can be
    /// retried.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        tier: &Tier,
        rng: &mut R,
    ) -> Result<Vec<Placement>, PlacementError> {
        let start: Instant = Instant::now();
        self.attempts = 0;
        self.iteration = 0;
        self.duration = 0.0;

        let lexicon: &'a Lexicon = self.lexicon;
        let mut candidates: Vec<&'a str> =
            lexicon.words_by_length(tier.min_word_length, tier.max_word_length);
        if candidates.len() < tier.min_words {
            return Err(PlacementError::InsufficientLexicon {
                available: candidates.len(),
                required: tier.min_words,
            });
        }

        let mut error: PlacementError = PlacementError::AttemptExhausted {
            placed: 0,
            required: tier.min_words,
        };
        while self.attempts < self.settings.max_attempts {
            self.attempts += 1;
            candidates.shuffle(rng);
            match self.try_generate(tier, &candidates, rng) {
                Ok(placements) => {
                    self.duration = start.elapsed().as_secs_f32();
                    debug!(
                        "Puzzle with {} words after {} attempts ({} iterations, {}s)",
                        placements.len(),
                        self.attempts,
                        self.iteration,
                        self.duration
                    );
                    return Ok(placements);
                }
                Err(e) => {
                    debug!("Attempt {} failed: {e}", self.attempts);
                    error = e;
                }
            }
        }
        self.duration = start.elapsed().as_secs_f32();
        Err(error)
    }

    /// Run one attempt from an empty grid.
    fn try_generate<R: Rng + ?Sized>(
        &mut self,
        tier: &Tier,
        candidates: &[&str],
        rng: &mut R,
    ) -> Result<Vec<Placement>, PlacementError> {
        let mut layout: Layout = Layout::new(tier.grid_rows, tier.grid_cols);
        let target: usize = rng.random_range(tier.min_words..=tier.max_words.max(tier.min_words));

        let seed: &str = select_seed(candidates, tier.grid_rows, tier.grid_cols)
            .ok_or(PlacementError::SeedUnavailable)?;
        let ranks: HashMap<&str, usize> = candidates
            .iter()
            .enumerate()
            .map(|(i, w)| (*w, i))
            .collect();
        layout.commit(seed_placement(seed, tier.grid_rows, tier.grid_cols));
        debug!("Seed word = {seed}  Target word count = {target}");

        let mut iteration: usize = 0;
        while layout.len() < target && iteration < self.settings.max_iterations {
            iteration += 1;
            match self.find_placement(&layout, tier, &ranks, rng) {
                Search::Found(candidate) => {
                    debug!(
                        "    Iteration {iteration}: {} (score {:.2})",
                        candidate.placement.word, candidate.score
                    );
                    layout.commit(candidate.placement);
                }
                Search::NotFound => {
                    // The layout did not change, so the next iterations would not find anything
                    // either
                    debug!("    Iteration {iteration}: no valid position");
                    break;
                }
            }
        }
        self.iteration += iteration;

        if log_enabled!(Level::Debug) {
            debug!(
                "Grid after {iteration} iterations ({} letters):\n{}",
                layout.grid().filled(),
                layout.grid()
            );
        }

        if layout.len() < tier.min_words {
            return Err(PlacementError::AttemptExhausted {
                placed: layout.len(),
                required: tier.min_words,
            });
        }
        Ok(layout.into_placements())
    }

    /// Search all the valid positions that cross a word in the grid, and randomly pick one of
    /// the best ones.
    ///
    /// Candidates with the same score are ordered by their rank in `ranks`, the shuffled word
    /// list of the attempt.
    fn find_placement<R: Rng + ?Sized>(
        &self,
        layout: &Layout,
        tier: &Tier,
        ranks: &HashMap<&str, usize>,
        rng: &mut R,
    ) -> Search {
        let mut found: Vec<Candidate> = Vec::new();
        let trace: bool = log_enabled!(Level::Debug);
        let mut rejections: HashMap<Rejection, usize> = HashMap::new();

        for placed in layout.placements() {
            let orientation: Orientation = placed.orientation.opposite();
            let (dr, dc) = orientation.step();

            for (cross, letter) in placed.cells() {
                // Words with the crossing letter at index `j` start `j` cells before the crossing
                for j in 0..tier.max_word_length {
                    for word in self.lexicon.words_with_letter_at(j, letter) {
                        if word.len() < tier.min_word_length
                            || word.len() > tier.max_word_length
                            || layout.is_used(word)
                        {
                            continue;
                        }
                        let row: isize = cross.row as isize - dr * j as isize;
                        let col: isize = cross.col as isize - dc * j as isize;

                        match layout.check(word, row, col, orientation) {
                            Ok(intersections) => {
                                let placement = Placement::new(
                                    word,
                                    Position::new(row as usize, col as usize),
                                    orientation,
                                );
                                let score: f64 = layout.score(&placement, intersections);
                                let rank: usize = ranks.get(word).copied().unwrap_or(usize::MAX);
                                found.push(Candidate {
                                    placement,
                                    score,
                                    rank,
                                });
                            }
                            Err(reason) => {
                                if trace {
                                    *rejections.entry(reason).or_default() += 1;
                                }
                            }
                        }
                    }
                }
            }
        }

        if trace {
            debug!("    {} candidates, rejected: {rejections:?}", found.len());
        }
        if found.is_empty() {
            return Search::NotFound;
        }

        found.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.rank.cmp(&b.rank)));
        found.truncate(self.settings.top_candidates.max(1));
        let i: usize = rng.random_range(0..found.len());
        Search::Found(found.swap_remove(i))
    }
}

/// Select the seed word.
///
/// The seed word must leave at least one free cell on each side of the grid. Medium length words
/// are preferred. For words with the same length, the first one in `words` is selected.
pub fn select_seed<'w>(words: &[&'w str], rows: usize, cols: usize) -> Option<&'w str> {
    let max_length: usize = rows.min(cols).saturating_sub(2);
    let target_length: usize = max_length / 2 + 2;

    words
        .iter()
        .copied()
        .filter(|w| (MIN_SEED_LENGTH..=max_length).contains(&w.len()))
        .min_by_key(|w| w.len().abs_diff(target_length))
}

/// Horizontal placement of the seed word, centered in the grid.
pub fn seed_placement(word: &str, rows: usize, cols: usize) -> Placement {
    Placement::new(
        word,
        Position::new(rows / 2, cols.saturating_sub(word.len()) / 2),
        Orientation::Horizontal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tier::Difficulty;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const WORDS: &[&str] = &[
        "CAT", "DOG", "SUN", "MOON", "STAR", "TREE", "RIVER", "STONE", "HOUSE", "WATER", "BREAD",
        "APPLE", "GRAPE", "LEMON", "MANGO", "TIGER", "HORSE", "MOUSE", "EAGLE", "SNAKE", "OCEAN",
        "ISLAND", "FOREST", "GARDEN", "ORANGE", "PLANET", "SILVER", "CASTLE", "BRIDGE", "CANDLE",
        "TRAIN", "PLANE", "CLOUD", "STORM", "NIGHT", "LIGHT", "SOUND", "MUSIC", "PAPER", "PENCIL",
        "TABLE", "CHAIR", "SMILE", "HEART", "EARTH", "METAL", "SALT", "RAIN", "SNOW", "WIND",
        "FIRE", "ROSE", "LION", "BEAR", "WOLF", "DEER", "FROG", "FISH", "BIRD", "NEST", "EGG",
        "ANT", "BEE", "OWL", "ELM", "OAK", "ICE", "SEA", "ARM", "EAR", "EYE", "TOE", "LEG",
    ];

    fn easy_tier() -> Tier {
        Tier {
            difficulty: Difficulty::Easy,
            grid_rows: 10,
            grid_cols: 10,
            min_words: 5,
            max_words: 7,
            min_word_length: 3,
            max_word_length: 6,
            puzzle_count: 1,
        }
    }

    #[test]
    fn seed_prefers_medium_length() {
        // In a 10x10 grid, seed words are 4 to 8 letters long, 6 letters is the target
        let words = ["CAT", "ATOM", "CATALOG", "LOG", "DOG"];
        assert_eq!(select_seed(&words, 10, 10), Some("CATALOG"));
    }

    #[test]
    fn seed_ties_use_list_order() {
        let words = ["RIVER", "STONE", "HOUSE"];
        assert_eq!(select_seed(&words, 10, 10), Some("RIVER"));
        let words = ["HOUSE", "RIVER", "STONE"];
        assert_eq!(select_seed(&words, 10, 10), Some("HOUSE"));
    }

    #[test]
    fn seed_must_fit() {
        assert_eq!(select_seed(&["CAT", "DOG"], 10, 10), None);
        assert_eq!(select_seed(&["CATALOGUE"], 10, 10), None);
        assert_eq!(select_seed(&["ATOM"], 5, 20), None);
        assert_eq!(select_seed(&["ATOM"], 6, 20), Some("ATOM"));
    }

    #[test]
    fn seed_is_centered() {
        let p = seed_placement("CATALOG", 10, 10);
        assert_eq!(p.start, Position::new(5, 1));
        assert_eq!(p.orientation, Orientation::Horizontal);
        let p = seed_placement("ATOM", 13, 13);
        assert_eq!(p.start, Position::new(6, 4));
    }

    #[test]
    fn generated_words_are_consistent() {
        let lexicon = Lexicon::new(WORDS.iter(), HashMap::new());
        let mut engine = PlacementEngine::new(&lexicon, EngineSettings::default());
        let tier = easy_tier();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..5 {
            let placements: Vec<Placement> = engine.generate(&tier, &mut rng).unwrap();
            assert!(placements.len() >= tier.min_words);
            assert!(placements.len() <= tier.max_words);

            // Words are used once, and every letter agrees with the other words
            let words: HashSet<&str> = placements.iter().map(|p| p.word.as_str()).collect();
            assert_eq!(words.len(), placements.len());
            let mut letters: HashMap<Position, u8> = HashMap::new();
            for p in &placements {
                assert!(p.len() >= tier.min_word_length && p.len() <= tier.max_word_length);
                for (pos, letter) in p.cells() {
                    assert!(pos.row < tier.grid_rows && pos.col < tier.grid_cols);
                    assert_eq!(*letters.entry(pos).or_insert(letter), letter);
                }
            }

            // Each word after the seed crosses an earlier word of the other orientation
            for (i, p) in placements.iter().enumerate().skip(1) {
                assert!(placements[..i].iter().any(|q| q.orientation != p.orientation
                    && p.cells().any(|(pos, _)| q.covers(pos))));
            }
        }
    }

    #[test]
    fn same_seed_same_puzzle() {
        let lexicon = Lexicon::new(WORDS.iter(), HashMap::new());
        let mut engine = PlacementEngine::new(&lexicon, EngineSettings::default());
        let tier = easy_tier();

        let first = engine.generate(&tier, &mut StdRng::seed_from_u64(99));
        let second = engine.generate(&tier, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn growth_below_minimum_fails() {
        // No two words share a letter: nothing can cross the seed word
        let lexicon = Lexicon::new(["ABCDE", "FGHIJ", "KLMNO", "PQRST", "UVWXY"], HashMap::new());
        let settings = EngineSettings {
            max_attempts: 3,
            ..EngineSettings::default()
        };
        let mut engine = PlacementEngine::new(&lexicon, settings);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            engine.generate(&easy_tier(), &mut rng),
            Err(PlacementError::AttemptExhausted {
                placed: 1,
                required: 5
            })
        );
        assert_eq!(engine.attempts, 3);
    }

    /// Seed word with an `O` at both ends. In a 10x10 grid, it starts at (5, 2). The `O` at
    /// (5, 7) is closer to the center than the `O` at (5, 2).
    const O_SEED: &str = "OQQQQO";

    /// Words that can only cross the seed word through their middle `O`.
    const O_WORDS: &[&str] = &[
        "BOB", "COB", "DOB", "FOB", "GOB", "HOB", "JOB", "LOB", "MOB", "ROB", "SOB",
    ];

    fn o_lexicon() -> Lexicon {
        Lexicon::new(
            std::iter::once(&O_SEED).chain(O_WORDS.iter()),
            HashMap::new(),
        )
    }

    fn two_words_tier() -> Tier {
        Tier {
            min_words: 2,
            max_words: 2,
            ..easy_tier()
        }
    }

    #[test]
    fn score_ties_rotate_with_the_shuffle() {
        let lexicon = o_lexicon();
        let mut engine = PlacementEngine::new(&lexicon, EngineSettings::default());
        let tier = two_words_tier();
        let mut chosen: HashSet<String> = HashSet::new();

        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let placements: Vec<Placement> = engine.generate(&tier, &mut rng).unwrap();
            assert_eq!(placements[0].word, O_SEED);
            chosen.insert(placements[1].word.clone());
        }
        let all: HashSet<String> = O_WORDS.iter().map(|w| w.to_string()).collect();
        assert_eq!(chosen, all);
    }

    #[test]
    fn single_top_candidate_is_the_best() {
        let lexicon = o_lexicon();
        let settings = EngineSettings {
            top_candidates: 1,
            ..EngineSettings::default()
        };
        let mut engine = PlacementEngine::new(&lexicon, settings);
        let tier = two_words_tier();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let placements: Vec<Placement> = engine.generate(&tier, &mut rng).unwrap();
            assert_eq!(placements[0].start, Position::new(5, 2));
            assert_eq!(placements[1].start, Position::new(4, 7));
            assert_eq!(placements[1].orientation, Orientation::Vertical);
        }
    }

    #[test]
    fn growth_stops_at_the_iteration_ceiling() {
        let lexicon = Lexicon::new(WORDS.iter(), HashMap::new());
        let tier = Tier {
            min_words: 3,
            max_words: 3,
            ..easy_tier()
        };
        let settings = EngineSettings {
            max_iterations: 1,
            max_attempts: 3,
            ..EngineSettings::default()
        };
        let mut engine = PlacementEngine::new(&lexicon, settings);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            engine.generate(&tier, &mut rng),
            Err(PlacementError::AttemptExhausted {
                placed: 2,
                required: 3
            })
        );
        assert_eq!(engine.attempts, 3);
        assert_eq!(engine.iteration, 3);

        // The same lexicon grows further without the ceiling
        let mut engine = PlacementEngine::new(&lexicon, EngineSettings::default());
        let placements: Vec<Placement> = engine.generate(&tier, &mut rng).unwrap();
        assert_eq!(placements.len(), 3);
    }

    #[test]
    fn no_seed_word() {
        let lexicon = Lexicon::new(["CAT", "ACT", "TAC", "COT", "TOT"], HashMap::new());
        let mut engine = PlacementEngine::new(&lexicon, EngineSettings::default());
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            engine.generate(&easy_tier(), &mut rng),
            Err(PlacementError::SeedUnavailable)
        );
    }

    #[test]
    fn not_enough_words() {
        let lexicon = Lexicon::new(WORDS.iter(), HashMap::new());
        let mut engine = PlacementEngine::new(&lexicon, EngineSettings::default());
        let tier = Tier {
            min_word_length: 10,
            max_word_length: 12,
            ..easy_tier()
        };
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            engine.generate(&tier, &mut rng),
            Err(PlacementError::InsufficientLexicon {
                available: 0,
                required: 5
            })
        );
        assert_eq!(engine.attempts, 0);
    }
}
