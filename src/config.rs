/*
config.rs

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

//! Difficulty tier configuration.
//!
//! The tiers come either from [`default_tiers`], or from a JSON file that contains an array of
//! [`Tier`] objects:
//!
//! ```json
//! [
//!   {
//!     "difficulty": "easy",
//!     "grid_rows": 10,
//!     "grid_cols": 10,
//!     "min_words": 5,
//!     "max_words": 7,
//!     "min_word_length": 3,
//!     "max_word_length": 6,
//!     "puzzle_count": 1000
//!   }
//! ]
//! ```

use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::generator::tier::{Difficulty, Tier};

/// Words must be at least this long.
pub const MIN_WORD_LENGTH: usize = 3;

/// The batch driver gives up on a tier after this many engine calls per requested puzzle.
pub const ATTEMPTS_PER_PUZZLE: usize = 3;

/// Long version message for the command line.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\nLicense GPL-3.0-or-later"
);

/// Version of the puzzle database format.
pub const DB_VERSION: &str = "1.0.0";

/// Return the built-in tiers.
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier {
            difficulty: Difficulty::Easy,
            grid_rows: 10,
            grid_cols: 10,
            min_words: 5,
            max_words: 7,
            min_word_length: 3,
            max_word_length: 6,
            puzzle_count: 1000,
        },
        Tier {
            difficulty: Difficulty::Medium,
            grid_rows: 13,
            grid_cols: 13,
            min_words: 8,
            max_words: 12,
            min_word_length: 4,
            max_word_length: 9,
            puzzle_count: 1000,
        },
        Tier {
            difficulty: Difficulty::Hard,
            grid_rows: 16,
            grid_cols: 16,
            min_words: 13,
            max_words: 18,
            min_word_length: 5,
            max_word_length: 12,
            puzzle_count: 1000,
        },
    ]
}

/// Read the tiers from a JSON file, and validate them.
pub fn load_tiers(path: &Path) -> Result<Vec<Tier>> {
    let file: File = File::open(path).map_err(|e| Error::io(path, e))?;
    let reader: BufReader<File> = BufReader::new(file);
    let tiers: Vec<Tier> = serde_json::from_reader(reader).map_err(|e| Error::json(path, e))?;
    debug!("Loaded {} tiers from {path:?}", tiers.len());
    validate(&tiers)?;
    Ok(tiers)
}

/// Verify the tier parameters.
pub fn validate(tiers: &[Tier]) -> Result<()> {
    let mut seen: HashSet<Difficulty> = HashSet::new();

    for tier in tiers {
        let invalid = |reason: &str| Error::InvalidTier {
            difficulty: tier.difficulty,
            reason: reason.to_string(),
        };

        if !seen.insert(tier.difficulty) {
            return Err(invalid("the tier is defined several times"));
        }
        if tier.grid_rows == 0 || tier.grid_cols == 0 {
            return Err(invalid("the grid must have at least one row and one column"));
        }
        if tier.min_words == 0 {
            return Err(invalid("min_words must be at least 1"));
        }
        if tier.min_words > tier.max_words {
            return Err(invalid("min_words is greater than max_words"));
        }
        if tier.min_word_length < MIN_WORD_LENGTH {
            return Err(invalid("min_word_length must be at least 3"));
        }
        if tier.min_word_length > tier.max_word_length {
            return Err(invalid("min_word_length is greater than max_word_length"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_tiers_are_valid() {
        let tiers: Vec<Tier> = default_tiers();
        assert!(validate(&tiers).is_ok());
        let difficulties: Vec<Difficulty> = tiers.iter().map(|t| t.difficulty).collect();
        assert_eq!(difficulties, Difficulty::all());
    }

    #[rstest]
    #[case::empty_grid(Tier { grid_rows: 0, ..default_tiers()[0].clone() })]
    #[case::no_words(Tier { min_words: 0, ..default_tiers()[0].clone() })]
    #[case::word_range(Tier { min_words: 9, max_words: 7, ..default_tiers()[0].clone() })]
    #[case::short_words(Tier { min_word_length: 2, ..default_tiers()[0].clone() })]
    #[case::length_range(Tier { min_word_length: 7, ..default_tiers()[0].clone() })]
    fn invalid_tiers(#[case] tier: Tier) {
        assert!(matches!(
            validate(&[tier]),
            Err(Error::InvalidTier {
                difficulty: Difficulty::Easy,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_tiers() {
        let tier: Tier = default_tiers()[1].clone();
        let err: Error = validate(&[tier.clone(), tier]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid medium tier: the tier is defined several times"
        );
    }

    #[test]
    fn tiers_from_json() {
        let json = r#"[{"difficulty": "hard", "grid_rows": 12, "grid_cols": 14, "min_words": 6,
            "max_words": 9, "min_word_length": 4, "max_word_length": 8, "puzzle_count": 20}]"#;
        let tiers: Vec<Tier> = serde_json::from_str(json).unwrap();
        assert!(validate(&tiers).is_ok());
        assert_eq!(tiers[0].difficulty, Difficulty::Hard);
        assert_eq!(tiers[0].grid_cols, 14);
        assert_eq!(tiers[0].puzzle_count, 20);
    }

    #[test]
    fn missing_tier_file() {
        let err: Error = load_tiers(Path::new("/nonexistent/tiers.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
