/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! List the difficulty tiers:
//!
//! ```
//! $ crossgen --ls
//! easy     10x10  5-7 words    3-6 letters   1000 puzzles
//! medium   13x13  8-12 words   4-9 letters   1000 puzzles
//! hard     16x16  13-18 words  5-12 letters  1000 puzzles
//! ```
//!
//! Generate 20 reproducible hard puzzles, with the clues from the game page:
//!
//! ```
//! $ crossgen -w words.txt -H index.html -f hard -c 20 --seed 42 -o hard.json --format json -s
//! ```

use clap::Parser;
use log::{LevelFilter, debug, error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crossgen::config::{self, ATTEMPTS_PER_PUZZLE, COPYRIGHT_NOTICE};
use crossgen::error::Result;
use crossgen::generator::batch::{BatchDriver, TierReport, TierStatus};
use crossgen::generator::engine::EngineSettings;
use crossgen::generator::lexicon::Lexicon;
use crossgen::generator::tier::{Difficulty, Tier};
use crossgen::loader;
use crossgen::saver::puzzle_db::{OutputFormat, PuzzleDb, SaverPuzzleDb};

/// Generate batches of crossword puzzles from a word list.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Word list, one word per line
    #[arg(short, long, default_value = "words.txt")]
    words: PathBuf,

    /// Page that declares the KNOWN_HINTS object, or JSON file of clues
    #[arg(short = 'H', long)]
    hints: Option<PathBuf>,

    /// Puzzle database to create
    #[arg(short, long, default_value = "puzzle_db.js")]
    output: PathBuf,

    /// Format of the puzzle database
    #[arg(value_enum, long, default_value_t = OutputFormat::Js)]
    format: OutputFormat,

    /// JSON file that defines the difficulty tiers
    #[arg(short, long)]
    tiers: Option<PathBuf>,

    /// Only generate the puzzles for this difficulty level
    #[arg(value_enum, short = 'f', long)]
    difficulty: Option<Difficulty>,

    /// Number of puzzles to generate for each difficulty level
    #[arg(short, long)]
    count: Option<usize>,

    /// Seed for the random generator, for reproducible batches
    #[arg(long)]
    seed: Option<u64>,

    /// Number of best candidates among which the next word is randomly chosen
    #[arg(long, default_value = "5")]
    top: NonZeroUsize,

    /// Maximum number of attempts for a puzzle
    #[arg(long, default_value = "50")]
    max_attempts: NonZeroUsize,

    /// Maximum number of growth iterations for an attempt
    #[arg(long, default_value = "500")]
    max_iterations: NonZeroUsize,

    /// List the difficulty tiers
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the exit status.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            error!("{e}");
            1
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let tiers: Vec<Tier> = select_tiers(args)?;

    //
    // List the tiers
    //
    if args.ls {
        for t in &tiers {
            println!(
                "{:<8} {:>2}x{:<4} {:<12} {:<13} {} puzzles",
                t.difficulty.to_string(),
                t.grid_rows,
                t.grid_cols,
                format!("{}-{} words", t.min_words, t.max_words),
                format!("{}-{} letters", t.min_word_length, t.max_word_length),
                t.puzzle_count
            );
        }
        return Ok(());
    }

    //
    // Build the lexicon
    //
    let words: Vec<String> = loader::load_words(&args.words)?;
    let clues: HashMap<String, String> = match &args.hints {
        Some(path) => loader::load_clues(path),
        None => HashMap::new(),
    };
    let lexicon = Lexicon::new(words, clues);

    let mut rng: StdRng = match args.seed {
        Some(seed) => {
            debug!("Random generator seed: {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    //
    // Generate and save the puzzles
    //
    let settings = EngineSettings {
        max_iterations: args.max_iterations.get(),
        max_attempts: args.max_attempts.get(),
        top_candidates: args.top.get(),
    };
    let mut driver = BatchDriver::new(&lexicon, settings, ATTEMPTS_PER_PUZZLE);
    let reports: Vec<TierReport> = driver.run(&tiers, &mut rng);

    if args.summary {
        print_summary(&reports);
    }

    let db = PuzzleDb::from_reports(reports);
    SaverPuzzleDb::new(args.output.clone(), args.format).save(&db)
}

/// Return the tiers to generate, after applying the command-line overrides.
fn select_tiers(args: &Args) -> Result<Vec<Tier>> {
    let mut tiers: Vec<Tier> = match &args.tiers {
        Some(path) => config::load_tiers(path)?,
        None => config::default_tiers(),
    };
    if let Some(difficulty) = args.difficulty {
        tiers.retain(|t| t.difficulty == difficulty);
    }
    if let Some(count) = args.count {
        for t in tiers.iter_mut() {
            t.puzzle_count = count;
        }
    }
    Ok(tiers)
}

fn print_summary(reports: &[TierReport]) {
    println!();
    for r in reports {
        let status: String = match r.status {
            TierStatus::Complete => "complete".to_string(),
            TierStatus::BatchExhausted => "gave up".to_string(),
            TierStatus::InsufficientLexicon {
                available,
                required,
            } => format!("not enough words ({available}/{required})"),
        };
        let average: f32 = if r.puzzles.is_empty() {
            0.0
        } else {
            r.duration / r.puzzles.len() as f32
        };
        println!(
            "{:>8}: {}/{} puzzles, {} attempts, {} iterations, {:.2}s ({:.4}s per puzzle), {status}",
            r.difficulty.to_string(),
            r.puzzles.len(),
            r.target,
            r.attempts,
            r.iterations,
            r.duration,
            average
        );
    }
}
