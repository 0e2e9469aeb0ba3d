/*
puzzle_db.rs

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

//! Save and restore the puzzle database.
//!
//! The database is a serialization of the [`PuzzleDb`] object by using [`serde`].
//! It is written either as plain JSON, or as a JavaScript file that the game page loads
//! directly:
//!
//! ```js
//! // Crossword puzzle database
//! // Generated at: 2025-06-01T10:12:44.861+02:00
//! // Total puzzles: 3000
//!
//! const PUZZLE_DB = {
//!   "version": "1.0.0",
//!   "totalCount": 3000,
//!   "puzzles": { "easy": [...], "medium": [...], "hard": [...] }
//! };
//! ```

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::config::DB_VERSION;
use crate::error::{Error, Result};
use crate::generator::assembler::Puzzle;
use crate::generator::batch::TierReport;
use crate::generator::tier::Difficulty;

/// Name of the JavaScript constant in the `js` format.
const JS_CONSTANT: &str = "PUZZLE_DB";

/// File format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// JavaScript file declaring a `PUZZLE_DB` constant
    #[default]
    Js,

    /// Plain JSON
    Json,
}

/// Puzzle database.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDb {
    pub version: String,

    /// Number of puzzles, for all the difficulty levels.
    pub total_count: usize,

    pub puzzles: BTreeMap<Difficulty, Vec<Puzzle>>,
}

impl PuzzleDb {
    /// Create a [`PuzzleDb`] object from the batch reports.
    pub fn from_reports(reports: Vec<TierReport>) -> Self {
        // The game expects all the levels, even empty
        let mut puzzles: BTreeMap<Difficulty, Vec<Puzzle>> = Difficulty::all()
            .into_iter()
            .map(|d| (d, Vec::new()))
            .collect();
        for report in reports {
            puzzles
                .entry(report.difficulty)
                .or_default()
                .extend(report.puzzles);
        }
        Self {
            version: DB_VERSION.to_string(),
            total_count: puzzles.values().map(Vec::len).sum(),
            puzzles,
        }
    }

    /// Number of puzzles for the difficulty level.
    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.puzzles.get(&difficulty).map_or(0, Vec::len)
    }
}

/// Object to save and restore the puzzle database.
pub struct SaverPuzzleDb {
    /// Path to the database file.
    save_file: PathBuf,

    format: OutputFormat,
}

impl SaverPuzzleDb {
    /// Create a [`SaverPuzzleDb`] object.
    pub fn new(save_file: PathBuf, format: OutputFormat) -> Self {
        debug!("Puzzle database file: {save_file:?} ({format:?})");
        Self { save_file, format }
    }

    /// Save the provided [`PuzzleDb`] object.
    pub fn save(&self, db: &PuzzleDb) -> Result<()> {
        if let Some(dir) = self.save_file.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let file: File =
            File::create(&self.save_file).map_err(|e| Error::io(&self.save_file, e))?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        self.write(&mut writer, db)
            .map_err(|e| Error::io(&self.save_file, e))?;
        info!("Saved {} puzzles to {:?}", db.total_count, self.save_file);
        for (difficulty, puzzles) in &db.puzzles {
            info!("    {difficulty}: {} puzzles", puzzles.len());
        }
        Ok(())
    }

    /// Write the database in the object's format.
    fn write<W: Write>(&self, writer: &mut W, db: &PuzzleDb) -> std::io::Result<()> {
        let json: String = serde_json::to_string_pretty(db)?;
        match self.format {
            OutputFormat::Json => writeln!(writer, "{json}")?,
            OutputFormat::Js => {
                writeln!(writer, "// Crossword puzzle database")?;
                writeln!(
                    writer,
                    "// Generated at: {}",
                    chrono::Local::now().to_rfc3339()
                )?;
                writeln!(writer, "// Total puzzles: {}", db.total_count)?;
                writeln!(writer)?;
                writeln!(writer, "const {JS_CONSTANT} = {json};")?;
            }
        }
        writer.flush()
    }

    /// Retrieve the saved [`PuzzleDb`] object.
    ///
    /// Return None if the database file does not exist.
    pub fn get_puzzle_db(&self) -> Result<Option<PuzzleDb>> {
        let text: String = match fs::read_to_string(&self.save_file) {
            Ok(t) => t,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Error::io(&self.save_file, error)),
            },
        };
        let db: PuzzleDb =
            serde_json::from_str(strip_js(&text)).map_err(|e| Error::json(&self.save_file, e))?;
        Ok(Some(db))
    }
}

/// Return the JSON part of a database file, whatever its format.
fn strip_js(text: &str) -> &str {
    let declaration: String = format!("const {JS_CONSTANT} =");
    match text.find(&declaration) {
        Some(i) => text[i + declaration.len()..]
            .trim()
            .trim_end_matches(';')
            .trim_end(),
        None => text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::assembler::{GridSize, PuzzleWord};
    use crate::generator::batch::TierStatus;
    use crate::generator::placement::Orientation;

    fn report(difficulty: Difficulty, count: usize) -> TierReport {
        let puzzle = Puzzle {
            grid_size: GridSize { rows: 10, cols: 10 },
            words: vec![PuzzleWord {
                word: "STONE".to_string(),
                row: 5,
                col: 2,
                orientation: Orientation::Horizontal,
                clue: "Small rock".to_string(),
                number: 1,
            }],
        };
        TierReport {
            difficulty,
            target: count,
            puzzles: vec![puzzle; count],
            attempts: count,
            iterations: 0,
            duration: 0.0,
            status: TierStatus::Complete,
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        let mut path: PathBuf = std::env::temp_dir();
        path.push(format!("crossgen-{}-{name}", std::process::id()));
        path
    }

    #[test]
    fn counts() {
        let db = PuzzleDb::from_reports(vec![
            report(Difficulty::Hard, 1),
            report(Difficulty::Easy, 3),
        ]);
        assert_eq!(db.version, "1.0.0");
        assert_eq!(db.total_count, 4);
        assert_eq!(db.count(Difficulty::Easy), 3);
        assert_eq!(db.count(Difficulty::Medium), 0);
        assert_eq!(db.puzzles.len(), 3);

        let value: serde_json::Value = serde_json::to_value(&db).unwrap();
        assert_eq!(value["totalCount"], 4);
        assert_eq!(value["puzzles"]["easy"][0]["words"][0]["w"], "STONE");
        assert_eq!(value["puzzles"]["hard"][0]["gridSize"]["rows"], 10);
        assert_eq!(value["puzzles"]["medium"], serde_json::json!([]));
    }

    #[test]
    fn js_file_round_trip() {
        let path: PathBuf = temp_file("db.js");
        let saver = SaverPuzzleDb::new(path.clone(), OutputFormat::Js);
        let db = PuzzleDb::from_reports(vec![report(Difficulty::Medium, 2)]);

        saver.save(&db).unwrap();
        let text: String = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("// Crossword puzzle database\n// Generated at: "));
        assert!(text.contains("// Total puzzles: 2\n"));
        assert!(text.trim_end().ends_with("};"));
        assert_eq!(saver.get_puzzle_db().unwrap(), Some(db));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn json_file_round_trip() {
        let path: PathBuf = temp_file("db.json");
        let saver = SaverPuzzleDb::new(path.clone(), OutputFormat::Json);
        let db = PuzzleDb::from_reports(vec![report(Difficulty::Easy, 1)]);

        saver.save(&db).unwrap();
        let text: String = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(saver.get_puzzle_db().unwrap(), Some(db));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_database() {
        let saver = SaverPuzzleDb::new(temp_file("missing.js"), OutputFormat::Js);
        assert_eq!(saver.get_puzzle_db().unwrap(), None);
    }
}
