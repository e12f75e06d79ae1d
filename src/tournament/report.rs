//! Result files written during a tournament.
//!
//! Everything lands in one timestamped folder:
//! - `game_result_summary.txt`: one block per game, appended each round
//! - `game_<id>.txt`: the block plus the move log, when moves are recorded
//! - `game_<id>.pdn`: the game record, when record export is on
//! - `game_result_stats.txt`: per-bot counts, percentages, ratings and
//!   head-to-head results, written at the end

use super::rating::{performance_rating, BotTracker};
use crate::error::{ArenaError, Result};
use crate::game_repr::{pdn, Colour};
use crate::orchestrator::GameResult;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

pub const FOLDER_PREFIX: &str = "checkers_game_results";
pub const SUMMARY_FILE: &str = "game_result_summary.txt";
pub const STATS_FILE: &str = "game_result_stats.txt";

const LABEL_WIDTH: usize = 10;
const COL_WIDTH: usize = 8;

fn separator(width: usize) -> String {
    "=".repeat(width)
}

/// The folder one tournament writes into.
#[derive(Debug, Clone)]
pub struct ResultsFolder {
    path: PathBuf,
}

impl ResultsFolder {
    /// Creates `<output_dir>/checkers_game_results_<YYYYmmdd_HHMMSS>`.
    pub fn create(output_dir: &Path, now: DateTime<Local>) -> Result<Self> {
        let path = output_dir.join(format!("{FOLDER_PREFIX}_{}", now.format("%Y%m%d_%H%M%S")));
        fs::create_dir_all(&path).map_err(|e| ArenaError::io(&path, e))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one summary block per game, and writes the per-game files.
    pub fn write_game_results(&self, results: &[GameResult], export_pdn: bool) -> Result<()> {
        let summary_path = self.path.join(SUMMARY_FILE);
        let mut summary = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&summary_path)
            .map_err(|e| ArenaError::io(&summary_path, e))?;

        for result in results {
            let block = summary_block(result);
            summary
                .write_all(block.as_bytes())
                .map_err(|e| ArenaError::io(&summary_path, e))?;

            if let Some(moves) = &result.move_log {
                let path = self.path.join(format!("game_{}.txt", result.game_id));
                fs::write(&path, format!("{block}Moves: \n{moves}")).map_err(|e| ArenaError::io(&path, e))?;
            }
            if export_pdn {
                if let Some(record) = &result.record {
                    let path = self.path.join(format!("game_{}.pdn", result.game_id));
                    pdn::write_record(&path, &pdn_document(result, record))?;
                }
            }
        }
        Ok(())
    }

    pub fn write_stats(&self, trackers: &[BotTracker]) -> Result<()> {
        let path = self.path.join(STATS_FILE);
        fs::write(&path, format_stats(trackers)).map_err(|e| ArenaError::io(&path, e))
    }
}

fn summary_block(result: &GameResult) -> String {
    format!("{}\n{}\n", result.summary(), separator(40))
}

/// Tag pairs and moves of one game, with the result marker at the end.
fn pdn_document(result: &GameResult, moves: &str) -> String {
    let marker = match result.outcome.winner() {
        Some(Colour::Light) => "1-0",
        Some(Colour::Dark) => "0-1",
        None => "1/2-1/2",
    };
    format!(
        "[Event \"Round {}\"]\n[Light \"{}\"]\n[Dark \"{}\"]\n[Result \"{marker}\"]\n{moves} {marker}",
        result.round, result.light.name, result.dark.name
    )
}

fn percent(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Text of the statistics file.
pub fn format_stats(trackers: &[BotTracker]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Game Statistics");
    let _ = writeln!(out, "{}\n", separator(60));

    for bot in trackers {
        let stats = &bot.stats;
        let _ = writeln!(out, "Bot Name: {} ({})", bot.unique_name(), bot.rating.round());
        let _ = writeln!(out, "{}", "-".repeat(60));
        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$}{:<COL_WIDTH$}{:<COL_WIDTH$}{:<COL_WIDTH$}",
            "", "Win", "Draw", "Loss"
        );

        let rows = [
            ("Light", stats.counts(Some(Colour::Light))),
            ("Dark", stats.counts(Some(Colour::Dark))),
            ("Overall", stats.counts(None)),
        ];
        for (label, (w, d, l)) in rows {
            let _ = writeln!(out, "{label:<LABEL_WIDTH$}{w:<COL_WIDTH$}{d:<COL_WIDTH$}{l:<COL_WIDTH$}");
        }
        for (label, (w, d, l)) in rows {
            let total = w + d + l;
            let score = if total == 0 { 0.0 } else { (w as f64 + 0.5 * d as f64) / total as f64 * 100.0 };
            let _ = writeln!(
                out,
                "{label:<LABEL_WIDTH$}{:<COL_WIDTH$}{:<COL_WIDTH$}{:<COL_WIDTH$}= {score:.2}%",
                format!("{:.1}%", percent(w, total)),
                format!("{:.1}%", percent(d, total)),
                format!("{:.1}%", percent(l, total)),
            );
        }

        let opponents: Vec<_> = bot.h2h_stats.iter().filter(|(_, s)| s.total_games() > 0).collect();
        if !opponents.is_empty() {
            let _ = writeln!(out, "\nHead to head:");
            for (name, h2h) in opponents {
                let (w, d, l) = h2h.counts(None);
                let _ = write!(out, "  vs {name:<24} {w:>3} W {d:>3} D {l:>3} L");
                let opp_rating = trackers.iter().find(|t| t.unique_name() == *name).map(|t| t.rating);
                if let Some((perf, diff)) =
                    opp_rating.and_then(|r| performance_rating(w, d, l, bot.rating, r))
                {
                    let _ = write!(out, "  perf {} ({:+})", perf.round(), diff.round());
                }
                let _ = writeln!(out);
            }
        }

        let _ = writeln!(out, "{}\n", separator(60));
    }
    out
}
