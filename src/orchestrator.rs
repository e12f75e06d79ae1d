//! Single-game state machine.
//!
//! This module contains [`Game`], which drives one bot-vs-bot game from the
//! first ply to a verdict. It manages:
//! - Turn alternation and move requests to the two [`Player`]s
//! - Validation of every answer against the generated legal moves
//! - Win detection (side to move has no legal move)
//! - Draw detection (threefold repetition, fifty-move rule)
//! - Per-side statistics and the optional move log
//!
//! # Example Flow
//!
//! ```text
//! [ToMove(Light)] -> generate moves -> ask player -> validate
//!   -> [Evaluating] -> apply -> repetition? fifty-move?
//!   -> [ToMove(Dark)] ... -> [Terminal(Won | Draw)]
//! ```

use crate::agent::player::{DrawReason, MoveChoice, Outcome, Player, Turn};
use crate::error::{ArenaError, Result};
use crate::game_repr::{pdn, Board, Colour, Move, PositionKey};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Plies without a capture or promotion after which the game is drawn
/// (fifty moves per side).
pub const QUIET_PLY_LIMIT: usize = 100;

/// Occurrences of one position that draw the game.
pub const REPETITION_LIMIT: u32 = 3;

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for this colour's move
    ToMove(Colour),
    /// A move by this colour is being applied and judged
    Evaluating(Colour),
    Terminal(Outcome),
}

/// Captures and promotions credited to one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideStats {
    pub name: String,
    pub captures: usize,
    pub kings_made: usize,
}

/// Terminal record of a finished game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub game_id: usize,
    pub round: usize,
    pub outcome: Outcome,
    pub light: SideStats,
    pub dark: SideStats,
    /// Plies played in this game
    pub plies: usize,
    /// Per-move text log, present when move recording was on
    pub move_log: Option<String>,
    /// Record of the whole game in the PDN-like format
    pub record: Option<String>,
    /// Side that lost by playing an illegal move
    pub forfeited_by: Option<Colour>,
}

impl GameResult {
    pub fn side(&self, colour: Colour) -> &SideStats {
        match colour {
            Colour::Light => &self.light,
            Colour::Dark => &self.dark,
        }
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.outcome.winner().map(|c| self.side(c).name.as_str())
    }

    pub fn loser_name(&self) -> Option<&str> {
        self.outcome.winner().map(|c| self.side(c.opposite()).name.as_str())
    }

    /// Human-readable block used in the summary report.
    pub fn summary(&self) -> String {
        let (first, second) = match self.outcome {
            Outcome::Won(winner) => (
                (winner, "Winner Details:"),
                (winner.opposite(), "Loser Details:"),
            ),
            Outcome::Draw(_) => (
                (Colour::Light, "Light Player Details:"),
                (Colour::Dark, "Dark Player Details:"),
            ),
        };

        let mut out = String::new();
        let _ = writeln!(out, "Game ID: {}", self.game_id);
        let _ = writeln!(out, "Game Round: {}", self.round);
        match self.outcome {
            Outcome::Won(_) => {
                let _ = writeln!(out, "Winner: {}", self.winner_name().unwrap_or_default());
            }
            Outcome::Draw(reason) => {
                let _ = writeln!(out, "Winner: Drawn Game ({reason})");
            }
        }
        let _ = writeln!(out, "Total Moves: {}", self.plies);
        if let Some(colour) = self.forfeited_by {
            let _ = writeln!(out, "Forfeit: {} played an illegal move", self.side(colour).name);
        }
        for (colour, header) in [first, second] {
            let side = self.side(colour);
            let _ = writeln!(out);
            let _ = writeln!(out, "{header}");
            let _ = writeln!(out, "    Name: {}", side.name);
            let _ = writeln!(out, "    Colour: {colour}");
            let _ = writeln!(out, "    Kings Made: {}", side.kings_made);
            let _ = writeln!(out, "    Number of Captures: {}", side.captures);
        }
        out
    }
}

/// Drives one game between two players.
///
/// # Game Flow
///
/// Each call to [`step`](Game::step) plays one ply:
/// 1. Generates the legal moves for the side to move; none means a loss
/// 2. Hands the player a [`Turn`] and validates its [`MoveChoice`]
/// 3. Applies the move, crediting captures and promotions
/// 4. Counts the resulting position and checks both draw rules
/// 5. Passes the turn, or enters [`GamePhase::Terminal`]
///
/// Errors (an illegal choice, a broken board invariant) end the game
/// immediately and are returned to the caller; they are never retried.
pub struct Game {
    game_id: usize,
    round: usize,
    board: Board,
    /// Indexed by `Colour::index()`
    players: [Box<dyn Player>; 2],
    phase: GamePhase,
    forfeited_by: Option<Colour>,
    /// History length when this game started (non-zero after a record import)
    first_ply: usize,
    /// Side that made the first move in the board's history
    first_colour: Colour,
    last_action_ply: usize,
    repetitions: HashMap<PositionKey, u32>,
    stats: [SideStats; 2],
    move_log: Option<String>,
}

impl Game {
    /// New game on `board` with Light to move.
    pub fn new(board: Board, light: Box<dyn Player>, dark: Box<dyn Player>) -> Self {
        Self::starting_with(board, light, dark, Colour::Light)
    }

    /// New game on `board` with `to_move` on turn, e.g. after a record import.
    pub fn starting_with(
        board: Board,
        light: Box<dyn Player>,
        dark: Box<dyn Player>,
        to_move: Colour,
    ) -> Self {
        let stats = [
            SideStats { name: light.name().to_string(), ..SideStats::default() },
            SideStats { name: dark.name().to_string(), ..SideStats::default() },
        ];
        let first_ply = board.history().len();
        let mut repetitions = HashMap::new();
        // The starting position counts as its first occurrence
        repetitions.insert(board.position_key(to_move), 1);

        Self {
            game_id: 0,
            round: 0,
            board,
            players: [light, dark],
            phase: GamePhase::ToMove(to_move),
            forfeited_by: None,
            first_ply,
            first_colour: if first_ply % 2 == 0 { to_move } else { to_move.opposite() },
            last_action_ply: first_ply,
            repetitions,
            stats,
            move_log: None,
        }
    }

    pub fn with_id(mut self, game_id: usize, round: usize) -> Self {
        self.game_id = game_id;
        self.round = round;
        self
    }

    /// Keep a per-move text log with a board diagram after every ply.
    pub fn recording_moves(mut self, record: bool) -> Self {
        self.move_log = record.then(String::new);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Plies played on the board, including any imported prefix.
    pub fn ply(&self) -> usize {
        self.board.history().len()
    }

    pub fn last_action_ply(&self) -> usize {
        self.last_action_ply
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Terminal(_))
    }

    /// Plays one ply, returning the new phase.
    pub fn step(&mut self) -> Result<GamePhase> {
        let colour = match self.phase {
            GamePhase::ToMove(colour) => colour,
            other => return Ok(other),
        };

        let legal = self.board.legal_moves(colour);
        if legal.is_empty() {
            debug!("{colour} has no legal moves");
            self.finish(Outcome::Won(colour.opposite()));
            return Ok(self.phase);
        }

        let choice = {
            let turn = Turn {
                board: &self.board,
                colour,
                legal_moves: &legal,
                history: self.board.history(),
                last_action_ply: self.last_action_ply,
                ply: self.board.history().len(),
            };
            self.players[colour.index()].choose_move(&turn)
        };

        let mv = self.resolve(choice, &legal, colour)?;
        self.play(colour, mv)
    }

    /// Plays `mv` for the side to move without consulting its player.
    ///
    /// The move must be in the generated legal list.
    pub fn execute_move(&mut self, mv: &Move) -> Result<GamePhase> {
        let colour = match self.phase {
            GamePhase::ToMove(colour) => colour,
            other => {
                return Err(ArenaError::InvariantViolation {
                    detail: format!("no move can be played in phase {other:?}"),
                })
            }
        };
        let legal = self.board.legal_moves(colour);
        let mv = self.resolve(MoveChoice::Move(mv.clone()), &legal, colour)?;
        self.play(colour, mv)
    }

    /// Runs to completion and returns the result.
    pub fn run(mut self) -> Result<GameResult> {
        while !self.is_over() {
            self.step()?;
        }
        Ok(self.into_result())
    }

    /// Final record. Meaningful once the game is terminal.
    pub fn into_result(self) -> GameResult {
        let outcome = match self.phase {
            GamePhase::Terminal(outcome) => outcome,
            // Unfinished games are scored as drawn
            _ => Outcome::Draw(DrawReason::FiftyMoveRule),
        };
        let record = self.export_record().ok();
        let [light, dark] = self.stats;
        GameResult {
            game_id: self.game_id,
            round: self.round,
            outcome,
            light,
            dark,
            plies: self.board.history().len() - self.first_ply,
            move_log: self.move_log,
            record,
            forfeited_by: self.forfeited_by,
        }
    }

    /// Ends the game as a loss for `colour`, e.g. after it answered with an
    /// illegal move.
    pub fn forfeit(&mut self, colour: Colour) {
        if self.is_over() {
            return;
        }
        warn!(
            "game {}: {} forfeits as {colour}",
            self.game_id,
            self.stats[colour.index()].name
        );
        self.forfeited_by = Some(colour);
        self.finish(Outcome::Won(colour.opposite()));
    }

    /// The board's whole history as a record, replayed from its first move.
    pub fn export_record(&self) -> Result<String> {
        let mut origin = self.board.clone();
        while origin.undo_move().is_some() {}
        pdn::export(&origin, self.first_colour, self.board.history())
    }

    fn resolve(&self, choice: MoveChoice, legal: &[Move], colour: Colour) -> Result<Move> {
        let illegal = |detail: String| ArenaError::IllegalMove {
            colour,
            player: self.players[colour.index()].name().to_string(),
            detail,
        };
        match choice {
            MoveChoice::Index(idx) => legal.get(idx).cloned().ok_or_else(|| {
                illegal(format!("index {idx} out of range for {} legal moves", legal.len()))
            }),
            MoveChoice::Move(mv) => legal
                .iter()
                .find(|m| **m == mv)
                .cloned()
                .ok_or_else(|| illegal(format!("{mv} is not among the legal moves"))),
        }
    }

    fn play(&mut self, colour: Colour, mv: Move) -> Result<GamePhase> {
        self.phase = GamePhase::Evaluating(colour);

        let effect = self.board.apply_move(&mv)?;
        let ply = self.board.history().len();

        let side = &mut self.stats[colour.index()];
        side.captures += effect.captured_count;
        if effect.promoted {
            side.kings_made += 1;
        }
        if effect.is_action() {
            self.last_action_ply = ply;
        }
        debug!("ply {ply}: {colour} plays {mv}");

        if let Some(log) = self.move_log.as_mut() {
            let _ = writeln!(log, "Move {}: {colour}'s turn", ply - self.first_ply);
            let _ = writeln!(log, "Moved from {} to {}", mv.start, mv.end);
            let _ = writeln!(log, "{}", self.board);
        }

        let next = colour.opposite();
        let seen = self.repetitions.entry(self.board.position_key(next)).or_insert(0);
        *seen += 1;

        if *seen >= REPETITION_LIMIT {
            self.finish(Outcome::Draw(DrawReason::Repetition));
        } else if ply - self.last_action_ply >= QUIET_PLY_LIMIT {
            self.finish(Outcome::Draw(DrawReason::FiftyMoveRule));
        } else {
            self.phase = GamePhase::ToMove(next);
        }
        Ok(self.phase)
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = GamePhase::Terminal(outcome);
        info!(
            "game {} (round {}): {} vs {}: {} after {} plies",
            self.game_id,
            self.round,
            self.stats[0].name,
            self.stats[1].name,
            outcome,
            self.board.history().len() - self.first_ply
        );
        for colour in [Colour::Light, Colour::Dark] {
            self.players[colour.index()].game_ended(outcome, colour);
        }
    }
}
