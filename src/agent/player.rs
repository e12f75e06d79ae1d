//! Player trait and associated types for checkers bots.
//!
//! Every strategy, from the random mover to the alpha-beta searchers,
//! implements [`Player`] and is driven by the game state machine in
//! [`crate::orchestrator`].
//!
//! # Design Philosophy
//!
//! The trait focuses on **behaviour** rather than construction. Bots need
//! different parameters (an RNG seed, a search depth, an evaluator), so the
//! trait has no constructor; [`crate::agent::BotKind`] builds them.
//!
//! # Synchronous Design
//!
//! `choose_move()` is blocking. Search bots bound their own thinking time
//! and fall back to a legal move when the budget runs out, so the game loop
//! simply calls and waits.

use crate::game_repr::{Board, Colour, Move};

/// Why a game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Same placement with the same side to move for the third time
    Repetition,
    /// 100 plies without a capture or a promotion
    FiftyMoveRule,
}

impl std::fmt::Display for DrawReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawReason::Repetition => f.write_str("threefold repetition"),
            DrawReason::FiftyMoveRule => f.write_str("fifty-move rule"),
        }
    }
}

/// Final verdict of a game.
///
/// Passed to players via `game_ended()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Won(Colour),
    Draw(DrawReason),
}

impl Outcome {
    pub fn winner(&self) -> Option<Colour> {
        match self {
            Outcome::Won(colour) => Some(*colour),
            Outcome::Draw(_) => None,
        }
    }

    /// 1 for a win, 0.5 for a draw, 0 for a loss
    pub fn score_for(&self, colour: Colour) -> f64 {
        match self {
            Outcome::Won(winner) if *winner == colour => 1.0,
            Outcome::Won(_) => 0.0,
            Outcome::Draw(_) => 0.5,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won(colour) => write!(f, "{colour} wins"),
            Outcome::Draw(reason) => write!(f, "draw by {reason}"),
        }
    }
}

/// Everything a bot is shown when it is asked to move.
///
/// The board is borrowed immutably; bots that look ahead work on
/// [`Board::snapshot`] copies.
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    pub board: &'a Board,
    pub colour: Colour,
    /// The authoritative legal moves; the answer must come from this list
    pub legal_moves: &'a [Move],
    pub history: &'a [Move],
    /// Ply of the last capture or promotion (0 if none yet)
    pub last_action_ply: usize,
    /// Plies played so far
    pub ply: usize,
}

impl Turn<'_> {
    /// Plies left before the fifty-move rule draws the game.
    pub fn plies_until_draw(&self) -> usize {
        crate::orchestrator::QUIET_PLY_LIMIT.saturating_sub(self.ply - self.last_action_ply)
    }
}

/// A bot's answer: an index into [`Turn::legal_moves`] or a move value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveChoice {
    Index(usize),
    Move(Move),
}

/// Trait for anything that can pick checkers moves.
///
/// # Required Methods
///
/// `choose_move()` and `name()`. `game_ended()` defaults to doing nothing.
///
/// # Method Behaviour
///
/// ## `choose_move()`
/// - Must answer with a member of `turn.legal_moves` (by index or value).
///   Anything else is an illegal move and forfeits the game.
/// - Must not keep references to the board past the call.
///
/// ## `game_ended()`
/// - Default: does nothing
/// - Override: to reset per-game state
///
/// # Thread Safety
///
/// Players are `Send` so tournaments can move them onto worker threads.
pub trait Player: Send {
    fn choose_move(&mut self, turn: &Turn<'_>) -> MoveChoice;

    /// Notify this player that the game has ended.
    fn game_ended(&mut self, _outcome: Outcome, _colour: Colour) {
        // Default: do nothing
    }

    /// Display name, used in logs and reports.
    fn name(&self) -> &str;
}
