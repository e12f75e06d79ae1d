//! MinimaxPlayer - alpha-beta search bot
//!
//! Delegates move selection to [`iterative_deepening_search`] with a
//! pluggable [`Evaluator`] at the leaves. The search depth is either fixed or
//! picked per move from the material left on the board.
//!
//! # Depth Policies
//!
//! - **Fixed(d)**: always search `d` plies (plus forced captures)
//! - **Adaptive**: 8 plies when either side is down to a single piece,
//!   6 when either side has two pieces or at most 12 pieces remain,
//!   4 otherwise

use super::evaluation::Evaluator;
use super::search::{iterative_deepening_search, SearchLimits};
use crate::agent::player::{MoveChoice, Player, Turn};
use crate::game_repr::{Board, Colour};
use log::debug;
use std::time::Duration;

/// How deep to search for a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthPolicy {
    Fixed(i32),
    Adaptive,
}

impl DepthPolicy {
    /// Search depth for `board`.
    pub fn depth_for(&self, board: &Board) -> i32 {
        match self {
            DepthPolicy::Fixed(depth) => *depth,
            DepthPolicy::Adaptive => {
                let light = board.count(Colour::Light);
                let dark = board.count(Colour::Dark);
                if light == 1 || dark == 1 {
                    8
                } else if light == 2 || dark == 2 || light + dark <= 12 {
                    6
                } else {
                    4
                }
            }
        }
    }
}

/// Bot that plays the principal move of an alpha-beta search.
///
/// Deterministic: the same position always yields the same move unless the
/// time budget cuts a search short.
pub struct MinimaxPlayer {
    name: String,
    evaluator: Box<dyn Evaluator>,
    depth: DepthPolicy,
    time_limit: Option<Duration>,
    parallel_root: bool,
}

impl MinimaxPlayer {
    pub fn new(name: impl Into<String>, evaluator: Box<dyn Evaluator>, depth: DepthPolicy) -> Self {
        Self {
            name: name.into(),
            evaluator,
            depth,
            time_limit: None,
            parallel_root: false,
        }
    }

    /// Bound each move's thinking time.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Search root moves on the rayon pool.
    pub fn with_parallel_root(mut self, parallel: bool) -> Self {
        self.parallel_root = parallel;
        self
    }

    pub fn depth_policy(&self) -> DepthPolicy {
        self.depth
    }

    fn limits_for(&self, board: &Board) -> SearchLimits {
        SearchLimits {
            depth: self.depth.depth_for(board),
            time_limit: self.time_limit,
            parallel_root: self.parallel_root,
        }
    }
}

impl Player for MinimaxPlayer {
    fn choose_move(&mut self, turn: &Turn<'_>) -> MoveChoice {
        // A single legal move needs no search
        if turn.legal_moves.len() == 1 {
            return MoveChoice::Index(0);
        }

        let limits = self.limits_for(turn.board);
        let result = iterative_deepening_search(turn.board, turn.colour, &limits, self.evaluator.as_ref());

        debug!(
            "[{}] {} depth {}, {} nodes, score {}, pv {} moves",
            self.name,
            self.evaluator.name(),
            result.depth,
            result.nodes_searched,
            result.score,
            result.principal_variation.len()
        );

        // The search generates the same list as the engine, so its index
        // maps straight back; fall back to the value if that ever changes.
        match (result.best_index, result.best_move) {
            (Some(idx), Some(mv)) if turn.legal_moves.get(idx) == Some(&mv) => MoveChoice::Index(idx),
            (_, Some(mv)) => MoveChoice::Move(mv),
            _ => MoveChoice::Index(0),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::MaterialEvaluator;
    use crate::game_repr::{Piece, Setup, Square};

    fn kings(light: usize, dark: usize) -> Board {
        let mut pieces = Vec::new();
        for i in 0..light {
            pieces.push(Piece::king(Square::new(7, (2 * i) as u8), Colour::Light));
        }
        for i in 0..dark {
            pieces.push(Piece::king(Square::new(0, (2 * i + 1) as u8), Colour::Dark));
        }
        Board::new(8, &Setup::Pieces(pieces)).unwrap()
    }

    #[test]
    fn test_adaptive_depth() {
        let adaptive = DepthPolicy::Adaptive;
        assert_eq!(adaptive.depth_for(&Board::default()), 4);
        assert_eq!(adaptive.depth_for(&kings(1, 4)), 8);
        assert_eq!(adaptive.depth_for(&kings(4, 2)), 6);
        assert_eq!(adaptive.depth_for(&kings(3, 3)), 6);
        assert_eq!(DepthPolicy::Fixed(3).depth_for(&kings(1, 1)), 3);
    }

    #[test]
    fn test_choice_is_legal() {
        let board = Board::default();
        let legal = board.legal_moves(Colour::Light);
        let turn = Turn {
            board: &board,
            colour: Colour::Light,
            legal_moves: &legal,
            history: board.history(),
            last_action_ply: 0,
            ply: 0,
        };
        let mut player = MinimaxPlayer::new("m", Box::new(MaterialEvaluator::new(2, 5)), DepthPolicy::Fixed(3));
        match player.choose_move(&turn) {
            MoveChoice::Index(idx) => assert!(idx < legal.len()),
            MoveChoice::Move(mv) => assert!(legal.contains(&mv)),
        }
    }
}
