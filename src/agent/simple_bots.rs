//! Bots that do not look ahead.

use super::player::{MoveChoice, Player, Turn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks uniformly among the legal moves.
pub struct RandomBot {
    name: String,
    rng: StdRng,
}

impl RandomBot {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self { name: name.into(), rng: StdRng::seed_from_u64(seed) }
    }
}

impl Player for RandomBot {
    fn choose_move(&mut self, turn: &Turn<'_>) -> MoveChoice {
        MoveChoice::Index(self.rng.gen_range(0..turn.legal_moves.len().max(1)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Always plays the first generated move.
pub struct FirstMover {
    name: String,
}

impl FirstMover {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for FirstMover {
    fn choose_move(&mut self, _turn: &Turn<'_>) -> MoveChoice {
        MoveChoice::Index(0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Answers with the opponent's last move reflected through the board
/// centre, when that is legal; otherwise plays randomly.
pub struct CopyCat {
    name: String,
    rng: StdRng,
}

impl CopyCat {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self { name: name.into(), rng: StdRng::seed_from_u64(seed) }
    }
}

impl Player for CopyCat {
    fn choose_move(&mut self, turn: &Turn<'_>) -> MoveChoice {
        let size = turn.board.size();
        let copied = turn
            .history
            .last()
            .map(|last| last.mirrored(size))
            .and_then(|mirror| turn.legal_moves.iter().position(|mv| *mv == mirror));

        match copied {
            Some(idx) => MoveChoice::Index(idx),
            None => MoveChoice::Index(self.rng.gen_range(0..turn.legal_moves.len().max(1))),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
