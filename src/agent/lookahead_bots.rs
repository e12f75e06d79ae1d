//! Two-ply bots.
//!
//! Each bot tries every legal move on a snapshot, looks at the opponent's
//! replies and keeps the move with the best score. A move that leaves the
//! opponent without a reply wins at once and is played immediately. Ties go
//! to the earliest move in the legal list.

use super::ai::{mobility, MaterialEvaluator};
use super::player::{MoveChoice, Player, Turn};
use crate::game_repr::{Board, Colour, Move};

/// Index of the move with the highest `score`, given the board after the
/// move and the opponent's replies.
fn pick_by_replies<F>(turn: &Turn<'_>, mut score: F) -> MoveChoice
where
    F: FnMut(&Board, &[Move]) -> i32,
{
    let mut best: Option<(usize, i32)> = None;
    for (idx, mv) in turn.legal_moves.iter().enumerate() {
        let mut after = turn.board.snapshot();
        if after.apply_move(mv).is_err() {
            continue;
        }
        let replies = after.legal_moves(turn.colour.opposite());
        if replies.is_empty() {
            return MoveChoice::Index(idx);
        }
        let value = score(&after, &replies);
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((idx, value));
        }
    }
    MoveChoice::Index(best.map_or(0, |(idx, _)| idx))
}

/// Lowest `value` over the positions reachable by one reply.
fn worst_reply<F>(board: &Board, replies: &[Move], value: F) -> i32
where
    F: Fn(&Board) -> i32,
{
    replies
        .iter()
        .filter_map(|reply| {
            let mut after = board.snapshot();
            after.apply_move(reply).ok()?;
            Some(value(&after))
        })
        .min()
        .unwrap_or(i32::MIN)
}

/// Leaves the opponent as many replies as possible.
pub struct ScaredyCat {
    name: String,
}

impl ScaredyCat {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for ScaredyCat {
    fn choose_move(&mut self, turn: &Turn<'_>) -> MoveChoice {
        pick_by_replies(turn, |_, replies| replies.len() as i32)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Maximises its own mobility after the opponent's most restricting reply.
pub struct Flexibility {
    name: String,
}

impl Flexibility {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for Flexibility {
    fn choose_move(&mut self, turn: &Turn<'_>) -> MoveChoice {
        let colour: Colour = turn.colour;
        pick_by_replies(turn, |after, replies| worst_reply(after, replies, |b| mobility(b, colour)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Two-ply material minimax, men worth 1 and kings 4.
pub struct GreedyCat {
    name: String,
    material: MaterialEvaluator,
}

impl GreedyCat {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), material: MaterialEvaluator::new(1, 4) }
    }
}

impl Player for GreedyCat {
    fn choose_move(&mut self, turn: &Turn<'_>) -> MoveChoice {
        let colour = turn.colour;
        let material = self.material;
        pick_by_replies(turn, |after, replies| {
            worst_reply(after, replies, |b| material.balance_for(b, colour))
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
