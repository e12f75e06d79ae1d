// Static position evaluation
//
// Every evaluator scores from Light's point of view: positive is good for
// Light, negative is good for Dark. Search treats Light as the maximiser.
// The hunting evaluator works in thousandths of a man so its small
// positional nudges stay integral.

use crate::game_repr::{Board, Colour, Piece};

/// A total, deterministic scoring of a board. Positive favours Light.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board) -> i32;

    fn name(&self) -> &'static str;
}

/// Plain material count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialEvaluator {
    pub man: i32,
    pub king: i32,
}

impl MaterialEvaluator {
    pub const fn new(man: i32, king: i32) -> Self {
        Self { man, king }
    }

    /// Material of `colour` minus its opponent's.
    pub fn balance_for(&self, board: &Board, colour: Colour) -> i32 {
        let score = self.evaluate(board);
        match colour {
            Colour::Light => score,
            Colour::Dark => -score,
        }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let (light_men, light_kings) = board.material(Colour::Light);
        let (dark_men, dark_kings) = board.material(Colour::Dark);
        self.man * (light_men as i32 - dark_men as i32) + self.king * (light_kings as i32 - dark_kings as i32)
    }

    fn name(&self) -> &'static str {
        "material"
    }
}

// Hunting evaluator weights, in thousandths of a man
const MAN: i32 = 1000;
const KING: i32 = 4000;
const WINNING_ENDGAME: i32 = 100_000;
/// Bonus for a mopping-up endgame that is already fully won
const CRUSHING_ENDGAME: i32 = WINNING_ENDGAME + 10_000;
/// Material lead (king = 4, man = 1) at which trading down is encouraged
const TRADE_DOWN_LEAD: i32 = 6;

#[derive(Debug, Clone, Copy, Default)]
struct Census {
    men: i32,
    kings: i32,
}

impl Census {
    fn weight(&self) -> i32 {
        self.kings * 4 + self.men
    }
}

/// Positional evaluator built for converting won endgames.
///
/// Men gain value as they near promotion; kings are worth more when few
/// are on the board and lose a little for idling on their crowning row.
/// Once one side has a crushing king majority its kings are pulled toward
/// the nearest enemy piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct HunterEvaluator;

impl HunterEvaluator {
    fn endgame_bonus(light: Census, dark: Census) -> i32 {
        if light.kings >= 3 && dark.kings <= 1 && dark.men == 0 {
            CRUSHING_ENDGAME
        } else if light.kings >= 4 && dark.kings <= 2 && dark.men == 0 {
            WINNING_ENDGAME
        } else if dark.kings >= 3 && light.kings <= 1 && light.men == 0 {
            -CRUSHING_ENDGAME
        } else if dark.kings >= 4 && light.kings <= 2 && light.men == 0 {
            -WINNING_ENDGAME
        } else {
            0
        }
    }

    fn score_man(board: &Board, piece: &Piece, own: Census, opp: Census) -> i32 {
        let mut value = MAN;
        match piece.rows_to_promote(board.size()) {
            1 => value += 1000,
            2 => {
                // The two crowning squares two diagonals ahead
                for dir in piece.colour.forward_directions() {
                    match piece.position.offset(dir, 2, board.size()) {
                        None => value -= 100,
                        Some(sq) if board.is_empty_at(sq) => value += 100,
                        Some(_) => {}
                    }
                }
            }
            3 => value += 10,
            4 => value += 1,
            _ => {}
        }
        if own.weight() - opp.weight() >= TRADE_DOWN_LEAD {
            value = value * 98 / 100;
        }
        value
    }

    fn score_king(board: &Board, piece: &Piece, own: Census, opp: Census, hunting: bool) -> i32 {
        let mut value = KING;
        if own.kings == 1 {
            value += 1000;
            if opp.kings == 0 {
                value += 1000;
            }
        }
        if piece.rows_to_promote(board.size()) == 0 {
            value -= 500;
        }
        if hunting {
            let closest = board
                .pieces_of(piece.colour.opposite())
                .map(|other| piece.position.distance(other.position))
                .min();
            if let Some(dist) = closest.filter(|&d| d > 0) {
                value += 1000 / dist as i32;
            }
        }
        value
    }
}

impl Evaluator for HunterEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let mut light = Census::default();
        let mut dark = Census::default();
        for piece in board.pieces() {
            let census = match piece.colour {
                Colour::Light => &mut light,
                Colour::Dark => &mut dark,
            };
            if piece.is_king {
                census.kings += 1;
            } else {
                census.men += 1;
            }
        }

        let base = Self::endgame_bonus(light, dark);
        let mut score = base;

        for piece in board.pieces() {
            let (own, opp, sign) = match piece.colour {
                Colour::Light => (light, dark, 1),
                Colour::Dark => (dark, light, -1),
            };
            let hunting = sign * base >= WINNING_ENDGAME;
            let value = if piece.is_king {
                Self::score_king(board, piece, own, opp, hunting)
            } else {
                Self::score_man(board, piece, own, opp)
            };
            score += sign * value;
        }
        score
    }

    fn name(&self) -> &'static str {
        "hunter"
    }
}

/// Number of moves `colour` could make on `board`.
pub fn mobility(board: &Board, colour: Colour) -> i32 {
    board.legal_moves(colour).len() as i32
}
