// Minimax search with alpha-beta pruning
//
// Light is always the maximising side and Dark the minimising side, matching
// the sign convention of the evaluators. Each node works on its own snapshot
// of the board, so sibling branches never share mutable state.
//
// Forced captures are searched to completion: while the side to move must
// capture, the search keeps going regardless of the remaining depth.
//
// Iterative deepening wraps the fixed-depth search when a time budget is
// set. On expiry the result of the last completed depth is used, or the
// first legal move if not even depth 1 finished.

use super::evaluation::Evaluator;
use crate::game_repr::{Board, Colour, Move};
use log::{debug, warn};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Score of a won position, before the remaining-depth bonus
pub const WON: i32 = 10_000_000;

/// How often (in nodes) the clock is checked
const TIME_CHECK_INTERVAL: u64 = 1024;

/// True for scores that mean a forced win or loss.
pub fn is_decisive(score: i32) -> bool {
    score.abs() >= WON / 2
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Index of `best_move` in the root's legal move list
    pub best_index: Option<usize>,
    /// From Light's point of view
    pub score: i32,
    /// Deepest fully completed iteration (0 if none)
    pub depth: i32,
    pub nodes_searched: u64,
    pub elapsed: Duration,
    /// Expected line of play, starting with `best_move`
    pub principal_variation: Vec<Move>,
    /// False when the time budget cut the search short
    pub completed: bool,
}

impl SearchResult {
    fn empty() -> Self {
        Self {
            best_move: None,
            best_index: None,
            score: 0,
            depth: 0,
            nodes_searched: 0,
            elapsed: Duration::ZERO,
            principal_variation: Vec::new(),
            completed: true,
        }
    }
}

/// Search parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: i32,
    pub time_limit: Option<Duration>,
    /// Search root children on the rayon pool
    pub parallel_root: bool,
}

impl SearchLimits {
    pub fn fixed(depth: i32) -> Self {
        Self { depth, time_limit: None, parallel_root: false }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel_root = parallel;
        self
    }
}

/// Per-thread search bookkeeping
struct SearchContext {
    deadline: Option<Instant>,
    nodes: u64,
    aborted: bool,
}

impl SearchContext {
    fn new(deadline: Option<Instant>) -> Self {
        Self { deadline, nodes: 0, aborted: false }
    }

    fn out_of_time(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.nodes % TIME_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.aborted = true;
            }
        }
        self.aborted
    }
}

/// Score and principal variation of one subtree. The line is stored
/// deepest move first; the root reverses it.
type Line = (i32, Vec<Move>);

fn better(maximising: bool, score: i32, best: i32) -> bool {
    if maximising {
        score > best
    } else {
        score < best
    }
}

/// Alpha-beta minimax. Returns `None` if the clock ran out.
///
/// `depth` may go negative while a capture sequence is being resolved.
fn minimax(
    board: &Board,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    to_move: Colour,
    eval: &dyn Evaluator,
    ctx: &mut SearchContext,
) -> Option<Line> {
    ctx.nodes += 1;
    if ctx.out_of_time() {
        return None;
    }

    let moves = board.legal_moves(to_move);

    // No moves: the side to move has lost. Faster wins score higher.
    if moves.is_empty() {
        let score = match to_move {
            Colour::Light => -(WON + depth),
            Colour::Dark => WON + depth,
        };
        return Some((score, Vec::new()));
    }

    // Quiet leaf; forced captures are always played out
    if depth <= 0 && !moves[0].is_capture() {
        return Some((eval.evaluate(board), Vec::new()));
    }

    let maximising = to_move == Colour::Light;
    let mut best: Option<(i32, Vec<Move>, Move)> = None;

    for mv in moves {
        let mut child = board.snapshot();
        if child.apply_move(&mv).is_err() {
            continue;
        }
        let (score, line) = minimax(&child, depth - 1, alpha, beta, to_move.opposite(), eval, ctx)?;

        if best.as_ref().map_or(true, |(b, _, _)| better(maximising, score, *b)) {
            best = Some((score, line, mv));
        }

        let best_score = best.as_ref().map_or(score, |(b, _, _)| *b);
        if maximising {
            alpha = alpha.max(best_score);
        } else {
            beta = beta.min(best_score);
        }
        if alpha >= beta {
            break;
        }
    }

    match best {
        Some((score, mut line, mv)) => {
            line.push(mv);
            Some((score, line))
        }
        None => Some((eval.evaluate(board), Vec::new())),
    }
}

/// Best root move at a fixed depth: (index into `moves`, score, line).
fn search_root(
    board: &Board,
    moves: &[Move],
    to_move: Colour,
    depth: i32,
    eval: &dyn Evaluator,
    deadline: Option<Instant>,
    parallel: bool,
) -> (Option<(usize, i32, Vec<Move>)>, u64) {
    let maximising = to_move == Colour::Light;

    let search_child = |mv: &Move, alpha: i32, beta: i32, ctx: &mut SearchContext| -> Option<Line> {
        let mut child = board.snapshot();
        child.apply_move(mv).ok()?;
        minimax(&child, depth - 1, alpha, beta, to_move.opposite(), eval, ctx)
    };

    if parallel {
        // Full window for every child; each gets its own context
        let scored: Vec<(usize, Option<Line>, u64)> = moves
            .par_iter()
            .enumerate()
            .map(|(idx, mv)| {
                let mut ctx = SearchContext::new(deadline);
                let line = search_child(mv, i32::MIN, i32::MAX, &mut ctx);
                (idx, line, ctx.nodes)
            })
            .collect();

        let nodes: u64 = scored.iter().map(|(_, _, n)| n).sum();
        let mut best: Option<(usize, i32, Vec<Move>)> = None;
        for (idx, line, _) in scored {
            let Some((score, line)) = line else {
                return (None, nodes);
            };
            if best.as_ref().map_or(true, |(_, b, _)| better(maximising, score, *b)) {
                best = Some((idx, score, line));
            }
        }
        return (best, nodes);
    }

    let mut ctx = SearchContext::new(deadline);
    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut best: Option<(usize, i32, Vec<Move>)> = None;

    for (idx, mv) in moves.iter().enumerate() {
        let Some((score, line)) = search_child(mv, alpha, beta, &mut ctx) else {
            return (None, ctx.nodes);
        };
        if best.as_ref().map_or(true, |(_, b, _)| better(maximising, score, *b)) {
            best = Some((idx, score, line));
        }
        if let Some((_, b, _)) = &best {
            if maximising {
                alpha = alpha.max(*b);
            } else {
                beta = beta.min(*b);
            }
        }
    }
    (best, ctx.nodes)
}

/// Finds the best move for `to_move`.
///
/// Without a time limit this is a single search at `limits.depth`; with one,
/// depths 1..=`limits.depth` are searched in turn until the budget runs out.
pub fn iterative_deepening_search(
    board: &Board,
    to_move: Colour,
    limits: &SearchLimits,
    eval: &dyn Evaluator,
) -> SearchResult {
    let start_time = Instant::now();
    let deadline = limits.time_limit.map(|limit| start_time + limit);
    let mut result = SearchResult::empty();

    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        return result;
    }

    let max_depth = limits.depth.max(1);
    let first_depth = if deadline.is_some() { 1 } else { max_depth };

    for depth in first_depth..=max_depth {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            result.completed = false;
            warn!("no time left for {to_move} before depth {depth}");
            break;
        }
        let (best, nodes) = search_root(board, &moves, to_move, depth, eval, deadline, limits.parallel_root);
        result.nodes_searched += nodes;

        let Some((idx, score, mut line)) = best else {
            result.completed = false;
            warn!(
                "search for {to_move} ran out of time at depth {depth}; using depth {}",
                result.depth
            );
            break;
        };

        line.push(moves[idx].clone());
        line.reverse();

        result.best_move = Some(moves[idx].clone());
        result.best_index = Some(idx);
        result.score = score;
        result.depth = depth;
        result.principal_variation = line;

        debug!(
            "depth {depth}: best {} score {score} nodes {} ({:?})",
            moves[idx],
            result.nodes_searched,
            start_time.elapsed()
        );

        if is_decisive(score) {
            break;
        }
    }

    if result.best_move.is_none() {
        result.best_move = Some(moves[0].clone());
        result.best_index = Some(0);
    }
    result.elapsed = start_time.elapsed();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::{HunterEvaluator, MaterialEvaluator};
    use crate::game_repr::{Piece, Setup, Square};

    const MATERIAL: MaterialEvaluator = MaterialEvaluator::new(2, 5);

    fn board_with(pieces: Vec<Piece>) -> Board {
        Board::new(8, &Setup::Pieces(pieces)).unwrap()
    }

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col)
    }

    #[test]
    fn test_returns_a_legal_move_from_start() {
        let board = Board::default();
        let result = iterative_deepening_search(&board, Colour::Light, &SearchLimits::fixed(3), &MATERIAL);

        let legal = board.legal_moves(Colour::Light);
        let idx = result.best_index.unwrap();
        assert_eq!(result.best_move.as_ref(), Some(&legal[idx]));
        assert_eq!(result.principal_variation.first(), result.best_move.as_ref());
        assert_eq!(result.depth, 3);
        assert!(result.completed);
    }

    #[test]
    fn test_takes_free_material() {
        // Light can capture for free or step aside
        let board = board_with(vec![
            Piece::man(sq(5, 2), Colour::Light),
            Piece::man(sq(4, 3), Colour::Dark),
            Piece::man(sq(0, 7), Colour::Dark),
        ]);
        let result = iterative_deepening_search(&board, Colour::Light, &SearchLimits::fixed(2), &MATERIAL);
        assert!(result.best_move.unwrap().is_capture());
    }

    #[test]
    fn test_finds_immediate_win_for_dark() {
        // Dark's capture removes Light's last piece
        let board = board_with(vec![Piece::man(sq(1, 0), Colour::Dark), Piece::man(sq(2, 1), Colour::Light)]);
        let result = iterative_deepening_search(&board, Colour::Dark, &SearchLimits::fixed(4), &MATERIAL);
        assert_eq!(result.best_move.unwrap().end, sq(3, 2));
        assert!(is_decisive(result.score));
        assert!(result.score < 0, "Dark wins are negative: {}", result.score);
    }

    #[test]
    fn test_prefers_faster_win() {
        // Light king can win now by capturing, or dawdle
        let board = board_with(vec![Piece::king(sq(4, 3), Colour::Light), Piece::man(sq(3, 4), Colour::Dark)]);
        let result = iterative_deepening_search(&board, Colour::Light, &SearchLimits::fixed(5), &HunterEvaluator);
        assert_eq!(result.score, WON + 4);
    }

    #[test]
    fn test_capture_extension_sees_recapture() {
        // Light must take on (4,3); the recapture from (2,5) is searched
        // even though depth 1 is used up
        let board = board_with(vec![
            Piece::man(sq(5, 2), Colour::Light),
            Piece::man(sq(4, 3), Colour::Dark),
            Piece::man(sq(2, 5), Colour::Dark),
            Piece::man(sq(1, 6), Colour::Dark),
            Piece::man(sq(6, 7), Colour::Light),
        ]);
        let result = iterative_deepening_search(&board, Colour::Light, &SearchLimits::fixed(1), &MATERIAL);
        assert_eq!(result.principal_variation.len(), 2, "line: {:?}", result.principal_variation);
        assert!(result.principal_variation[1].is_capture());
    }

    #[test]
    fn test_parallel_root_agrees_with_sequential() {
        let board = Board::default();
        let sequential = iterative_deepening_search(&board, Colour::Light, &SearchLimits::fixed(4), &MATERIAL);
        let parallel = iterative_deepening_search(
            &board,
            Colour::Light,
            &SearchLimits::fixed(4).parallel(true),
            &MATERIAL,
        );
        assert_eq!(sequential.score, parallel.score);
        assert_eq!(sequential.best_index, parallel.best_index);
    }

    #[test]
    fn test_zero_time_budget_falls_back_to_a_legal_move() {
        let board = Board::default();
        let limits = SearchLimits::fixed(12).with_time_limit(Duration::ZERO);
        let result = iterative_deepening_search(&board, Colour::Light, &limits, &HunterEvaluator);
        assert!(!result.completed);
        assert_eq!(result.best_index, Some(0));
        assert_eq!(result.best_move, Some(board.legal_moves(Colour::Light)[0].clone()));
    }

    #[test]
    fn test_no_moves_gives_empty_result() {
        let board = board_with(vec![Piece::man(sq(2, 3), Colour::Dark)]);
        let result = iterative_deepening_search(&board, Colour::Light, &SearchLimits::fixed(3), &MATERIAL);
        assert!(result.best_move.is_none());
    }
}
