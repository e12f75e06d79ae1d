//! Legal move generation
//!
//! Simple steps and chain captures for every piece of one colour, followed by
//! the forced-capture filter: if any piece can capture, only captures are
//! legal for the whole side.

use super::board::Board;
use super::moves::{CaptureList, Move};
use super::piece::{Colour, Piece};
use super::square::Square;

/// All legal moves for `colour`, deduplicated, in board order.
///
/// An empty result means the side cannot move and has lost.
pub fn generate(board: &Board, colour: Colour) -> Vec<Move> {
    let mut simple = Vec::new();
    let mut captures = Vec::new();

    for piece in board.pieces_of(colour) {
        capture_chains(board, piece, &mut captures);
        // Once a capture exists the steps are filtered out anyway
        if captures.is_empty() {
            simple_moves(board, piece, &mut simple);
        }
    }

    if captures.is_empty() {
        simple
    } else {
        captures
    }
}

/// True if `colour` is obliged to capture this turn.
pub fn must_capture(board: &Board, colour: Colour) -> bool {
    let mut captures = Vec::new();
    board.pieces_of(colour).any(|piece| {
        capture_chains(board, piece, &mut captures);
        !captures.is_empty()
    })
}

fn simple_moves(board: &Board, piece: &Piece, moves: &mut Vec<Move>) {
    let size = board.size();
    for &dir in piece.directions() {
        if let Some(to) = piece.position.offset(dir, 1, size) {
            if board.is_empty_at(to) {
                moves.push(Move::simple(piece.position, to));
            }
        }
    }
}

/// Every maximal capture chain starting from `piece`, appended to `moves`.
fn capture_chains(board: &Board, piece: &Piece, moves: &mut Vec<Move>) {
    let mut path = CaptureList::new();
    extend_chain(board, piece, piece.position, &mut path, moves);
}

/// Depth-first over the hops available from `from`.
///
/// `path` holds the squares jumped so far in this branch; it is pushed before
/// descending and popped after, so siblings see the same state. Jumped pieces
/// stay on the board until the move is applied: they block landings and
/// cannot be jumped a second time. The moving piece's own start square counts
/// as empty, so a king may finish a loop where it began.
fn extend_chain(board: &Board, piece: &Piece, from: Square, path: &mut CaptureList, moves: &mut Vec<Move>) {
    let size = board.size();
    let mut extended = false;

    for &dir in piece.directions() {
        let (Some(mid), Some(dest)) = (from.offset(dir, 1, size), from.offset(dir, 2, size)) else {
            continue;
        };
        match board.piece_at(mid) {
            Some(victim) if victim.colour != piece.colour => {}
            _ => continue,
        }
        if path.contains(&mid) {
            continue;
        }
        if dest != piece.position && !board.is_empty_at(dest) {
            continue;
        }

        extended = true;
        path.push(mid);
        extend_chain(board, piece, dest, path, moves);
        path.pop();
    }

    // Leaf: at least one capture and nowhere further to go
    if !extended && !path.is_empty() {
        let mv = Move::capture(piece.position, from, path);
        if !moves.contains(&mv) {
            moves.push(mv);
        }
    }
}
