//! PDN-like game records
//!
//! Moves are written with 1-based dark-square numbers: `22-17` for a step,
//! `23x16` for a capture. When two legal moves share start and end the whole
//! landing path is spelled out (`1x10x19`) so the record replays exactly.
//! Import tolerates tag pairs, move numbers and result markers.

use super::board::Board;
use super::moves::Move;
use super::piece::Colour;
use super::square::Square;
use crate::error::{ArenaError, Result};
use std::path::Path;

const RESULT_MARKERS: [&str; 7] = ["1-0", "0-1", "1/2-1/2", "2-0", "0-2", "1-1", "*"];

/// Token for `mv`, given every legal move at that ply.
pub fn move_token(mv: &Move, legal: &[Move], size: usize) -> Result<String> {
    let number = |sq: Square| -> Result<String> {
        if !sq.is_dark() || !sq.is_on_board(size) {
            return Err(ArenaError::MalformedRecord {
                token: sq.to_string(),
                reason: "only dark squares can be numbered".into(),
            });
        }
        Ok(sq.to_number(size).to_string())
    };

    if !mv.is_capture() {
        return Ok(format!("{}-{}", number(mv.start)?, number(mv.end)?));
    }

    let ambiguous = legal
        .iter()
        .filter(|other| other.start == mv.start && other.end == mv.end)
        .count()
        > 1;

    let mut token = number(mv.start)?;
    if ambiguous {
        for sq in mv.landing_path() {
            token.push('x');
            token.push_str(&number(sq)?);
        }
    } else {
        token.push('x');
        token.push_str(&number(mv.end)?);
    }
    Ok(token)
}

/// Writes `moves` as a record, replaying them from `start` with `to_move`
/// on turn so ambiguous captures can be spelled out.
pub fn export(start: &Board, to_move: Colour, moves: &[Move]) -> Result<String> {
    let mut board = start.snapshot();
    let mut colour = to_move;
    let mut tokens = Vec::with_capacity(moves.len());

    for mv in moves {
        let legal = board.legal_moves(colour);
        tokens.push(move_token(mv, &legal, board.size())?);
        board.apply_move(mv)?;
        colour = colour.opposite();
    }
    Ok(tokens.join(" "))
}

/// Move tokens of a record, stripped of tags, comments, numbers and results.
pub fn tokens(record: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in record.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            continue;
        }
        let mut in_comment = false;
        for raw in line.split_whitespace() {
            if raw.starts_with('{') {
                in_comment = true;
            }
            if in_comment {
                in_comment = !raw.ends_with('}');
                continue;
            }
            // "12." / "12..." / "12.22-17"
            let token = raw.rsplit('.').next().unwrap_or(raw);
            if token.is_empty() || RESULT_MARKERS.contains(&token) {
                continue;
            }
            out.push(token.to_string());
        }
    }
    out
}

/// Finds the legal move a token names.
pub fn parse_move(token: &str, legal: &[Move], size: usize) -> Result<Move> {
    let malformed = |reason: &str| ArenaError::MalformedRecord {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let is_capture = token.contains('x');
    let sep = if is_capture { 'x' } else { '-' };
    if is_capture && token.contains('-') {
        return Err(malformed("mixes '-' and 'x'"));
    }

    let mut squares = Vec::new();
    for part in token.split(sep) {
        let number: u32 = part.parse().map_err(|_| malformed("expected square numbers"))?;
        let sq = Square::from_number(number, size)
            .ok_or_else(|| malformed("square number out of range"))?;
        squares.push(sq);
    }
    if squares.len() < 2 || (!is_capture && squares.len() != 2) {
        return Err(malformed("expected start and end squares"));
    }

    let start = squares[0];
    let end = squares[squares.len() - 1];
    let path = &squares[1..];

    let mut candidates = legal
        .iter()
        .filter(|mv| mv.start == start && mv.end == end && mv.is_capture() == is_capture)
        .filter(|mv| path.len() == 1 || mv.landing_path().as_slice() == path);

    match (candidates.next(), candidates.next()) {
        (Some(mv), None) => Ok(mv.clone()),
        (None, _) => Err(malformed("no legal move matches")),
        (Some(_), Some(_)) => Err(malformed("ambiguous, give the full capture path")),
    }
}

/// Replays `record` onto `board`, checking every move against the legal
/// list. Returns the side to move afterwards.
pub fn import(board: &mut Board, to_move: Colour, record: &str) -> Result<Colour> {
    let mut colour = to_move;
    for token in tokens(record) {
        let legal = board.legal_moves(colour);
        let mv = parse_move(&token, &legal, board.size())?;
        board.apply_move(&mv)?;
        colour = colour.opposite();
    }
    Ok(colour)
}

pub fn read_record(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ArenaError::io(path, e))
}

pub fn write_record(path: &Path, record: &str) -> Result<()> {
    std::fs::write(path, format!("{record}\n")).map_err(|e| ArenaError::io(path, e))
}
