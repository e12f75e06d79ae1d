use super::bitboards::Placement;
use super::movegen;
use super::moves::{Move, MoveEffect};
use super::piece::{Colour, Piece};
use super::setup::{validate_size, Setup};
use super::square::Square;
use super::zobrist::{hash_placement, PositionKey};
use crate::error::{ArenaError, Result};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// What `undo_move` needs to put the board back.
#[derive(Debug, Clone)]
struct UndoInfo {
    /// The mover as it stood before the move (so promotion is reverted too)
    mover: Piece,
    removed: SmallVec<[Piece; 4]>,
}

/// A square draughts board.
///
/// Pieces live in a row-major mailbox; a bit-set mirror of the same placement
/// backs hashing and equality. Two boards compare equal when they hold the
/// same pieces on the same squares, whatever their histories.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    grid: Vec<Option<Piece>>,
    /// Kept in sync with `grid`
    placement: Placement,
    history: Vec<Move>,
    undo_log: Vec<UndoInfo>,
}

impl Default for Board {
    /// Standard 8x8 start
    fn default() -> Self {
        let mut board = Board::blank(8);
        for piece in Setup::Standard.pieces(8) {
            board.put(piece);
        }
        board
    }
}

impl Board {
    pub fn new(size: usize, setup: &Setup) -> Result<Board> {
        validate_size(size)?;
        let mut board = Board::blank(size);

        for piece in setup.pieces(size) {
            if !piece.position.is_on_board(size) {
                return Err(ArenaError::InvalidSetup {
                    detail: format!("piece at {} is off a {size}x{size} board", piece.position),
                });
            }
            if board.piece_at(piece.position).is_some() {
                return Err(ArenaError::InvalidSetup {
                    detail: format!("two pieces placed on {}", piece.position),
                });
            }
            board.put(piece);
        }
        Ok(board)
    }

    fn blank(size: usize) -> Board {
        Board {
            size,
            grid: vec![None; size * size],
            placement: Placement::default(),
            history: Vec::new(),
            undo_log: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Piece on `sq`, or `None` if empty or off the board.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if !sq.is_on_board(self.size) {
            return None;
        }
        self.grid[sq.index(self.size)]
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        sq.is_on_board(self.size) && self.grid[sq.index(self.size)].is_none()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten()
    }

    pub fn pieces_of(&self, colour: Colour) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.is(colour))
    }

    pub fn count(&self, colour: Colour) -> usize {
        self.placement.of(colour).count() as usize
    }

    /// (men, kings) held by `colour`
    pub fn material(&self, colour: Colour) -> (usize, usize) {
        let mut men = 0;
        let mut kings = 0;
        for piece in self.pieces_of(colour) {
            if piece.is_king {
                kings += 1;
            } else {
                men += 1;
            }
        }
        (men, kings)
    }

    pub fn legal_moves(&self, colour: Colour) -> Vec<Move> {
        movegen::generate(self, colour)
    }

    pub fn has_legal_moves(&self, colour: Colour) -> bool {
        !self.legal_moves(colour).is_empty()
    }

    /// Applies a move the caller already knows to be legal.
    ///
    /// Only structural consistency is checked: the start square must hold a
    /// piece, the end must be free (a chain may finish where it began) and
    /// every captured square must hold an opposing piece. Nothing is mutated
    /// when a check fails.
    pub fn apply_move(&mut self, mv: &Move) -> Result<MoveEffect> {
        let mover = self.piece_at(mv.start).ok_or_else(|| ArenaError::InvariantViolation {
            detail: format!("no piece on start square {} for move {mv}", mv.start),
        })?;
        if !mv.end.is_on_board(self.size) || (mv.end != mv.start && !self.is_empty_at(mv.end)) {
            return Err(ArenaError::InvariantViolation {
                detail: format!("end square {} of move {mv} is not free", mv.end),
            });
        }
        for &sq in &mv.captured {
            match self.piece_at(sq) {
                Some(p) if p.colour != mover.colour => {}
                _ => {
                    return Err(ArenaError::InvariantViolation {
                        detail: format!("move {mv} captures {sq}, which holds no opposing piece"),
                    })
                }
            }
        }

        let mut removed = SmallVec::new();
        for &sq in &mv.captured {
            if let Some(p) = self.take(sq) {
                removed.push(p);
            }
        }
        self.take(mv.start);

        let mut moved = mover;
        moved.position = mv.end;
        let promoted = !moved.is_king && mv.end.row == moved.colour.promotion_row(self.size);
        if promoted {
            moved.is_king = true;
        }
        self.put(moved);

        let effect = MoveEffect { captured_count: removed.len(), promoted };
        self.history.push(mv.clone());
        self.undo_log.push(UndoInfo { mover, removed });
        Ok(effect)
    }

    /// Reverts the most recent move, returning it.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        let undo = self.undo_log.pop()?;

        self.take(mv.end);
        self.put(undo.mover);
        for piece in undo.removed {
            self.put(piece);
        }
        Some(mv)
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn position_key(&self, to_move: Colour) -> PositionKey {
        PositionKey { placement: self.placement, to_move }
    }

    pub fn zobrist(&self, to_move: Colour) -> u64 {
        hash_placement(&self.placement, to_move)
    }

    /// Copy of the pieces without the move history, for look-ahead.
    pub fn snapshot(&self) -> Board {
        Board {
            size: self.size,
            grid: self.grid.clone(),
            placement: self.placement,
            history: Vec::new(),
            undo_log: Vec::new(),
        }
    }

    /// Counts leaf move sequences `depth` plies deep with `colour` to move.
    /// Used to validate move generation.
    pub fn perft(&self, colour: Colour, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves(colour);

        // Bulk counting at the last ply
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        let mut board = self.snapshot();
        for mv in &moves {
            if board.apply_move(mv).is_ok() {
                nodes += board.perft(colour.opposite(), depth - 1);
                board.undo_move();
            }
        }
        nodes
    }

    fn take(&mut self, sq: Square) -> Option<Piece> {
        let idx = sq.index(self.size);
        let piece = self.grid[idx].take();
        if piece.is_some() {
            self.placement.remove(idx);
        }
        piece
    }

    fn put(&mut self, piece: Piece) {
        let idx = piece.position.index(self.size);
        self.grid[idx] = Some(piece);
        self.placement.add(&piece, self.size);
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.placement == other.placement
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.placement.hash(state);
    }
}

impl fmt::Display for Board {
    /// One line per row: `l`/`L` light man/king, `d`/`D` dark, `.` empty dark
    /// square, space for a light square.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.size {
                let sq = Square::new(row as u8, col as u8);
                let c = match self.piece_at(sq) {
                    Some(piece) => piece.to_char(),
                    None if sq.is_dark() => '.',
                    None => ' ',
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
