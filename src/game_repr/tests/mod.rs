use super::*;

// ==================== HELPER FUNCTIONS ====================

pub fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

pub fn light(row: u8, col: u8) -> Piece {
    Piece::man(sq(row, col), Colour::Light)
}

pub fn dark(row: u8, col: u8) -> Piece {
    Piece::man(sq(row, col), Colour::Dark)
}

pub fn light_king(row: u8, col: u8) -> Piece {
    Piece::king(sq(row, col), Colour::Light)
}

pub fn dark_king(row: u8, col: u8) -> Piece {
    Piece::king(sq(row, col), Colour::Dark)
}

/// 8x8 board holding exactly `pieces`
pub fn board_with(pieces: &[Piece]) -> Board {
    Board::new(8, &Setup::Pieces(pieces.to_vec())).expect("test set-up should be valid")
}

/// Helper function to check if a move exists in the move list
pub fn has_move(moves: &[Move], from: Square, to: Square) -> bool {
    moves.iter().any(|m| m.start == from && m.end == to)
}

// ==================== TEST MODULES ====================

mod perft;
mod records;
