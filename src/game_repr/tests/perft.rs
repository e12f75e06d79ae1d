use super::*;

// ==================== PERFT TESTS ====================

#[test]
fn test_perft_start_position() {
    let board = Board::default();
    assert_eq!(board.perft(Colour::Light, 1), 7);
    assert_eq!(board.perft(Colour::Light, 2), 49);
    assert_eq!(board.perft(Colour::Light, 3), 302);
}

#[test]
fn test_perft_depth_zero_is_one() {
    assert_eq!(Board::default().perft(Colour::Dark, 0), 1);
}

#[test]
fn test_perft_leaves_board_untouched() {
    let board = Board::default();
    let before = board.clone();
    board.perft(Colour::Light, 4);
    assert_eq!(board, before);
}
