use super::*;

// ==================== RECORD FORMAT TESTS ====================

const SAMPLE: &str = "22-17 11-15 24-20 15-19 23x16 12x19 27-24 9-13 24x15 13x22";

fn sample_moves() -> Vec<Move> {
    vec![
        Move::simple(sq(5, 2), sq(4, 1)),
        Move::simple(sq(2, 5), sq(3, 4)),
        Move::simple(sq(5, 6), sq(4, 7)),
        Move::simple(sq(3, 4), sq(4, 5)),
        Move::capture(sq(5, 4), sq(3, 6), &[sq(4, 5)]),
        Move::capture(sq(2, 7), sq(4, 5), &[sq(3, 6)]),
        Move::simple(sq(6, 5), sq(5, 6)),
        Move::simple(sq(2, 1), sq(3, 0)),
        Move::capture(sq(5, 6), sq(3, 4), &[sq(4, 5)]),
        Move::capture(sq(3, 0), sq(5, 2), &[sq(4, 1)]),
    ]
}

#[test]
fn test_import_sample_game() {
    let mut board = Board::default();
    let next = pdn::import(&mut board, Colour::Light, SAMPLE).unwrap();

    assert_eq!(next, Colour::Light);
    assert_eq!(board.history(), sample_moves().as_slice());
}

#[test]
fn test_export_sample_game() {
    let record = pdn::export(&Board::default(), Colour::Light, &sample_moves()).unwrap();
    assert_eq!(record, SAMPLE);
}

#[test]
fn test_import_then_export_is_stable() {
    let mut board = Board::default();
    pdn::import(&mut board, Colour::Light, SAMPLE).unwrap();
    let record = pdn::export(&Board::default(), Colour::Light, board.history()).unwrap();
    assert_eq!(record, SAMPLE);
}

#[test]
fn test_tags_numbers_and_results_are_ignored() {
    let record = "[Event \"club night\"]\n[Black \"someone\"]\n1. 22-17 11-15 {quiet} 2. 24-20 15-19 1-0\n";
    assert_eq!(pdn::tokens(record), vec!["22-17", "11-15", "24-20", "15-19"]);
}

#[test]
fn test_ambiguous_capture_exports_full_path() {
    // Two routes from 6 land on 22
    let start = board_with(&[dark(1, 2), light(2, 1), light(4, 1), light(2, 3), light(4, 3)]);
    let moves = start.legal_moves(Colour::Dark);
    assert_eq!(moves.len(), 2);
    assert!(moves.iter().all(|m| m.end == sq(5, 2)));

    let record = pdn::export(&start, Colour::Dark, &moves[..1]).unwrap();
    assert_eq!(record.matches('x').count(), 2, "expected a full path, got {record}");

    let mut replay = start.clone();
    pdn::import(&mut replay, Colour::Dark, &record).unwrap();
    assert_eq!(replay.history(), &moves[..1]);

    // The short form names two moves and is refused
    let mut replay = start.clone();
    let err = pdn::import(&mut replay, Colour::Dark, "6x22").unwrap_err();
    assert!(matches!(err, crate::ArenaError::MalformedRecord { .. }));
}

#[test]
fn test_illegal_token_is_fatal() {
    let mut board = Board::default();
    let err = pdn::import(&mut board, Colour::Light, "22-15").unwrap_err();
    assert!(matches!(err, crate::ArenaError::MalformedRecord { .. }));

    let mut board = Board::default();
    assert!(pdn::import(&mut board, Colour::Light, "22-17 banana").is_err());
    assert_eq!(board.history().len(), 1);

    let mut board = Board::default();
    assert!(pdn::import(&mut board, Colour::Light, "22-99").is_err());
}
