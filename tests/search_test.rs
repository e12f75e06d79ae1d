//! Alpha-beta search behaviour through the public API

use checkers_arena::agent::ai::{
    iterative_deepening_search, HunterEvaluator, MaterialEvaluator, SearchLimits, WON,
};
use checkers_arena::agent::{BotKind, MoveChoice, Turn};
use checkers_arena::game_repr::{Board, Colour, Piece, Setup, Square};
use std::time::Duration;

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

#[test]
fn test_principal_variation_is_playable() {
    let board = Board::default();
    let result = iterative_deepening_search(
        &board,
        Colour::Light,
        &SearchLimits::fixed(5),
        &MaterialEvaluator::new(2, 5),
    );

    assert!(!result.principal_variation.is_empty());
    let mut replay = board.snapshot();
    let mut colour = Colour::Light;
    for mv in &result.principal_variation {
        assert!(replay.legal_moves(colour).contains(mv), "{mv} is not legal for {colour}");
        replay.apply_move(mv).unwrap();
        colour = colour.opposite();
    }
}

#[test]
fn test_search_is_deterministic() {
    let board = Board::default();
    let limits = SearchLimits::fixed(4);
    let first = iterative_deepening_search(&board, Colour::Dark, &limits, &HunterEvaluator);
    let second = iterative_deepening_search(&board, Colour::Dark, &limits, &HunterEvaluator);
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes_searched, second.nodes_searched);
}

#[test]
fn test_time_budget_is_respected() {
    let board = Board::default();
    let limits = SearchLimits::fixed(40).with_time_limit(Duration::from_millis(100));
    let result = iterative_deepening_search(&board, Colour::Light, &limits, &HunterEvaluator);

    assert!(!result.completed);
    assert!(result.elapsed < Duration::from_secs(2), "took {:?}", result.elapsed);
    let best = result.best_move.expect("a fallback move is always returned");
    assert!(board.legal_moves(Colour::Light).contains(&best));
}

#[test]
fn test_lone_king_is_hunted_down() {
    // Light king next to a cornered dark man; any sensible line wins quickly
    let board = Board::new(
        8,
        &Setup::Pieces(vec![
            Piece::king(sq(2, 5), Colour::Light),
            Piece::king(sq(4, 5), Colour::Light),
            Piece::man(sq(0, 7), Colour::Dark),
        ]),
    )
    .unwrap();
    let result =
        iterative_deepening_search(&board, Colour::Light, &SearchLimits::fixed(6), &HunterEvaluator);
    assert!(result.score >= WON, "expected a forced win, got {}", result.score);
}

#[test]
fn test_search_bots_answer_from_the_list() {
    let board = Board::default();
    let legal = board.legal_moves(Colour::Light);
    let turn = Turn {
        board: &board,
        colour: Colour::Light,
        legal_moves: &legal,
        history: board.history(),
        last_action_ply: 0,
        ply: 0,
    };
    for kind in [BotKind::MaterialSearch, BotKind::Hunter] {
        let mut bot = kind.create_player(kind.name(), 0);
        match bot.choose_move(&turn) {
            MoveChoice::Index(idx) => assert!(idx < legal.len()),
            MoveChoice::Move(mv) => assert!(legal.contains(&mv)),
        }
    }
}
