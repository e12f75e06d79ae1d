//! End-to-end tournament runs writing into temporary folders

use checkers_arena::agent::{BotKind, Outcome};
use checkers_arena::config::{Mode, StartLayout, TournamentConfig};
use checkers_arena::tournament::{report, Tournament};
use std::fs;
use std::path::PathBuf;

fn temp_output(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("checkers_arena_{tag}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn config(mode: Mode, bots: Vec<BotKind>, tag: &str) -> TournamentConfig {
    let mut config = TournamentConfig::new(mode, bots);
    config.threads = 2;
    config.output_dir = temp_output(tag);
    config
}

#[test]
fn test_round_robin_writes_reports() {
    let mut config = config(
        Mode::All,
        vec![BotKind::RandomBot, BotKind::FirstMover, BotKind::GreedyCat],
        "all",
    );
    config.rounds = 2;
    config.record_moves = true;
    config.export_pdn = true;
    let output_dir = config.output_dir.clone();

    let report = Tournament::new(config).unwrap().run().unwrap();

    assert_eq!(report.results.len() + report.voided.len(), 12);
    assert!(report.voided.is_empty());
    assert!(report.folder.starts_with(&output_dir));

    let summary = fs::read_to_string(report.folder.join(report::SUMMARY_FILE)).unwrap();
    assert_eq!(summary.matches("Game ID: ").count(), 12);

    for result in &report.results {
        assert!(report.folder.join(format!("game_{}.txt", result.game_id)).exists());
        assert!(report.folder.join(format!("game_{}.pdn", result.game_id)).exists());
    }

    let stats = fs::read_to_string(report.folder.join(report::STATS_FILE)).unwrap();
    for name in ["[0] RandomBot", "[1] FirstMover", "[2] GreedyCat"] {
        assert!(stats.contains(&format!("Bot Name: {name} (")), "missing {name}");
    }

    // Everyone played the same number of games, so rating points are conserved
    let total: f64 = report.trackers.iter().map(|t| t.rating).sum();
    assert!((total - 4500.0).abs() < 1e-6, "total rating {total}");
    for tracker in &report.trackers {
        assert_eq!(tracker.games_played, 8);
        assert_eq!(tracker.stats.total_games(), 8);
    }

    fs::remove_dir_all(&output_dir).unwrap();
}

#[test]
fn test_one_mode_pits_hero_against_each_bot() {
    let config = config(
        Mode::One { hero: BotKind::GreedyCat },
        vec![BotKind::RandomBot, BotKind::RandomBot],
        "one",
    );
    let output_dir = config.output_dir.clone();

    let report = Tournament::new(config).unwrap().run().unwrap();
    assert_eq!(report.results.len(), 4);

    let hero = &report.trackers[0];
    assert_eq!(hero.unique_name(), "[-1] GreedyCat");
    assert_eq!(hero.stats.total_games(), 4);
    assert_eq!(hero.h2h_stats["[0] RandomBot"].total_games(), 2);
    assert_eq!(hero.h2h_stats["[1] RandomBot"].total_games(), 2);
    // The two RandomBots never meet
    assert!(!report.trackers[1].h2h_stats.contains_key("[1] RandomBot"));

    fs::remove_dir_all(&output_dir).unwrap();
}

#[test]
fn test_same_seed_same_results() {
    let outcomes = |tag: &str| {
        let mut config = config(Mode::All, vec![BotKind::RandomBot, BotKind::CopyCat], tag);
        config.seed = 99;
        let output_dir = config.output_dir.clone();
        let report = Tournament::new(config).unwrap().run().unwrap();
        fs::remove_dir_all(&output_dir).unwrap();
        report
            .results
            .iter()
            .map(|r| (r.game_id, r.outcome, r.plies))
            .collect::<Vec<(usize, Outcome, usize)>>()
    };
    assert_eq!(outcomes("seed_a"), outcomes("seed_b"));
}

#[test]
fn test_start_record_and_layout() {
    let mut config = config(Mode::All, vec![BotKind::FirstMover, BotKind::RandomBot], "record");
    config.start_record = Some("22-17 11-15".to_string());
    let output_dir = config.output_dir.clone();

    let report = Tournament::new(config).unwrap().run().unwrap();
    for result in &report.results {
        let record = result.record.as_deref().unwrap();
        assert!(record.starts_with("22-17 11-15"), "{record}");
    }
    fs::remove_dir_all(&output_dir).unwrap();

    let mut config = config_with_layout();
    config.output_dir = temp_output("last_row");
    let output_dir = config.output_dir.clone();
    let report = Tournament::new(config).unwrap().run().unwrap();
    assert_eq!(report.results.len(), 2);
    fs::remove_dir_all(&output_dir).unwrap();
}

fn config_with_layout() -> TournamentConfig {
    let mut config = TournamentConfig::new(Mode::All, vec![BotKind::ScaredyCat, BotKind::Flexibility]);
    config.threads = 1;
    config.board_size = 10;
    config.start = StartLayout::LastRow;
    config
}

#[test]
fn test_bad_start_record_is_rejected() {
    let mut config = config(Mode::All, vec![BotKind::FirstMover, BotKind::RandomBot], "bad");
    config.start_record = Some("22-15".to_string());
    assert!(Tournament::new(config).is_err());
}
