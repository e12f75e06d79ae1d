//! Round-robin tournaments between bots.
//!
//! A [`Tournament`] schedules every pairing with both colours each round,
//! runs the round's games in parallel on its own rayon pool and folds the
//! results into the [`BotTracker`]s once the round is complete. Each game
//! owns its board and freshly built bots, so a failure stays inside that
//! game:
//! - an illegal move forfeits the game for the side that played it
//! - a broken board invariant voids the game; it is reported and not rated

pub mod rating;
pub mod report;

pub use rating::{performance_rating, BotTracker, GameResultStat};
pub use report::ResultsFolder;

use crate::config::{Mode, TournamentConfig};
use crate::error::{ArenaError, Result};
use crate::game_repr::{pdn, Board, Colour};
use crate::orchestrator::{Game, GamePhase, GameResult};
use log::{info, warn};
use rayon::prelude::*;
use std::path::PathBuf;

/// One scheduled game; players are indices into the tracker list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub game_id: usize,
    pub round: usize,
    pub light: usize,
    pub dark: usize,
}

/// What became of a scheduled game.
#[derive(Debug)]
pub enum GameOutcome {
    Finished(GameResult),
    Voided { pairing: Pairing, error: ArenaError },
}

/// Everything a finished tournament produced.
#[derive(Debug)]
pub struct TournamentReport {
    pub folder: PathBuf,
    pub results: Vec<GameResult>,
    pub voided: Vec<(Pairing, ArenaError)>,
    pub trackers: Vec<BotTracker>,
}

impl TournamentReport {
    /// Trackers by descending rating.
    pub fn standings(&self) -> Vec<&BotTracker> {
        let mut sorted: Vec<_> = self.trackers.iter().collect();
        sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        sorted
    }
}

pub struct Tournament {
    config: TournamentConfig,
    trackers: Vec<BotTracker>,
    /// Games of each round
    schedule: Vec<Vec<Pairing>>,
    start_board: Board,
    start_colour: Colour,
    pool: rayon::ThreadPool,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Result<Self> {
        config.validate()?;

        let mut trackers = Vec::new();
        if let Mode::One { hero } = config.mode {
            trackers.push(BotTracker::new(-1, hero));
        }
        for (idx, kind) in config.bots.iter().enumerate() {
            trackers.push(BotTracker::new(idx as i64, *kind));
        }

        let mut start_board = Board::new(config.board_size, &config.start.setup())?;
        let start_colour = match &config.start_record {
            Some(record) => pdn::import(&mut start_board, Colour::Light, record)?,
            None => Colour::Light,
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| ArenaError::InvalidConfig { detail: format!("thread pool: {e}") })?;

        let schedule = build_schedule(config.mode, trackers.len(), config.rounds);
        let per_round = schedule.first().map_or(0, Vec::len);
        info!(
            "{per_round} games/round * {} rounds = {} games scheduled",
            config.rounds,
            per_round * config.rounds
        );

        Ok(Self { config, trackers, schedule, start_board, start_colour, pool })
    }

    pub fn trackers(&self) -> &[BotTracker] {
        &self.trackers
    }

    pub fn schedule(&self) -> &[Vec<Pairing>] {
        &self.schedule
    }

    /// Plays every round, writing reports as it goes.
    pub fn run(mut self) -> Result<TournamentReport> {
        let folder = ResultsFolder::create(&self.config.output_dir, chrono::Local::now())?;
        let mut results = Vec::new();
        let mut voided = Vec::new();

        for round in 0..self.schedule.len() {
            let outcomes = self.play_round(round);

            let mut finished = Vec::new();
            for outcome in outcomes {
                match outcome {
                    GameOutcome::Finished(result) => finished.push(result),
                    GameOutcome::Voided { pairing, error } => {
                        warn!("game {} voided: {error}", pairing.game_id);
                        voided.push((pairing, error));
                    }
                }
            }

            folder.write_game_results(&finished, self.config.export_pdn)?;
            self.rate_round(round, &finished);
            info!("round {round} completed");
            results.extend(finished);
        }

        info!("tournament completed, writing stats");
        folder.write_stats(&self.trackers)?;

        Ok(TournamentReport {
            folder: folder.path().to_path_buf(),
            results,
            voided,
            trackers: self.trackers,
        })
    }

    fn play_round(&self, round: usize) -> Vec<GameOutcome> {
        let pairings = &self.schedule[round];
        self.pool.install(|| pairings.par_iter().map(|pairing| self.play_game(*pairing)).collect())
    }

    fn play_game(&self, pairing: Pairing) -> GameOutcome {
        let seed = game_seed(self.config.seed, pairing.game_id);
        let light = &self.trackers[pairing.light];
        let dark = &self.trackers[pairing.dark];

        let mut game = Game::starting_with(
            self.start_board.clone(),
            light.kind.create_player(light.unique_name(), seed),
            dark.kind.create_player(dark.unique_name(), seed ^ 1),
            self.start_colour,
        )
        .with_id(pairing.game_id, pairing.round)
        .recording_moves(self.config.record_moves);

        loop {
            match game.step() {
                Ok(GamePhase::Terminal(_)) => break,
                Ok(_) => {}
                Err(error) => match error.forfeiting_colour() {
                    Some(colour) => {
                        warn!("game {}: {error}", pairing.game_id);
                        game.forfeit(colour);
                        break;
                    }
                    None => return GameOutcome::Voided { pairing, error },
                },
            }
        }
        GameOutcome::Finished(game.into_result())
    }

    /// Batch Elo update with expectations taken from the ratings the round
    /// started with.
    fn rate_round(&mut self, round: usize, finished: &[GameResult]) {
        for result in finished {
            let Some(pairing) = self.schedule[round].iter().find(|p| p.game_id == result.game_id).copied()
            else {
                continue;
            };
            let ev_light = self.trackers[pairing.light].calculate_ev(&self.trackers[pairing.dark]);
            let light_name = self.trackers[pairing.light].unique_name();
            let dark_name = self.trackers[pairing.dark].unique_name();

            let light = &mut self.trackers[pairing.light];
            light.register_ev(ev_light);
            light.register_game_result(Colour::Light, result.outcome, &dark_name);

            let dark = &mut self.trackers[pairing.dark];
            dark.register_ev(1.0 - ev_light);
            dark.register_game_result(Colour::Dark, result.outcome, &light_name);
        }

        for tracker in &mut self.trackers {
            if tracker.pending_games() > 0 {
                tracker.update_rating();
                info!("{} rated {:.0}", tracker.unique_name(), tracker.rating);
            }
        }
    }
}

/// Pairings for every round. Game ids start at 1.
///
/// `All`: each pair `i < j` meets twice, `i` with Light first. `One`: the
/// hero (index 0) meets every other participant twice, hero Light first.
pub fn build_schedule(mode: Mode, participants: usize, rounds: usize) -> Vec<Vec<Pairing>> {
    let pairs: Vec<(usize, usize)> = match mode {
        Mode::All => (0..participants)
            .flat_map(|i| (i + 1..participants).map(move |j| (i, j)))
            .collect(),
        Mode::One { .. } => (1..participants).map(|j| (0, j)).collect(),
    };

    let mut next_id = 0;
    (0..rounds)
        .map(|round| {
            let mut games = Vec::with_capacity(pairs.len() * 2);
            for &(a, b) in &pairs {
                for (light, dark) in [(a, b), (b, a)] {
                    next_id += 1;
                    games.push(Pairing { game_id: next_id, round, light, dark });
                }
            }
            games
        })
        .collect()
}

/// Per-game seed, spread so neighbouring ids do not share RNG streams.
fn game_seed(base: u64, game_id: usize) -> u64 {
    base.wrapping_add((game_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::BotKind;

    #[test]
    fn test_all_schedule() {
        let schedule = build_schedule(Mode::All, 3, 2);
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].len(), 6);
        assert_eq!(schedule[1][0].game_id, 7);
        assert_eq!(schedule[1][0].round, 1);

        // Every ordered pair once per round
        let mut seen: Vec<_> = schedule[0].iter().map(|p| (p.light, p.dark)).collect();
        seen.sort();
        assert_eq!(seen, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_one_schedule() {
        let schedule = build_schedule(Mode::One { hero: BotKind::Hunter }, 3, 1);
        let pairs: Vec<_> = schedule[0].iter().map(|p| (p.light, p.dark)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0), (0, 2), (2, 0)]);
    }

    #[test]
    fn test_one_mode_trackers() {
        let mut config = TournamentConfig::new(
            Mode::One { hero: BotKind::Hunter },
            vec![BotKind::RandomBot, BotKind::RandomBot],
        );
        config.threads = 1;
        let tournament = Tournament::new(config).unwrap();
        let names: Vec<_> = tournament.trackers().iter().map(BotTracker::unique_name).collect();
        assert_eq!(names, vec!["[-1] Hunter", "[0] RandomBot", "[1] RandomBot"]);
        assert_eq!(tournament.schedule()[0].len(), 4);
    }

    #[test]
    fn test_game_seeds_differ() {
        assert_ne!(game_seed(0, 1), game_seed(0, 2));
        assert_eq!(game_seed(5, 3), game_seed(5, 3));
    }
}
