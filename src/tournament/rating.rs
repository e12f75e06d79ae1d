//! Elo ratings and win/draw/loss bookkeeping.
//!
//! Ratings move once per round: every game's expected score is taken from
//! the ratings at the start of the round, and the summed difference between
//! scores and expectations is applied in one step with a K-factor of
//! `800 / (games before + games this round)`.

use crate::agent::{unique_bot_name, BotKind, Outcome};
use crate::game_repr::Colour;
use std::collections::BTreeMap;

pub const STARTING_ELO: f64 = 1500.0;
/// Each `SCALE` points of rating difference is a tenfold expected-score ratio
pub const SCALE: f64 = 400.0;
/// Bound on the performance-rating offset from the opponent's rating
pub const MAX_PERFORMANCE_OFFSET: f64 = 800.0;

/// Wins, draws and losses split by colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameResultStat {
    pub light_wins: u32,
    pub light_draws: u32,
    pub light_losses: u32,
    pub dark_wins: u32,
    pub dark_draws: u32,
    pub dark_losses: u32,
}

impl GameResultStat {
    /// Counts one game played as `colour` with the given score (1, 0.5, 0).
    pub fn record(&mut self, colour: Colour, score: f64) {
        let (wins, draws, losses) = match colour {
            Colour::Light => (&mut self.light_wins, &mut self.light_draws, &mut self.light_losses),
            Colour::Dark => (&mut self.dark_wins, &mut self.dark_draws, &mut self.dark_losses),
        };
        if score > 0.5 {
            *wins += 1;
        } else if score < 0.5 {
            *losses += 1;
        } else {
            *draws += 1;
        }
    }

    /// (wins, draws, losses) as `colour`, or overall when `None`.
    pub fn counts(&self, colour: Option<Colour>) -> (u32, u32, u32) {
        match colour {
            Some(Colour::Light) => (self.light_wins, self.light_draws, self.light_losses),
            Some(Colour::Dark) => (self.dark_wins, self.dark_draws, self.dark_losses),
            None => (self.total_wins(), self.total_draws(), self.total_losses()),
        }
    }

    pub fn total_wins(&self) -> u32 {
        self.light_wins + self.dark_wins
    }

    pub fn total_draws(&self) -> u32 {
        self.light_draws + self.dark_draws
    }

    pub fn total_losses(&self) -> u32 {
        self.light_losses + self.dark_losses
    }

    pub fn total_games(&self) -> u32 {
        self.total_wins() + self.total_draws() + self.total_losses()
    }
}

/// One tournament participant: its identity, rating and results.
#[derive(Debug, Clone)]
pub struct BotTracker {
    pub id: i64,
    pub kind: BotKind,
    pub rating: f64,
    pub stats: GameResultStat,
    /// Results against each opponent, keyed by unique name
    pub h2h_stats: BTreeMap<String, GameResultStat>,
    pub games_played: usize,
    round_evs: Vec<f64>,
    round_scores: Vec<f64>,
}

impl BotTracker {
    pub fn new(id: i64, kind: BotKind) -> Self {
        Self {
            id,
            kind,
            rating: STARTING_ELO,
            stats: GameResultStat::default(),
            h2h_stats: BTreeMap::new(),
            games_played: 0,
            round_evs: Vec::new(),
            round_scores: Vec::new(),
        }
    }

    /// `[id] Name`, distinct even when one bot kind enters twice.
    pub fn unique_name(&self) -> String {
        unique_bot_name(self.id, self.kind)
    }

    /// Expected score against `other`: `Qa / (Qa + Qb)` with `Q = 10^(R / 400)`.
    pub fn calculate_ev(&self, other: &BotTracker) -> f64 {
        expected_score(self.rating, other.rating)
    }

    pub fn register_ev(&mut self, ev: f64) {
        self.round_evs.push(ev);
    }

    /// Counts a finished game played as `colour` against `opponent`.
    pub fn register_game_result(&mut self, colour: Colour, outcome: Outcome, opponent: &str) {
        let score = outcome.score_for(colour);
        self.round_scores.push(score);
        self.stats.record(colour, score);
        self.h2h_stats.entry(opponent.to_string()).or_default().record(colour, score);
    }

    /// Games registered since the last rating update.
    pub fn pending_games(&self) -> usize {
        self.round_scores.len()
    }

    /// Applies the round's results to the rating and starts a new round.
    pub fn update_rating(&mut self) {
        debug_assert_eq!(self.round_evs.len(), self.round_scores.len());
        let round_games = self.round_scores.len();
        if round_games == 0 {
            return;
        }
        let total_ev: f64 = self.round_evs.iter().sum();
        let total_score: f64 = self.round_scores.iter().sum();

        let k_factor = 800.0 / (self.games_played + round_games) as f64;
        self.rating += k_factor * (total_score - total_ev);

        self.games_played += round_games;
        self.round_evs.clear();
        self.round_scores.clear();
    }
}

/// Expected score of a player rated `rating` against `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    let qa = 10f64.powf(rating / SCALE);
    let qb = 10f64.powf(opponent / SCALE);
    qa / (qa + qb)
}

/// Performance rating against a single opponent and its difference from
/// the bot's own rating: `R_opp - 400 * log10(1/p - 1)`, the offset
/// clamped to ±800. A perfect or zero score gets the clamp. `None` when no
/// games were played.
pub fn performance_rating(w: u32, d: u32, l: u32, bot_rating: f64, opp_rating: f64) -> Option<(f64, f64)> {
    let total = w + d + l;
    if total == 0 {
        return None;
    }
    let p = (w as f64 + 0.5 * d as f64) / total as f64;
    let offset = if p <= 0.0 {
        -MAX_PERFORMANCE_OFFSET
    } else if p >= 1.0 {
        MAX_PERFORMANCE_OFFSET
    } else {
        (-SCALE * (1.0 / p - 1.0).log10()).clamp(-MAX_PERFORMANCE_OFFSET, MAX_PERFORMANCE_OFFSET)
    };
    let perf = opp_rating + offset;
    Some((perf, perf - bot_rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::DrawReason;

    #[test]
    fn test_expected_score() {
        assert!((expected_score(1500.0, 1500.0) - 0.5).abs() < 1e-12);
        let strong = expected_score(1900.0, 1500.0);
        assert!((strong - 10.0 / 11.0).abs() < 1e-12);
        assert!((strong + expected_score(1500.0, 1900.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_batch_update() {
        let mut a = BotTracker::new(0, BotKind::Hunter);
        let b = BotTracker::new(1, BotKind::RandomBot);

        // Two wins against an equal opponent in one round
        for colour in [Colour::Light, Colour::Dark] {
            a.register_ev(a.calculate_ev(&b));
            a.register_game_result(colour, Outcome::Won(colour), &b.unique_name());
        }
        a.update_rating();

        // K = 800 / 2, gain = K * (2 - 1)
        assert!((a.rating - 1900.0).abs() < 1e-9);
        assert_eq!(a.games_played, 2);
        assert_eq!(a.pending_games(), 0);
        assert_eq!(a.stats.total_wins(), 2);
        assert_eq!(a.h2h_stats["[1] RandomBot"].light_wins, 1);
        assert_eq!(a.h2h_stats["[1] RandomBot"].dark_wins, 1);
    }

    #[test]
    fn test_draws_and_losses_are_split_by_colour() {
        let mut a = BotTracker::new(0, BotKind::GreedyCat);
        a.register_game_result(Colour::Dark, Outcome::Draw(DrawReason::Repetition), "x");
        a.register_game_result(Colour::Light, Outcome::Won(Colour::Dark), "x");
        assert_eq!(a.stats.counts(Some(Colour::Dark)), (0, 1, 0));
        assert_eq!(a.stats.counts(Some(Colour::Light)), (0, 0, 1));
        assert_eq!(a.stats.counts(None), (0, 1, 1));
        assert_eq!(a.stats.total_games(), 2);
    }

    #[test]
    fn test_update_without_games_keeps_rating() {
        let mut a = BotTracker::new(0, BotKind::CopyCat);
        a.update_rating();
        assert_eq!(a.rating, STARTING_ELO);
    }

    #[test]
    fn test_performance_rating() {
        assert_eq!(performance_rating(0, 0, 0, 1500.0, 1500.0), None);

        let (perf, diff) = performance_rating(1, 0, 1, 1500.0, 1600.0).unwrap();
        assert!((perf - 1600.0).abs() < 1e-9);
        assert!((diff - 100.0).abs() < 1e-9);

        assert_eq!(performance_rating(3, 0, 0, 1500.0, 1500.0), Some((2300.0, 800.0)));
        assert_eq!(performance_rating(0, 0, 3, 1500.0, 1500.0), Some((700.0, -800.0)));

        // 3 of 4: 400 * log10(3)
        let (perf, _) = performance_rating(3, 0, 1, 1500.0, 1500.0).unwrap();
        assert!((perf - (1500.0 + 400.0 * 3f64.log10())).abs() < 1e-9);
    }
}
