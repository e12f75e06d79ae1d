//! Tournament configuration.

use crate::agent::BotKind;
use crate::error::{ArenaError, Result};
use crate::game_repr::{validate_size, Setup};
use std::path::PathBuf;

/// Who plays whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every pair of listed bots meets with both colours each round
    All,
    /// `hero` meets every listed bot with both colours each round
    One { hero: BotKind },
}

/// Initial piece layout for every game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartLayout {
    #[default]
    Standard,
    LastRow,
}

impl StartLayout {
    pub fn setup(&self) -> Setup {
        match self {
            StartLayout::Standard => Setup::Standard,
            StartLayout::LastRow => Setup::LastRow,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub mode: Mode,
    pub bots: Vec<BotKind>,
    pub board_size: usize,
    pub start: StartLayout,
    pub rounds: usize,
    /// Base seed; each game derives its own from it
    pub seed: u64,
    /// Worker threads for running games
    pub threads: usize,
    pub export_pdn: bool,
    pub record_moves: bool,
    pub output_dir: PathBuf,
    /// Record replayed onto every game's start position
    pub start_record: Option<String>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            mode: Mode::All,
            bots: Vec::new(),
            board_size: 8,
            start: StartLayout::Standard,
            rounds: 1,
            seed: 0,
            threads: num_cpus::get(),
            export_pdn: false,
            record_moves: false,
            output_dir: PathBuf::from("."),
            start_record: None,
        }
    }
}

impl TournamentConfig {
    pub fn new(mode: Mode, bots: Vec<BotKind>) -> Self {
        Self { mode, bots, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |detail: &str| Err(ArenaError::InvalidConfig { detail: detail.to_string() });

        if self.bots.is_empty() {
            return invalid("at least one bot is required");
        }
        if self.mode == Mode::All && self.bots.len() < 2 {
            return invalid("mode `all` needs at least two bots");
        }
        if self.rounds == 0 {
            return invalid("rounds must be at least 1");
        }
        if self.threads == 0 {
            return invalid("threads must be at least 1");
        }
        validate_size(self.board_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_needs_bots() {
        let config = TournamentConfig::default();
        assert!(matches!(config.validate(), Err(ArenaError::InvalidConfig { .. })));
    }

    #[test]
    fn test_valid_config() {
        let config = TournamentConfig::new(Mode::All, vec![BotKind::RandomBot, BotKind::FirstMover]);
        assert!(config.validate().is_ok());
        assert!(config.threads >= 1);
    }

    #[test]
    fn test_rejections() {
        let base = TournamentConfig::new(Mode::All, vec![BotKind::RandomBot, BotKind::GreedyCat]);

        let zero_rounds = TournamentConfig { rounds: 0, ..base.clone() };
        assert!(matches!(zero_rounds.validate(), Err(ArenaError::InvalidConfig { .. })));

        let odd = TournamentConfig { board_size: 7, ..base.clone() };
        assert!(matches!(odd.validate(), Err(ArenaError::InvalidSetup { .. })));

        let lonely = TournamentConfig::new(Mode::All, vec![BotKind::Hunter]);
        assert!(lonely.validate().is_err());

        let one = TournamentConfig::new(Mode::One { hero: BotKind::Hunter }, vec![BotKind::RandomBot]);
        assert!(one.validate().is_ok());
    }
}
