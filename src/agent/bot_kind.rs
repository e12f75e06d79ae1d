//! Registry of every bot the arena can field.

use super::ai::{DepthPolicy, HunterEvaluator, MaterialEvaluator, MinimaxPlayer};
use super::lookahead_bots::{Flexibility, GreedyCat, ScaredyCat};
use super::player::Player;
use super::simple_bots::{CopyCat, FirstMover, RandomBot};
use crate::error::ArenaError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Per-move thinking budget of the Hunter bot
pub const HUNTER_TIME_LIMIT: Duration = Duration::from_secs(2);

/// The closed set of bot strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotKind {
    RandomBot,
    FirstMover,
    CopyCat,
    ScaredyCat,
    Flexibility,
    GreedyCat,
    MaterialSearch,
    Hunter,
}

impl BotKind {
    pub fn all() -> &'static [BotKind] {
        &[
            BotKind::RandomBot,
            BotKind::FirstMover,
            BotKind::CopyCat,
            BotKind::ScaredyCat,
            BotKind::Flexibility,
            BotKind::GreedyCat,
            BotKind::MaterialSearch,
            BotKind::Hunter,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            BotKind::RandomBot => "RandomBot",
            BotKind::FirstMover => "FirstMover",
            BotKind::CopyCat => "CopyCat",
            BotKind::ScaredyCat => "ScaredyCat",
            BotKind::Flexibility => "Flexibility",
            BotKind::GreedyCat => "GreedyCat",
            BotKind::MaterialSearch => "MaterialSearch",
            BotKind::Hunter => "Hunter",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BotKind::RandomBot => "uniformly random legal move",
            BotKind::FirstMover => "always the first generated move",
            BotKind::CopyCat => "mirrors the opponent's last move when legal",
            BotKind::ScaredyCat => "leaves the opponent as many replies as possible",
            BotKind::Flexibility => "keeps its own mobility high against the worst reply",
            BotKind::GreedyCat => "two-ply material minimax",
            BotKind::MaterialSearch => "alpha-beta to depth 3 on material",
            BotKind::Hunter => "adaptive-depth alpha-beta with endgame hunting",
        }
    }

    /// Case-insensitive lookup, also accepting older bot names.
    pub fn from_name(name: &str) -> Option<BotKind> {
        let wanted = name.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "random" => Some(BotKind::RandomBot),
            "first" => Some(BotKind::FirstMover),
            "material3plybot" | "material3ply" => Some(BotKind::MaterialSearch),
            "flexibility3plybot" | "flexibility3ply" => Some(BotKind::Flexibility),
            _ => None,
        };
        alias.or_else(|| {
            Self::all()
                .iter()
                .copied()
                .find(|kind| kind.name().to_ascii_lowercase() == wanted)
        })
    }

    /// Builds a fresh player. `seed` feeds the bots that use randomness.
    pub fn create_player(&self, display_name: impl Into<String>, seed: u64) -> Box<dyn Player> {
        let name = display_name.into();
        match self {
            BotKind::RandomBot => Box::new(RandomBot::new(name, seed)),
            BotKind::FirstMover => Box::new(FirstMover::new(name)),
            BotKind::CopyCat => Box::new(CopyCat::new(name, seed)),
            BotKind::ScaredyCat => Box::new(ScaredyCat::new(name)),
            BotKind::Flexibility => Box::new(Flexibility::new(name)),
            BotKind::GreedyCat => Box::new(GreedyCat::new(name)),
            BotKind::MaterialSearch => Box::new(MinimaxPlayer::new(
                name,
                Box::new(MaterialEvaluator::new(2, 5)),
                DepthPolicy::Fixed(3),
            )),
            BotKind::Hunter => Box::new(
                MinimaxPlayer::new(name, Box::new(HunterEvaluator), DepthPolicy::Adaptive)
                    .with_time_limit(HUNTER_TIME_LIMIT),
            ),
        }
    }
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BotKind {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BotKind::from_name(s).ok_or_else(|| ArenaError::UnknownBot { name: s.to_string() })
    }
}

/// Name that tells apart several copies of one bot in a tournament.
pub fn unique_bot_name(id: i64, kind: BotKind) -> String {
    format!("[{id}] {}", kind.name())
}
