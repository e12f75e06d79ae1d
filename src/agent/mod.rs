pub mod player;
pub use player::*;

pub mod simple_bots;
pub use simple_bots::{CopyCat, FirstMover, RandomBot};

pub mod lookahead_bots;
pub use lookahead_bots::{Flexibility, GreedyCat, ScaredyCat};

pub mod bot_kind;
pub use bot_kind::{unique_bot_name, BotKind};

pub mod ai;
pub use ai::{DepthPolicy, MinimaxPlayer, SearchResult};
