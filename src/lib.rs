pub mod agent;
pub mod config;
pub mod error;
pub mod game_repr;
pub mod orchestrator;
pub mod tournament;

pub use error::{ArenaError, Result};
