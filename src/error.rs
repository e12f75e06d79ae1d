//! Error types for the checkers arena
//!
//! One enum covers rule-engine contract breaches, record parsing, set-up
//! validation and file I/O.

use crate::game_repr::Colour;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building boards, playing games or running a tournament
#[derive(Error, Debug)]
pub enum ArenaError {
    /// A player chose something that is not in the generated legal move list
    #[error("{player} ({colour}) played an illegal move: {detail}")]
    IllegalMove { colour: Colour, player: String, detail: String },

    /// A record token could not be parsed or matches no legal move
    #[error("malformed record token `{token}`: {reason}")]
    MalformedRecord { token: String, reason: String },

    /// The board was asked to do something its own state forbids
    #[error("board invariant violated: {detail}")]
    InvariantViolation { detail: String },

    /// Board size or initial piece list is unusable
    #[error("invalid board setup: {detail}")]
    InvalidSetup { detail: String },

    /// Bot name not present in the registry
    #[error("unknown bot `{name}`")]
    UnknownBot { name: String },

    /// Tournament configuration rejected before any game starts
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArenaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArenaError::Io { path: path.into(), source }
    }

    /// Colour that forfeits because of this error, if it was a player's fault.
    pub fn forfeiting_colour(&self) -> Option<Colour> {
        match self {
            ArenaError::IllegalMove { colour, .. } => Some(*colour),
            _ => None,
        }
    }
}

/// Result type alias for arena operations
pub type Result<T> = std::result::Result<T, ArenaError>;
