mod bitboards;
mod board;
pub mod movegen;
mod moves;
pub mod pdn;
mod piece;
mod setup;
mod square;
mod zobrist;

#[cfg(test)]
mod tests;

pub use bitboards::*;
pub use board::*;
pub use moves::*;
pub use piece::*;
pub use setup::*;
pub use square::*;
pub use zobrist::{hash_placement, PositionKey};
