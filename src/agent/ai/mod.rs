// Search bots - Minimax with Alpha-Beta Pruning
//
// Light maximises and Dark minimises a pluggable static evaluation.
//
// Key features:
// - Forced captures are searched to completion past the nominal depth
// - Iterative deepening under an optional time budget
// - Principal variation reconstruction
// - Optional root-parallel search on the rayon pool

pub mod evaluation;
mod minimax_player;
pub mod search;

pub use evaluation::{mobility, Evaluator, HunterEvaluator, MaterialEvaluator};
pub use minimax_player::{DepthPolicy, MinimaxPlayer};
pub use search::{iterative_deepening_search, SearchLimits, SearchResult, WON};
