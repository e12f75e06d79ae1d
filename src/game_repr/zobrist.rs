use super::bitboards::Placement;
use super::piece::Colour;
use super::square::MAX_SIZE;
use once_cell::sync::Lazy;
use std::hash::{Hash, Hasher};

const CELLS: usize = MAX_SIZE * MAX_SIZE;

/// Zobrist hashing constants for draughts positions
///
/// One random 64-bit number per (colour, man/king, cell) plus one for the
/// side to move. A position hashes to the XOR of the keys of what is on it.
pub struct ZobristKeys {
    /// [colour][kind][cell], kind 0 = man, 1 = king
    pub pieces: [[[u64; CELLS]; 2]; 2],
    /// Toggled in when Dark is to move
    pub side_to_move: u64,
}

impl ZobristKeys {
    /// Keys come from a fixed seed so hashes are reproducible between runs
    fn generate() -> Self {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x517cc1b727220a95);

        let mut pieces = [[[0u64; CELLS]; 2]; 2];
        for colour in &mut pieces {
            for kind in colour {
                for cell in kind {
                    *cell = rng.gen();
                }
            }
        }

        Self { pieces, side_to_move: rng.gen() }
    }
}

/// Global Zobrist keys, built on first use
static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);

/// Hash a placement with the side to move folded in.
pub fn hash_placement(placement: &Placement, to_move: Colour) -> u64 {
    let keys = &*ZOBRIST;
    let mut hash = 0u64;

    for colour in [Colour::Light, Colour::Dark] {
        let c = colour.index();
        for idx in placement.of(colour).iter() {
            let kind = placement.kings.contains(idx) as usize;
            hash ^= keys.pieces[c][kind][idx];
        }
    }

    if to_move == Colour::Dark {
        hash ^= keys.side_to_move;
    }
    hash
}

/// Repetition key: piece placement plus the side to move.
///
/// Hashes by Zobrist value but compares the bit-sets, so two different
/// positions sharing a hash still count separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionKey {
    pub placement: Placement,
    pub to_move: Colour,
}

impl PositionKey {
    pub fn zobrist(&self) -> u64 {
        hash_placement(&self.placement, self.to_move)
    }
}

impl Hash for PositionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.zobrist());
    }
}
