use super::piece::{Colour, Piece};
use super::square::MAX_SIZE;

const WORDS: usize = MAX_SIZE * MAX_SIZE / 64;

/// A set of grid cells, one bit per row-major index (`row * size + col`).
/// Wide enough for the largest supported board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet {
    words: [u64; WORDS],
}

impl SquareSet {
    pub fn empty() -> Self {
        Self { words: [0; WORDS] }
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    #[inline]
    pub fn clear(&mut self, idx: usize) {
        self.words[idx / 64] &= !(1u64 << (idx % 64));
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        (self.words[idx / 64] & (1u64 << (idx % 64))) != 0
    }

    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Indices of the set bits, lowest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(w * 64 + bit)
            })
        })
    }
}

/// Compact encoding of piece placement: light pieces, dark pieces, kings.
/// Two boards with the same placement are the same position regardless of
/// how they were reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Placement {
    pub light: SquareSet,
    pub dark: SquareSet,
    pub kings: SquareSet,
}

impl Placement {
    pub fn add(&mut self, piece: &Piece, size: usize) {
        let idx = piece.position.index(size);
        match piece.colour {
            Colour::Light => self.light.set(idx),
            Colour::Dark => self.dark.set(idx),
        }
        if piece.is_king {
            self.kings.set(idx);
        }
    }

    pub fn remove(&mut self, idx: usize) {
        self.light.clear(idx);
        self.dark.clear(idx);
        self.kings.clear(idx);
    }

    pub fn of(&self, colour: Colour) -> &SquareSet {
        match colour {
            Colour::Light => &self.light,
            Colour::Dark => &self.dark,
        }
    }

    pub fn occupied(&self, idx: usize) -> bool {
        self.light.contains(idx) || self.dark.contains(idx)
    }
}
