use std::fmt;

/// Smallest supported board edge.
pub const MIN_SIZE: usize = 4;
/// Largest supported board edge (256 cells fit the bit-sets).
pub const MAX_SIZE: usize = 16;

/// A (row, column) coordinate, zero-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True if both components lie in `[0, size)`.
    #[inline]
    pub fn is_on_board(&self, size: usize) -> bool {
        (self.row as usize) < size && (self.col as usize) < size
    }

    /// Dark squares are the playable ones.
    #[inline]
    pub fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Step `steps` times along `dir`; `None` once it leaves the board.
    #[inline]
    pub fn offset(&self, dir: Direction, steps: i8, size: usize) -> Option<Square> {
        let row = self.row as i16 + (dir.dr as i16) * steps as i16;
        let col = self.col as i16 + (dir.dc as i16) * steps as i16;
        if row < 0 || col < 0 || row >= size as i16 || col >= size as i16 {
            return None;
        }
        Some(Square::new(row as u8, col as u8))
    }

    /// Row-major index into a `size * size` grid.
    #[inline]
    pub fn index(&self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    /// Square reflected through the board centre.
    pub fn mirrored(&self, size: usize) -> Square {
        Square::new(size as u8 - 1 - self.row, size as u8 - 1 - self.col)
    }

    /// Chebyshev distance.
    pub fn distance(&self, other: Square) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Standard 1-based draughts numbering over the dark squares:
    /// `row * (size / 2) + col / 2 + 1`.
    pub fn to_number(&self, size: usize) -> u32 {
        (self.row as u32) * (size as u32 / 2) + self.col as u32 / 2 + 1
    }

    /// Inverse of [`Square::to_number`]; `None` for numbers outside the board.
    pub fn from_number(number: u32, size: usize) -> Option<Square> {
        let per_row = size as u32 / 2;
        if number == 0 || number > per_row * size as u32 {
            return None;
        }
        let n = number - 1;
        let row = n / per_row;
        // Dark squares sit on odd columns in even rows and even columns in odd rows.
        let col = (n % per_row) * 2 + if row % 2 == 0 { 1 } else { 0 };
        Some(Square::new(row as u8, col as u8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A diagonal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

impl Direction {
    pub const UP_LEFT: Direction = Direction { dr: -1, dc: -1 };
    pub const UP_RIGHT: Direction = Direction { dr: -1, dc: 1 };
    pub const DOWN_LEFT: Direction = Direction { dr: 1, dc: -1 };
    pub const DOWN_RIGHT: Direction = Direction { dr: 1, dc: 1 };
}
