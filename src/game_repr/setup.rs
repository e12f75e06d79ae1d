use super::piece::{Colour, Piece};
use super::square::{Square, MAX_SIZE, MIN_SIZE};
use crate::error::{ArenaError, Result};

/// How a fresh board is populated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Setup {
    /// `size / 2 - 1` ranks of men per side (three on 8x8)
    #[default]
    Standard,
    /// Only the back rank of each side
    LastRow,
    /// Explicit piece list, placed as given
    Pieces(Vec<Piece>),
}

impl Setup {
    /// Piece list for a board of edge `size`. Does not check the list.
    pub fn pieces(&self, size: usize) -> Vec<Piece> {
        match self {
            Setup::Standard => ranked(size, size / 2 - 1),
            Setup::LastRow => ranked(size, 1),
            Setup::Pieces(pieces) => pieces.clone(),
        }
    }
}

/// Dark men on the first `ranks` rows, light men on the last `ranks` rows.
fn ranked(size: usize, ranks: usize) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(ranks * size);
    for row in 0..size {
        let colour = if row < ranks {
            Colour::Dark
        } else if row >= size - ranks {
            Colour::Light
        } else {
            continue;
        };
        for col in 0..size {
            let sq = Square::new(row as u8, col as u8);
            if sq.is_dark() {
                pieces.push(Piece::man(sq, colour));
            }
        }
    }
    pieces
}

pub fn validate_size(size: usize) -> Result<()> {
    if size % 2 != 0 || !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(ArenaError::InvalidSetup {
            detail: format!("board size must be even and within {MIN_SIZE}..={MAX_SIZE}, got {size}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_has_twelve_each_on_eight() {
        let pieces = Setup::Standard.pieces(8);
        assert_eq!(pieces.iter().filter(|p| p.is(Colour::Light)).count(), 12);
        assert_eq!(pieces.iter().filter(|p| p.is(Colour::Dark)).count(), 12);
        assert!(pieces.iter().all(|p| p.position.is_dark() && !p.is_king));
        assert!(pieces.iter().filter(|p| p.is(Colour::Dark)).all(|p| p.position.row < 3));
    }

    #[test]
    fn test_last_row_layout() {
        let pieces = Setup::LastRow.pieces(10);
        assert_eq!(pieces.len(), 10);
        assert!(pieces.iter().filter(|p| p.is(Colour::Light)).all(|p| p.position.row == 9));
    }

    #[test]
    fn test_size_validation() {
        assert!(validate_size(8).is_ok());
        assert!(validate_size(4).is_ok());
        assert!(validate_size(7).is_err());
        assert!(validate_size(2).is_err());
        assert!(validate_size(18).is_err());
    }
}
