use super::square::Square;
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

/// Squares removed by one move, in the order they were jumped.
pub type CaptureList = SmallVec<[Square; 4]>;

/// A single turn: a step, a jump, or a whole chain of jumps.
///
/// Two moves are equal when they share start, end and the same *set* of
/// captured squares; the jump order does not take part in comparison.
#[derive(Debug, Clone)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub captured: CaptureList,
}

impl Move {
    pub fn simple(start: Square, end: Square) -> Self {
        Self { start, end, captured: CaptureList::new() }
    }

    pub fn capture(start: Square, end: Square, captured: &[Square]) -> Self {
        Self { start, end, captured: CaptureList::from_slice(captured) }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Every square the piece lands on, ending with `end`.
    ///
    /// For a jump the landing square lies symmetrically beyond the captured
    /// piece, so the path is recovered from the ordered capture list.
    pub fn landing_path(&self) -> SmallVec<[Square; 4]> {
        if !self.is_capture() {
            return SmallVec::from_slice(&[self.end]);
        }
        let mut path = SmallVec::new();
        let mut from = self.start;
        for mid in &self.captured {
            let to = Square::new(
                (2 * mid.row as i16 - from.row as i16) as u8,
                (2 * mid.col as i16 - from.col as i16) as u8,
            );
            path.push(to);
            from = to;
        }
        path
    }

    /// Move reflected through the board centre.
    pub fn mirrored(&self, size: usize) -> Move {
        Move {
            start: self.start.mirrored(size),
            end: self.end.mirrored(size),
            captured: self.captured.iter().map(|sq| sq.mirrored(size)).collect(),
        }
    }

    fn sorted_captures(&self) -> CaptureList {
        let mut sorted = self.captured.clone();
        sorted.sort_unstable();
        sorted
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.captured.len() == other.captured.len()
            && self.sorted_captures() == other.sorted_captures()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.sorted_captures().hash(state);
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)?;
        let sep = if self.is_capture() { " x " } else { " - " };
        write!(f, "{}{}", sep, self.end)?;
        if self.is_capture() {
            write!(f, " [")?;
            for (i, sq) in self.captured.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", sq)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// What applying a move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveEffect {
    pub captured_count: usize,
    pub promoted: bool,
}

impl MoveEffect {
    /// Captures and promotions reset the fifty-move countdown.
    pub fn is_action(&self) -> bool {
        self.captured_count > 0 || self.promoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col)
    }

    #[test]
    fn test_equality_ignores_capture_order() {
        let a = Move::capture(sq(0, 0), sq(4, 4), &[sq(1, 1), sq(3, 3)]);
        let b = Move::capture(sq(0, 0), sq(4, 4), &[sq(3, 3), sq(1, 1)]);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_different_capture_sets_are_distinct() {
        let a = Move::capture(sq(2, 2), sq(6, 2), &[sq(3, 1), sq(5, 1)]);
        let b = Move::capture(sq(2, 2), sq(6, 2), &[sq(3, 3), sq(5, 3)]);
        assert_ne!(a, b);
        assert_ne!(Move::simple(sq(5, 0), sq(4, 1)), Move::capture(sq(5, 0), sq(4, 1), &[sq(4, 1)]));
    }

    #[test]
    fn test_landing_path_of_chain() {
        let mv = Move::capture(sq(2, 2), sq(6, 2), &[sq(3, 1), sq(5, 1)]);
        assert_eq!(mv.landing_path().as_slice(), &[sq(4, 0), sq(6, 2)]);
        assert_eq!(Move::simple(sq(5, 0), sq(4, 1)).landing_path().as_slice(), &[sq(4, 1)]);
    }

    #[test]
    fn test_effect_is_action() {
        assert!(!MoveEffect::default().is_action());
        assert!(MoveEffect { captured_count: 1, promoted: false }.is_action());
        assert!(MoveEffect { captured_count: 0, promoted: true }.is_action());
    }
}
