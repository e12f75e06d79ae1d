use super::square::{Direction, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    Light,
    Dark,
}

impl Colour {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The two diagonals a man of this colour may move along.
    /// Light advances toward row 0, Dark toward the last row.
    pub fn forward_directions(&self) -> [Direction; 2] {
        match self {
            Self::Light => [Direction::UP_LEFT, Direction::UP_RIGHT],
            Self::Dark => [Direction::DOWN_LEFT, Direction::DOWN_RIGHT],
        }
    }

    /// Row on which a man of this colour is crowned.
    pub fn promotion_row(&self, size: usize) -> u8 {
        match self {
            Self::Light => 0,
            Self::Dark => (size - 1) as u8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Light => 0,
            Self::Dark => 1,
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub position: Square,
    pub colour: Colour,
    pub is_king: bool,
}

impl Piece {
    pub fn man(position: Square, colour: Colour) -> Self {
        Self { position, colour, is_king: false }
    }

    pub fn king(position: Square, colour: Colour) -> Self {
        Self { position, colour, is_king: true }
    }

    pub fn is(&self, colour: Colour) -> bool {
        self.colour == colour
    }

    /// Directions this piece may step or jump in. Kings get all four,
    /// forward pair first.
    pub fn directions(&self) -> &'static [Direction] {
        const LIGHT_MAN: [Direction; 2] = [Direction::UP_LEFT, Direction::UP_RIGHT];
        const DARK_MAN: [Direction; 2] = [Direction::DOWN_LEFT, Direction::DOWN_RIGHT];
        const LIGHT_KING: [Direction; 4] = [
            Direction::UP_LEFT,
            Direction::UP_RIGHT,
            Direction::DOWN_RIGHT,
            Direction::DOWN_LEFT,
        ];
        const DARK_KING: [Direction; 4] = [
            Direction::DOWN_LEFT,
            Direction::DOWN_RIGHT,
            Direction::UP_RIGHT,
            Direction::UP_LEFT,
        ];
        match (self.colour, self.is_king) {
            (Colour::Light, false) => &LIGHT_MAN,
            (Colour::Dark, false) => &DARK_MAN,
            (Colour::Light, true) => &LIGHT_KING,
            (Colour::Dark, true) => &DARK_KING,
        }
    }

    /// Rows still to travel before promotion.
    pub fn rows_to_promote(&self, size: usize) -> u8 {
        self.position.row.abs_diff(self.colour.promotion_row(size))
    }

    pub fn to_char(&self) -> char {
        match (self.colour, self.is_king) {
            (Colour::Light, false) => 'l',
            (Colour::Light, true) => 'L',
            (Colour::Dark, false) => 'd',
            (Colour::Dark, true) => 'D',
        }
    }
}
