use std::fmt::Display;

/// Black always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'x',
            Color::White => 'o',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'x' => Some(Color::Black),
            'o' => Some(Color::White),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
