use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub column: u8,
}

impl Square {
    pub const fn new(row: u8, column: u8) -> Self {
        Square { row, column }
    }

    /// Index into a row-major action space of size `N * N`.
    pub const fn index<const N: usize>(self) -> usize {
        self.row as usize * N + self.column as usize
    }

    pub const fn from_index<const N: usize>(index: usize) -> Self {
        Square {
            row: (index / N) as u8,
            column: (index % N) as u8,
        }
    }

    pub fn on_board<const N: usize>(self) -> bool {
        (self.row as usize) < N && (self.column as usize) < N
    }

    /// Rotate 90 degrees clockwise on a board of size `n`.
    #[must_use]
    pub fn rotate(self, n: u8) -> Self {
        Square {
            row: self.column,
            column: n - 1 - self.row,
        }
    }

    /// Mirror across the vertical axis on a board of size `n`.
    #[must_use]
    pub fn mirror(self, n: u8) -> Self {
        Square {
            row: self.row,
            column: n - 1 - self.column,
        }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
