use std::{
    fmt::{Display, Write},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Color, GameResult, ParseError, PlayError, Square};

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
const EMPTY: char = '-';
const ROW_SEPARATOR: char = '/';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board<const N: usize> {
    data: [[Option<Color>; N]; N],
}

impl<const N: usize> Default for Board<N> {
    fn default() -> Self {
        Board { data: [[None; N]; N] }
    }
}

impl<const N: usize> Index<Square> for Board<N> {
    type Output = Option<Color>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.data[square.row as usize][square.column as usize]
    }
}

impl<const N: usize> IndexMut<Square> for Board<N> {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.data[square.row as usize][square.column as usize]
    }
}

impl<const N: usize> Board<N> {
    pub fn get(&self, square: Square) -> Option<&Option<Color>> {
        square
            .on_board::<N>()
            .then(|| &self.data[square.row as usize][square.column as usize])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, Option<Color>)> + '_ {
        self.data.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(column, &cell)| (Square::new(row as u8, column as u8), cell))
        })
    }

    pub fn play(&mut self, square: Square, color: Color) -> Result<(), PlayError> {
        match self.get(square) {
            None => Err(PlayError::OutOfBounds),
            Some(Some(_)) => Err(PlayError::AlreadyOccupied),
            Some(None) => {
                self[square] = Some(color);
                Ok(())
            }
        }
    }

    pub fn empty_squares(&self) -> Vec<Square> {
        self.iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|(square, _)| square)
            .collect()
    }

    pub fn stone_count(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.data.iter().flatten().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().flatten().all(Option::is_none)
    }

    /// Whether `color` has at least `length` stones in a row
    /// horizontally, vertically, or diagonally.
    pub fn has_line(&self, color: Color, length: usize) -> bool {
        self.iter()
            .filter(|(_, cell)| *cell == Some(color))
            .any(|(origin, _)| {
                DIRECTIONS
                    .iter()
                    .any(|&direction| self.run_length(origin, direction, color, length) >= length)
            })
    }

    fn run_length(&self, origin: Square, (dr, dc): (isize, isize), color: Color, limit: usize) -> usize {
        let (mut row, mut column) = (origin.row as isize, origin.column as isize);
        let mut count = 0;
        while count < limit
            && (0..N as isize).contains(&row)
            && (0..N as isize).contains(&column)
            && self.data[row as usize][column as usize] == Some(color)
        {
            count += 1;
            row += dr;
            column += dc;
        }
        count
    }

    /// The game is drawn once the board fills up without a line.
    pub fn result(&self, win_length: usize) -> GameResult {
        if self.has_line(Color::Black, win_length) {
            GameResult::Winner(Color::Black)
        } else if self.has_line(Color::White, win_length) {
            GameResult::Winner(Color::White)
        } else if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        }
    }

    /// Swap the colour of every stone.
    #[must_use]
    pub fn flip_colors(mut self) -> Self {
        self.data
            .iter_mut()
            .flatten()
            .for_each(|cell| *cell = cell.map(Color::next));
        self
    }

    /// Human readable board with row and column indices.
    pub fn pretty(&self) -> String {
        let mut out = String::from("   ");
        for column in 0..N {
            let _ = write!(out, "{column:>2}");
        }
        out.push('\n');
        let rule = "-".repeat(2 * N + 4);
        out.push_str(&rule);
        out.push('\n');
        for (row, cells) in self.data.iter().enumerate() {
            let _ = write!(out, "{row:>2} |");
            for cell in cells {
                let _ = write!(out, "{} ", cell.map_or(EMPTY, Color::symbol));
            }
            out.push_str("|\n");
        }
        out.push_str(&rule);
        out
    }
}

impl<const N: usize> Display for Board<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.data.iter().enumerate() {
            if row != 0 {
                f.write_char(ROW_SEPARATOR)?;
            }
            for cell in cells {
                f.write_char(cell.map_or(EMPTY, Color::symbol))?;
            }
        }
        Ok(())
    }
}

impl<const N: usize> FromStr for Board<N> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<_> = s.trim().split(ROW_SEPARATOR).collect();
        if rows.len() != N {
            return Err(ParseError::RowCount {
                expected: N,
                found: rows.len(),
            });
        }

        let mut board = Board::default();
        for (row, cells) in rows.into_iter().enumerate() {
            let found = cells.chars().count();
            if found != N {
                return Err(ParseError::RowLength {
                    row,
                    expected: N,
                    found,
                });
            }
            for (column, c) in cells.chars().enumerate() {
                board.data[row][column] = match c {
                    EMPTY => None,
                    c => Some(Color::from_symbol(c).ok_or(ParseError::Symbol(c))?),
                };
            }
        }
        Ok(board)
    }
}
