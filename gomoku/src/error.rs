use std::{error::Error, fmt::Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayError {
    OutOfBounds,
    AlreadyOccupied,
}

impl Display for PlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            PlayError::OutOfBounds => "given square is not on the board",
            PlayError::AlreadyOccupied => "cannot place a stone there because the square is already occupied",
        })
    }
}

impl Error for PlayError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseError {
    RowCount { expected: usize, found: usize },
    RowLength { row: usize, expected: usize, found: usize },
    Symbol(char),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::RowCount { expected, found } => {
                write!(f, "expected {expected} rows but found {found}")
            }
            ParseError::RowLength { row, expected, found } => {
                write!(f, "row {row} should have {expected} cells but has {found}")
            }
            ParseError::Symbol(c) => write!(f, "unknown cell symbol {c:?}"),
        }
    }
}

impl Error for ParseError {}
