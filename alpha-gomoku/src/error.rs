use std::{error::Error as StdError, fmt::Display, io, path::PathBuf};

use gomoku::{ParseError, PlayError};

#[derive(Debug)]
pub enum Error {
    /// Search was started from a position without legal moves.
    TerminalRoot,
    /// A policy picked an action that is not legal in the given position.
    IllegalAction { action: usize, position: String },
    /// Evaluator output does not match the action space of the rules.
    ActionSpace { expected: usize, found: usize },
    /// A file that should exist at load time is missing.
    MissingFile(PathBuf),
    Parse { line: usize, reason: String },
    Network(String),
    Play(PlayError),
    Io(io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TerminalRoot => write!(f, "cannot search a position that has no legal moves"),
            Error::IllegalAction { action, position } => {
                write!(f, "action {action} is not legal in position {position}")
            }
            Error::ActionSpace { expected, found } => {
                write!(f, "expected a policy over {expected} actions but got {found}")
            }
            Error::MissingFile(path) => write!(f, "file {} does not exist", path.display()),
            Error::Parse { line, reason } => write!(f, "parse error on line {line}: {reason}"),
            Error::Network(reason) => write!(f, "network error: {reason}"),
            Error::Play(play_error) => play_error.fmt(f),
            Error::Io(io_error) => io_error.fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Play(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlayError> for Error {
    fn from(e: PlayError) -> Self {
        Error::Play(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse {
            line: 0,
            reason: e.to_string(),
        }
    }
}

#[cfg(feature = "torch")]
impl From<tch::TchError> for Error {
    fn from(e: tch::TchError) -> Self {
        Error::Network(e.to_string())
    }
}
