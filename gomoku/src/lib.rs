mod board;
mod color;
mod error;
mod game_result;
mod square;
mod symm;

pub use board::Board;
pub use color::Color;
pub use error::*;
pub use game_result::GameResult;
pub use square::Square;
pub use symm::Symmetry;
