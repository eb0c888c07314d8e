use std::{fmt::Display, hash::Hash, str::FromStr};

use crate::error::Error;

mod gomoku_rules;

pub use self::gomoku_rules::{Gomoku15, Gomoku20, GomokuRules, TicTacToe};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
    Ongoing,
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Ongoing
    }
}

impl Outcome {
    pub fn is_ongoing(self) -> bool {
        matches!(self, Outcome::Ongoing)
    }

    /// +1 for a win, -1 for a loss, and 0 for a draw.
    pub fn reward(self, perspective: Player) -> Option<f32> {
        match self {
            Outcome::Winner(winner) if winner == perspective => Some(1.0),
            Outcome::Winner(_) => Some(-1.0),
            Outcome::Draw => Some(0.0),
            Outcome::Ongoing => None,
        }
    }
}

/// Stateless rule engine of a two-player, zero-sum board game
/// with a fixed-size action space.
///
/// A canonical position is expressed so that the player to move
/// plays as [`Player::First`].
pub trait Rules {
    type Position: Clone + Eq + Hash + Display + FromStr;

    fn initial_position(&self) -> Self::Position;
    fn board_shape(&self) -> (usize, usize);
    fn action_space(&self) -> usize;

    /// Mask over the whole action space.
    fn legal_moves(&self, position: &Self::Position, player: Player) -> Vec<bool>;

    /// Returns the next position and the player to move there.
    fn apply_move(
        &self,
        position: &Self::Position,
        player: Player,
        action: usize,
    ) -> Result<(Self::Position, Player), Error>;

    fn outcome(&self, position: &Self::Position) -> Outcome;

    fn canonical_form(&self, position: &Self::Position, player: Player) -> Self::Position;

    /// Equivalent (position, policy) pairs, the identity included.
    fn symmetries(&self, position: &Self::Position, policy: &[f32]) -> Vec<(Self::Position, Vec<f32>)>;

    fn display(&self, position: &Self::Position) -> String;

    /// Game result from the perspective of `player`, `None` while the game is ongoing.
    fn reward(&self, position: &Self::Position, player: Player) -> Option<f32> {
        self.outcome(position).reward(player)
    }

    fn is_legal(&self, position: &Self::Position, player: Player, action: usize) -> bool {
        self.legal_moves(position, player)
            .get(action)
            .copied()
            .unwrap_or(false)
    }
}
