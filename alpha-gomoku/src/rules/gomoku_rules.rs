use gomoku::{Board, Color, GameResult, Square, Symmetry};

use super::{Outcome, Player, Rules};
use crate::error::Error;

/// Gomoku on an `N`x`N` board where `K` stones in a row win.
#[derive(Clone, Copy, Debug, Default)]
pub struct GomokuRules<const N: usize, const K: usize>;

pub type TicTacToe = GomokuRules<3, 3>;
pub type Gomoku15 = GomokuRules<15, 5>;
pub type Gomoku20 = GomokuRules<20, 5>;

fn color(player: Player) -> Color {
    match player {
        Player::First => Color::Black,
        Player::Second => Color::White,
    }
}

fn player(color: Color) -> Player {
    match color {
        Color::Black => Player::First,
        Color::White => Player::Second,
    }
}

impl<const N: usize, const K: usize> Rules for GomokuRules<N, K> {
    type Position = Board<N>;

    fn initial_position(&self) -> Board<N> {
        Board::default()
    }

    fn board_shape(&self) -> (usize, usize) {
        (N, N)
    }

    fn action_space(&self) -> usize {
        N * N
    }

    fn legal_moves(&self, position: &Board<N>, _player: Player) -> Vec<bool> {
        position.iter().map(|(_, cell)| cell.is_none()).collect()
    }

    fn apply_move(&self, position: &Board<N>, player: Player, action: usize) -> Result<(Board<N>, Player), Error> {
        let illegal = || Error::IllegalAction {
            action,
            position: position.to_string(),
        };
        if action >= N * N {
            return Err(illegal());
        }
        let mut next = *position;
        next.play(Square::from_index::<N>(action), color(player))
            .map_err(|_| illegal())?;
        Ok((next, player.next()))
    }

    fn outcome(&self, position: &Board<N>) -> Outcome {
        match position.result(K) {
            GameResult::Winner(winner) => Outcome::Winner(player(winner)),
            GameResult::Draw => Outcome::Draw,
            GameResult::Ongoing => Outcome::Ongoing,
        }
    }

    fn canonical_form(&self, position: &Board<N>, player: Player) -> Board<N> {
        match player {
            Player::First => *position,
            Player::Second => position.flip_colors(),
        }
    }

    fn symmetries(&self, position: &Board<N>, policy: &[f32]) -> Vec<(Board<N>, Vec<f32>)> {
        debug_assert_eq!(policy.len(), N * N);
        let mut policies = vec![vec![0.0; N * N]; 8];
        for (index, &p) in policy.iter().enumerate() {
            let square = Square::from_index::<N>(index);
            for (i, sym) in Symmetry::<N>::symmetries(square).into_iter().enumerate() {
                policies[i][sym.index::<N>()] = p;
            }
        }
        position.symmetries().into_iter().zip(policies).collect()
    }

    fn display(&self, position: &Board<N>) -> String {
        position.pretty()
    }
}
