use crate::{Board, Square};

/// The eight symmetries of the square board.
/// Index `i` of every implementation refers to the same transformation.
pub trait Symmetry<const N: usize>: Sized {
    fn symmetries(self) -> [Self; 8];
}

impl<const N: usize> Symmetry<N> for Square {
    fn symmetries(self) -> [Self; 8] {
        let n = N as u8;
        [
            self,
            self.rotate(n),
            self.rotate(n).rotate(n),
            self.rotate(n).rotate(n).rotate(n),
            self.mirror(n),
            self.mirror(n).rotate(n),
            self.mirror(n).rotate(n).rotate(n),
            self.mirror(n).rotate(n).rotate(n).rotate(n),
        ]
    }
}

impl<const N: usize> Symmetry<N> for Board<N> {
    fn symmetries(self) -> [Self; 8] {
        let mut boards = [self; 8];
        for (square, cell) in self.iter() {
            for (i, sym) in Symmetry::<N>::symmetries(square).into_iter().enumerate().skip(1) {
                boards[i][sym] = cell;
            }
        }
        boards
    }
}
