use std::ops::{Index, IndexMut};

use crate::square::Square;

/// Plain 8×8 grid addressed by [`Square`], row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SimpleBoard<T>(pub [[T; 8]; 8]);

impl<T> SimpleBoard<T> {
    pub fn row(&self, row: u8) -> &[T; 8] {
        &self.0[row as usize]
    }
    pub fn row_mut(&mut self, row: u8) -> &mut [T; 8] {
        &mut self.0[row as usize]
    }
}
impl<T> Index<Square> for SimpleBoard<T> {
    type Output = T;

    fn index(&self, index: Square) -> &Self::Output {
        &self.row(index.row())[index.col() as usize]
    }
}
impl<T> IndexMut<Square> for SimpleBoard<T> {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.row_mut(index.row())[index.col() as usize]
    }
}
#[cfg(test)]
mod test {
    use crate::{simple_board::SimpleBoard, square::Square};

    #[test]
    fn index_follows_row_then_column() {
        let mut board = SimpleBoard::<u8>::default();
        board[Square::new(2, 5)] = 7;
        assert_eq!(board.0[2][5], 7);
        assert_eq!(board.row(2)[5], 7);
    }
}
