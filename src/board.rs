//! Fixed 8×8 board: one slot per row holding the queen's column or [`EMPTY`].

use std::fmt;

use serde::Serialize;

use crate::error::BoardError;

/// Board side length. Only the classic eight-queens board is supported.
pub const N: usize = 8;

/// Sentinel stored in a row that holds no queen.
pub const EMPTY: i8 = -1;

/// `cells[row]` is the column of that row's queen, or [`EMPTY`].
///
/// At most one queen per row is structural. Every other value lies in `0..8`;
/// the only way to build a board from raw columns is [`Board::from_columns`],
/// which enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Board([i8; N]);

impl Board {
    pub const fn empty() -> Self {
        Self([EMPTY; N])
    }

    /// Validate raw column values (`-1` for an empty row).
    pub fn from_columns(cols: &[i8]) -> Result<Self, BoardError> {
        if cols.len() != N {
            return Err(BoardError::WrongLength(cols.len()));
        }
        let mut cells = [EMPTY; N];
        for (row, &value) in cols.iter().enumerate() {
            if value != EMPTY && !(0..N as i8).contains(&value) {
                return Err(BoardError::OutOfRange { row, value });
            }
            cells[row] = value;
        }
        Ok(Self(cells))
    }

    /// Column of the queen on `row`, if any.
    pub fn get(&self, row: usize) -> Option<usize> {
        match self.0[row] {
            EMPTY => None,
            col => Some(col as usize),
        }
    }

    pub fn is_occupied(&self, row: usize) -> bool {
        self.0[row] != EMPTY
    }

    /// Place a queen on `row` at `col`, replacing whatever was there.
    pub fn set(&mut self, row: usize, col: usize) {
        debug_assert!(col < N, "column {col} out of range");
        self.0[row] = col as i8;
    }

    pub fn clear(&mut self, row: usize) {
        self.0[row] = EMPTY;
    }

    /// Edit-mode click: clicking the row's own queen removes it, any other
    /// cell moves the row's queen there.
    pub fn toggle(&mut self, row: usize, col: usize) {
        if self.get(row) == Some(col) {
            self.clear(row);
        } else {
            self.set(row, col);
        }
    }

    /// Copy of this board with `col` on `row`.
    pub fn with(&self, row: usize, col: usize) -> Self {
        let mut next = *self;
        next.set(row, col);
        next
    }

    /// Number of occupied rows.
    pub fn placed(&self) -> usize {
        self.0.iter().filter(|&&c| c != EMPTY).count()
    }

    pub fn is_full(&self) -> bool {
        self.placed() == N
    }

    /// Lowest empty row at or after `from`, or `None` when every such row is
    /// filled.
    pub fn first_empty_row_from(&self, from: usize) -> Option<usize> {
        (from..N).find(|&row| !self.is_occupied(row))
    }

    /// `(row, col)` of every queen, in row order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..N).filter_map(move |row| self.get(row).map(|col| (row, col)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_columns_rejects_bad_input() {
        assert_eq!(
            Board::from_columns(&[0, 1, 2]),
            Err(BoardError::WrongLength(3))
        );
        assert_eq!(
            Board::from_columns(&[0, -1, -1, 8, -1, -1, -1, -1]),
            Err(BoardError::OutOfRange { row: 3, value: 8 })
        );
        assert_eq!(
            Board::from_columns(&[-2, -1, -1, -1, -1, -1, -1, -1]),
            Err(BoardError::OutOfRange { row: 0, value: -2 })
        );
    }

    #[test]
    fn toggle_places_moves_and_removes() {
        let mut b = Board::empty();
        b.toggle(2, 5);
        assert_eq!(b.get(2), Some(5));
        b.toggle(2, 1);
        assert_eq!(b.get(2), Some(1));
        b.toggle(2, 1);
        assert_eq!(b.get(2), None);
        assert_eq!(b.placed(), 0);
    }

    #[test]
    fn first_empty_row_skips_filled_rows() {
        let b = Board::from_columns(&[0, 2, -1, 1, -1, -1, -1, -1]).unwrap();
        assert_eq!(b.first_empty_row_from(0), Some(2));
        assert_eq!(b.first_empty_row_from(3), Some(4));
        let full = Board::from_columns(&[0, 4, 7, 5, 2, 6, 1, 3]).unwrap();
        assert_eq!(full.first_empty_row_from(0), None);
        assert!(full.is_full());
    }

    #[test]
    fn display_keeps_sentinels() {
        let b = Board::from_columns(&[0, -1, -1, -1, -1, -1, -1, 7]).unwrap();
        assert_eq!(b.to_string(), "[0, -1, -1, -1, -1, -1, -1, 7]");
    }
}
