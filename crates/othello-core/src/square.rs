//! Typed coordinates on the padded board grid.

use std::fmt;
use std::str::FromStr;

use crate::constants::{BOARD_CELLS, GRID_WIDTH};

/// An interior cell of the padded 10x10 grid.
///
/// The grid is indexed 0-99; the playable 8x8 area occupies the indices whose
/// row and column components both fall in 1..=8:
///
/// ```text
///      c0  c1  c2  c3  c4  c5  c6  c7
/// r0   11  12  13  14  15  16  17  18
/// r1   21  22  23  24  25  26  27  28
/// ...
/// r7   81  82  83  84  85  86  87  88
/// ```
///
/// A `Square` always refers to an interior cell, so the raw padded indices
/// (including the corner magic numbers 11/18/81/88) never leak past this
/// module. Externally a square is written as two ASCII digits, row then
/// column, both 0-based: `"00"` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

/// The four corner squares in increasing index order.
pub const CORNERS: [Square; 4] = [Square(11), Square(18), Square(81), Square(88)];

/// For each empty corner the three adjacent cells (two edge, one diagonal)
/// that the corner-closeness heuristic inspects.
pub const CORNER_NEIGHBOURS: [(Square, [Square; 3]); 4] = [
    (Square(11), [Square(12), Square(21), Square(22)]),
    (Square(18), [Square(17), Square(27), Square(28)]),
    (Square(81), [Square(82), Square(71), Square(72)]),
    (Square(88), [Square(87), Square(78), Square(77)]),
];

impl Square {
    /// Creates a square from a raw padded-grid index.
    ///
    /// # Returns
    ///
    /// `Some(Square)` iff both the row and column components lie in 1..=8.
    pub fn from_index(index: usize) -> Option<Square> {
        if index >= BOARD_CELLS {
            return None;
        }
        let row = index / GRID_WIDTH;
        let col = index % GRID_WIDTH;
        if (1..=8).contains(&row) && (1..=8).contains(&col) {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// Creates a square from 0-based row and column coordinates.
    pub fn from_row_col(row: usize, col: usize) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square(((row + 1) * GRID_WIDTH + col + 1) as u8))
        } else {
            None
        }
    }

    /// Raw index into the padded grid.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 0-based row of the playable area.
    #[inline]
    pub fn row(self) -> usize {
        self.0 as usize / GRID_WIDTH - 1
    }

    /// 0-based column of the playable area.
    #[inline]
    pub fn col(self) -> usize {
        self.0 as usize % GRID_WIDTH - 1
    }

    /// True for the four board corners.
    #[inline]
    pub fn is_corner(self) -> bool {
        CORNERS.contains(&self)
    }

    /// Iterates every interior square in increasing index order
    /// (top-left to bottom-right).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_CELLS).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row(), self.col())
    }
}

/// Error returned when a move string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSquareError(pub String);

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move string: {:?}", self.0)
    }
}

impl std::error::Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parses the two-digit external move encoding, e.g. `"00"` or `"77"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut digits = s.chars();
        let (row, col) = match (digits.next(), digits.next(), digits.next()) {
            (Some(r), Some(c), None) => (r.to_digit(10), c.to_digit(10)),
            _ => return Err(ParseSquareError(s.to_string())),
        };
        match (row, col) {
            (Some(r), Some(c)) => Square::from_row_col(r as usize, c as usize)
                .ok_or_else(|| ParseSquareError(s.to_string())),
            _ => Err(ParseSquareError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_interior_only() {
        assert_eq!(Square::from_index(11).map(|s| s.index()), Some(11));
        assert_eq!(Square::from_index(88).map(|s| s.index()), Some(88));
        // Border ring and out-of-range indices are rejected.
        for bad in [0, 9, 10, 19, 20, 90, 99, 100, 250] {
            assert!(Square::from_index(bad).is_none(), "index {bad}");
        }
    }

    #[test]
    fn test_row_col_round_trip() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::from_row_col(row, col).unwrap();
                assert_eq!(sq.row(), row);
                assert_eq!(sq.col(), col);
                assert_eq!(Square::from_index(sq.index()), Some(sq));
            }
        }
        assert!(Square::from_row_col(8, 0).is_none());
        assert!(Square::from_row_col(0, 8).is_none());
    }

    #[test]
    fn test_all_is_increasing_and_complete() {
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert!(all.windows(2).all(|w| w[0].index() < w[1].index()));
    }

    #[test]
    fn test_corners() {
        for corner in CORNERS {
            assert!(corner.is_corner());
        }
        assert!(!Square::from_row_col(3, 3).unwrap().is_corner());
        let tl = Square::from_row_col(0, 0).unwrap();
        assert!(tl.is_corner());
    }

    #[test]
    fn test_move_string_codec() {
        let tl = Square::from_row_col(0, 0).unwrap();
        assert_eq!(tl.to_string(), "00");
        assert_eq!("00".parse::<Square>().unwrap(), tl);

        let sq = Square::from_row_col(2, 5).unwrap();
        assert_eq!(sq.to_string(), "25");
        assert_eq!("25\n".parse::<Square>().unwrap(), sq);

        assert!("8a".parse::<Square>().is_err());
        assert!("123".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
        assert!("90".parse::<Square>().is_err());
    }
}
