//! Padded-grid Othello board representation.

use std::fmt;

use crate::constants::BOARD_CELLS;
use crate::disc::Disc;
use crate::square::Square;

/// An Othello board stored as a 10x10 padded grid.
///
/// The interior 8x8 cells hold `Empty`, `Black` or `White`; the surrounding
/// ring holds the immutable `Outer` sentinel. The board has plain value
/// semantics: every speculative line of search works on its own copy, so the
/// coordinator's authoritative board is never aliased by a search frame.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Disc; BOARD_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with the standard starting position: white on d4/e5,
    /// black on e4/d5, every other interior cell empty.
    pub fn new() -> Board {
        let mut cells = [Disc::Outer; BOARD_CELLS];
        for sq in Square::all() {
            cells[sq.index()] = Disc::Empty;
        }
        let mut board = Board { cells };
        board.put(Square::from_row_col(3, 3).unwrap(), Disc::White);
        board.put(Square::from_row_col(3, 4).unwrap(), Disc::Black);
        board.put(Square::from_row_col(4, 3).unwrap(), Disc::Black);
        board.put(Square::from_row_col(4, 4).unwrap(), Disc::White);
        board
    }

    /// Returns the disc at the given interior square.
    #[inline]
    pub fn get(&self, sq: Square) -> Disc {
        self.cells[sq.index()]
    }

    /// Places a disc on an interior square.
    #[inline]
    pub fn put(&mut self, sq: Square, disc: Disc) {
        self.cells[sq.index()] = disc;
    }

    /// Raw cell lookup used by the ray scans in the move engine. The `Outer`
    /// ring guarantees `index` stays in range while a scan walks a ray.
    #[inline]
    pub(crate) fn cell(&self, index: usize) -> Disc {
        self.cells[index]
    }

    /// Counts the interior cells holding the given disc.
    pub fn count(&self, disc: Disc) -> usize {
        Square::all().filter(|sq| self.get(*sq) == disc).count()
    }

    /// Total number of player discs on the board, which determines the
    /// game stage.
    pub fn total_discs(&self) -> usize {
        self.count(Disc::Black) + self.count(Disc::White)
    }
}

impl fmt::Display for Board {
    /// Renders the board for the diagnostic log, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   0 1 2 3 4 5 6 7")?;
        for row in 0..8 {
            write!(f, "{row}  ")?;
            for col in 0..8 {
                let sq = Square::from_row_col(row, col).unwrap();
                write!(f, "{} ", self.get(sq).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board:\n{self}")
    }
}
