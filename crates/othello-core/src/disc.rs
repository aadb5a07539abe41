//! Cell contents of the padded board grid.

/// Contents of a single board cell.
///
/// `Outer` marks the sentinel border ring of the padded grid; it is written
/// once at initialization and never again, which lets directional ray scans
/// terminate without bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disc {
    Empty,
    Black,
    White,
    Outer,
}

impl Disc {
    /// Converts the disc to its character representation.
    ///
    /// # Returns
    ///
    /// * `'.'` for `Disc::Empty`
    /// * `'b'` for `Disc::Black`
    /// * `'w'` for `Disc::White`
    /// * `'?'` for `Disc::Outer`
    pub fn to_char(self) -> char {
        match self {
            Disc::Empty => '.',
            Disc::Black => 'b',
            Disc::White => 'w',
            Disc::Outer => '?',
        }
    }

    /// Returns the opposing player colour.
    ///
    /// Calling this with anything other than `Black` or `White` is an
    /// illegal state; it is logged and answered with the `Empty` sentinel.
    pub fn opposite(self) -> Disc {
        match self {
            Disc::Black => Disc::White,
            Disc::White => Disc::Black,
            other => {
                tracing::error!(?other, "opposite() called with a non-player disc");
                Disc::Empty
            }
        }
    }

    /// True for the two player colours.
    pub fn is_player(self) -> bool {
        matches!(self, Disc::Black | Disc::White)
    }
}
