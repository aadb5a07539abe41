//! Legality testing, flip computation and move application.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::constants::{ALL_DIRECTIONS, MAX_LEGAL_MOVES};
use crate::disc::Disc;
use crate::square::Square;

/// Ordered list of legal moves for one player at one board snapshot.
///
/// Always computed fresh from a board; legality can change after any move
/// application, so a list must never outlive the position it was built from.
/// The squares appear in increasing index order (top-left to bottom-right),
/// which fixes the tie-break order when scores are equal.
#[derive(Clone, Debug, Default)]
pub struct MoveList {
    moves: ArrayVec<Square, MAX_LEGAL_MOVES>,
}

impl MoveList {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves.iter().copied()
    }

    pub fn as_slice(&self) -> &[Square] {
        &self.moves
    }

    pub fn contains(&self, sq: Square) -> bool {
        self.moves.contains(&sq)
    }
}

/// Steps a padded-grid index one cell along a ray direction.
#[inline]
fn step(index: usize, dir: i32) -> usize {
    (index as i32 + dir) as usize
}

/// Walks along `dir` over a run of opponent discs starting at `start`.
///
/// Returns the index of the bracketing piece if the run is terminated by one
/// of `player`'s own discs, `None` if it ends on an empty cell or the outer
/// ring.
fn find_bracket(board: &Board, start: usize, dir: i32, player: Disc) -> Option<usize> {
    let opponent = player.opposite();
    let mut index = start;
    while board.cell(index) == opponent {
        index = step(index, dir);
    }
    if board.cell(index) == player {
        Some(index)
    } else {
        None
    }
}

/// Returns the bracketing piece for `sq` along `dir`, if placing `player`
/// there would flip at least one opponent disc in that direction.
fn would_flip(board: &Board, sq: Square, dir: i32, player: Disc) -> Option<usize> {
    let adjacent = step(sq.index(), dir);
    if board.cell(adjacent) == player.opposite() {
        find_bracket(board, step(adjacent, dir), dir, player)
    } else {
        None
    }
}

/// True iff `player` may move at `sq`: the cell is empty and at least one
/// ray direction brackets an opponent run.
pub fn is_legal(board: &Board, sq: Square, player: Disc) -> bool {
    board.get(sq) == Disc::Empty
        && ALL_DIRECTIONS
            .iter()
            .any(|&dir| would_flip(board, sq, dir, player).is_some())
}

/// Collects every legal move for `player`, scanning the interior cells in
/// increasing index order.
pub fn legal_moves(board: &Board, player: Disc) -> MoveList {
    let mut list = MoveList::default();
    for sq in Square::all() {
        if is_legal(board, sq, player) {
            list.moves.push(sq);
        }
    }
    list
}

/// Counts `player`'s legal moves without materializing the list. Used by the
/// mobility term of the evaluator; does not mutate the board.
pub fn num_legal_moves(board: &Board, player: Disc) -> usize {
    Square::all()
        .filter(|&sq| is_legal(board, sq, player))
        .count()
}

/// Applies a legal move in place: places `player`'s disc on `sq` and flips
/// every bracketed opponent run. Flipping is unconditional given legality;
/// callers operate on disposable copies, so no undo state is kept.
pub fn apply(board: &mut Board, sq: Square, player: Disc) {
    board.put(sq, player);
    for &dir in &ALL_DIRECTIONS {
        if let Some(bracket) = would_flip(board, sq, dir, player) {
            let mut index = step(sq.index(), dir);
            while index != bracket {
                debug_assert!(board.cell(index) == player.opposite());
                // Flip via the raw index: every cell between sq and the
                // bracket is interior by construction.
                let flipped = Square::from_index(index).unwrap();
                board.put(flipped, player);
                index = step(index, dir);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::from_row_col(row, col).unwrap()
    }

    #[test]
    fn test_opening_moves() {
        // Black's four standard openings, each flipping exactly one disc.
        let board = Board::new();
        let list = legal_moves(&board, Disc::Black);
        let expected = [sq(2, 3), sq(3, 2), sq(4, 5), sq(5, 4)];
        assert_eq!(list.as_slice(), &expected);

        for mv in list.iter() {
            let mut next = board;
            apply(&mut next, mv, Disc::Black);
            assert_eq!(next.count(Disc::Black), 4); // placed one, flipped one
            assert_eq!(next.count(Disc::White), 1);
        }
    }

    #[test]
    fn test_legal_moves_are_sorted_and_legal() {
        let board = Board::new();
        for player in [Disc::Black, Disc::White] {
            let list = legal_moves(&board, player);
            assert!(list
                .as_slice()
                .windows(2)
                .all(|w| w[0].index() < w[1].index()));
            for mv in list.iter() {
                assert!(is_legal(&board, mv, player));
            }
        }
    }

    #[test]
    fn test_occupied_cell_is_illegal() {
        let board = Board::new();
        assert!(!is_legal(&board, sq(3, 3), Disc::Black));
        assert!(!is_legal(&board, sq(3, 4), Disc::White));
    }

    #[test]
    fn test_apply_conserves_discs() {
        let board = Board::new();
        for mv in legal_moves(&board, Disc::Black).iter() {
            let mut next = board;
            apply(&mut next, mv, Disc::Black);

            // One empty cell filled, opponent discs converted, total conserved.
            assert_eq!(next.count(Disc::Empty), board.count(Disc::Empty) - 1);
            assert_eq!(next.total_discs(), board.total_discs() + 1);
            assert!(next.count(Disc::Black) >= board.count(Disc::Black) + 2);
            assert!(next.count(Disc::White) < board.count(Disc::White));

            // The same move is never legal twice.
            assert!(!is_legal(&next, mv, Disc::Black));
            assert!(!is_legal(&next, mv, Disc::White));
        }
    }

    #[test]
    fn test_flip_after_move_sequence() {
        let mut board = Board::new();
        apply(&mut board, sq(2, 3), Disc::Black);
        apply(&mut board, sq(2, 2), Disc::White);

        let list = legal_moves(&board, Disc::Black);
        assert!(list.contains(sq(2, 1)));
        let mut next = board;
        apply(&mut next, sq(2, 1), Disc::Black);
        assert_eq!(next.get(sq(2, 2)), Disc::Black);
    }

    #[test]
    fn test_num_legal_moves_matches_list() {
        let mut board = Board::new();
        apply(&mut board, sq(2, 3), Disc::Black);
        for player in [Disc::Black, Disc::White] {
            assert_eq!(
                num_legal_moves(&board, player),
                legal_moves(&board, player).len()
            );
        }
    }

    #[test]
    fn test_edge_run_without_bracket_is_illegal() {
        // A run that reaches the outer ring without a bracketing disc.
        let mut board = Board::new();
        board.put(sq(0, 1), Disc::White);
        board.put(sq(0, 2), Disc::White);
        // No black disc beyond the run: 00 must stay illegal for black
        // in the horizontal direction (and every other).
        assert!(!is_legal(&board, sq(0, 0), Disc::Black));
    }
}
