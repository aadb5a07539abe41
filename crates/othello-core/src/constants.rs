//! Global constants

use crate::types::Score;

/// Number of cells in the padded board grid (10x10).
pub const BOARD_CELLS: usize = 100;

/// Width of the padded grid, including the sentinel border columns.
pub const GRID_WIDTH: usize = 10;

/// Index offsets for the eight ray directions on the padded grid.
pub const ALL_DIRECTIONS: [i32; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];

/// Maximum number of legal moves in any reachable position.
pub const MAX_LEGAL_MOVES: usize = 34;

/// Infinity score used as the initial alpha-beta bounds.
pub const SCORE_INF: Score = 10_000;
