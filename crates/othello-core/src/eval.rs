//! Static position evaluation.
//!
//! The score is a weighted sum of five heuristics computed from the given
//! player's perspective: positional weights, coin parity, mobility (scaled
//! down as the game progresses), corner occupancy and corner closeness.

use crate::board::Board;
use crate::constants::BOARD_CELLS;
use crate::disc::Disc;
use crate::moves;
use crate::square::{Square, CORNERS, CORNER_NEIGHBOURS};
use crate::types::Score;

/// Positional weight per padded-grid cell. Corners dominate, the cells next
/// to them are liabilities, edges are mildly good and the interior is close
/// to neutral. Border cells carry zero and are never summed.
#[rustfmt::skip]
pub const POSITION_WEIGHTS: [i32; BOARD_CELLS] = [
    0,   0,   0,   0,   0,   0,   0,   0,   0, 0,
    0, 120, -20,  20,   5,   5,  20, -20, 120, 0,
    0, -20, -40,  -5,  -5,  -5,  -5, -40, -20, 0,
    0,  20,  -5,  15,   3,   3,  15,  -5,  20, 0,
    0,   5,  -5,   3,   3,   3,   3,  -5,   5, 0,
    0,   5,  -5,   3,   3,   3,   3,  -5,   5, 0,
    0,  20,  -5,  15,   3,   3,  15,  -5,  20, 0,
    0, -20, -40,  -5,  -5,  -5,  -5, -40, -20, 0,
    0, 120, -20,  20,   5,   5,  20, -20, 120, 0,
    0,   0,   0,   0,   0,   0,   0,   0,   0, 0,
];

/// Coefficients combining the five heuristic terms.
///
/// The values are empirically tuned constants, kept as configuration so they
/// can be swapped per test or retuned without touching the evaluator.
#[derive(Clone, Copy, Debug)]
pub struct EvalWeights {
    /// Multiplier for the coin-parity term.
    pub parity: f64,
    /// Multiplier for the stage-scaled mobility term.
    pub mobility: f64,
    /// Multiplier for the corner-occupancy term.
    pub corner_occupancy: f64,
    /// Multiplier for the corner-closeness term.
    pub corner_closeness: f64,
    /// Per-corner value of the occupancy difference.
    pub corner_occupancy_scale: f64,
    /// Per-cell value of the closeness difference; negative because sitting
    /// next to an open corner hands it to the opponent.
    pub corner_closeness_scale: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            parity: 10.0,
            mobility: 78.922,
            corner_occupancy: 801.724,
            corner_closeness: 382.026,
            corner_occupancy_scale: 25.0,
            corner_closeness_scale: -12.5,
        }
    }
}

/// Coarse game phase derived from the total disc count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStage {
    /// At most 20 discs on the board.
    Early = 1,
    /// 21 to 40 discs.
    Mid = 2,
    /// More than 40 discs.
    Late = 3,
}

impl GameStage {
    /// Classifies the board by its total disc count.
    pub fn of(board: &Board) -> GameStage {
        match board.total_discs() {
            0..=20 => GameStage::Early,
            21..=40 => GameStage::Mid,
            _ => GameStage::Late,
        }
    }

    /// Factor applied to the mobility term: mobility matters most early
    /// (factor 2) and not at all late (factor 0).
    pub fn mobility_scale(self) -> i32 {
        3 - self as i32
    }
}

/// Evaluates the position from `player`'s perspective.
///
/// Larger is better for `player`. The scale is unbounded in principle but
/// stays well inside the alpha-beta bounds of +/-10000 in practice.
pub fn evaluate(board: &Board, player: Disc, weights: &EvalWeights) -> Score {
    let opponent = player.opposite();

    let mut position = 0i32;
    let mut player_coins = 0i32;
    let mut opponent_coins = 0i32;
    for sq in Square::all() {
        let cell = board.get(sq);
        if cell == player {
            position += POSITION_WEIGHTS[sq.index()];
            player_coins += 1;
        } else if cell == opponent {
            position -= POSITION_WEIGHTS[sq.index()];
            opponent_coins += 1;
        }
    }

    let parity = if player_coins + opponent_coins != 0 {
        100 * (player_coins - opponent_coins) / (player_coins + opponent_coins)
    } else {
        0
    };

    let player_mobility = moves::num_legal_moves(board, player) as i32;
    let opponent_mobility = moves::num_legal_moves(board, opponent) as i32;
    let mobility = if player_mobility + opponent_mobility != 0 {
        100 * (player_mobility - opponent_mobility) / (player_mobility + opponent_mobility)
    } else {
        0
    };
    let mobility = GameStage::of(board).mobility_scale() * mobility;

    let occupancy_diff = {
        let mut diff = 0;
        for corner in CORNERS {
            if board.get(corner) == player {
                diff += 1;
            } else if board.get(corner) == opponent {
                diff -= 1;
            }
        }
        diff
    };
    let corner_occupancy = (weights.corner_occupancy_scale * f64::from(occupancy_diff)) as i32;

    let closeness_diff = {
        let mut diff = 0;
        for (corner, neighbours) in CORNER_NEIGHBOURS {
            if board.get(corner) != Disc::Empty {
                continue;
            }
            for cell in neighbours {
                if board.get(cell) == player {
                    diff += 1;
                } else if board.get(cell) == opponent {
                    diff -= 1;
                }
            }
        }
        diff
    };
    let corner_closeness = (weights.corner_closeness_scale * f64::from(closeness_diff)) as i32;

    (f64::from(position)
        + weights.parity * f64::from(parity)
        + weights.mobility * f64::from(mobility)
        + weights.corner_occupancy * f64::from(corner_occupancy)
        + weights.corner_closeness * f64::from(corner_closeness)) as Score
}
