//! Depth-limited minimax with alpha-beta pruning.
//!
//! Every search call operates on private board copies; the caller's board is
//! never mutated. Evaluation is always taken from the root mover's
//! perspective, including at minimizing layers: this is plain minimax over a
//! single evaluation function, not negamax. See DESIGN.md.

use std::time::Instant;

use crate::board::Board;
use crate::constants::SCORE_INF;
use crate::disc::Disc;
use crate::eval::{evaluate, EvalWeights};
use crate::moves;
use crate::square::Square;
use crate::types::{Depth, Score};

/// Maps root mobility to a depth budget.
///
/// Fewer legal moves mean a cheaper branching factor, so the search goes
/// deeper. The fallback (mobility below 3) is the one entry that differs
/// between the serial and parallel engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthPolicy {
    /// Depth used when fewer than 3 root moves are available.
    pub fallback: Depth,
}

impl DepthPolicy {
    /// Policy for the multi-worker engine.
    pub fn parallel() -> DepthPolicy {
        DepthPolicy { fallback: 7 }
    }

    /// Policy for the single-process engine, which evaluates immediately
    /// when mobility is very low.
    pub fn serial() -> DepthPolicy {
        DepthPolicy { fallback: 0 }
    }

    /// Depth budget for a position with `mobility` legal root moves.
    pub fn depth_for(&self, mobility: usize) -> Depth {
        match mobility {
            3..=7 => 6,
            8..=14 => 5,
            m if m >= 15 => 4,
            _ => self.fallback,
        }
    }
}

/// Limits applied to a single search call.
///
/// The depth table is a static proxy for the per-move time budget; when a
/// real deadline is supplied it takes precedence, cutting the search off by
/// returning static evaluations once the deadline has passed.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    pub policy: DepthPolicy,
    pub deadline: Option<Instant>,
}

impl SearchLimits {
    pub fn new(policy: DepthPolicy) -> SearchLimits {
        SearchLimits {
            policy,
            deadline: None,
        }
    }

    pub fn with_deadline(policy: DepthPolicy, deadline: Option<Instant>) -> SearchLimits {
        SearchLimits { policy, deadline }
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Scores one root move for `colour` on `board`.
///
/// The depth budget is derived from the mobility of the side to move; the
/// move itself is applied inside [`alpha_beta`]. `mv` must be legal for
/// `colour` on `board`.
pub fn minimax(
    mv: Square,
    colour: Disc,
    board: &Board,
    limits: &SearchLimits,
    weights: &EvalWeights,
) -> Score {
    let mobility = moves::num_legal_moves(board, colour);
    let depth = limits.policy.depth_for(mobility);
    alpha_beta(mv, -SCORE_INF, SCORE_INF, colour, colour, depth, board, limits, weights)
}

/// Alpha-beta search over the opponent's replies to `move_made`.
///
/// `colour` is the player making `move_made`; `root_colour` is the player the
/// whole search is scoring for. Maximizing layers (where `colour` equals the
/// root colour) raise `alpha`, minimizing layers lower `beta`, and iteration
/// stops on the standard `alpha >= beta` cutoff. A node with no opponent
/// replies is terminal and evaluates immediately; there is no forced-pass
/// recursion.
#[allow(clippy::too_many_arguments)]
pub fn alpha_beta(
    move_made: Square,
    mut alpha: Score,
    mut beta: Score,
    colour: Disc,
    root_colour: Disc,
    depth: Depth,
    board: &Board,
    limits: &SearchLimits,
    weights: &EvalWeights,
) -> Score {
    // Copy-on-enter: speculative moves never touch the caller's board.
    let mut position = *board;
    moves::apply(&mut position, move_made, colour);

    if depth == 0 || limits.expired() {
        return evaluate(&position, root_colour, weights);
    }

    let opponent = colour.opposite();
    let replies = moves::legal_moves(&position, opponent);
    if replies.is_empty() {
        return evaluate(&position, root_colour, weights);
    }

    for reply in replies.iter() {
        let result = alpha_beta(
            reply,
            alpha,
            beta,
            opponent,
            root_colour,
            depth - 1,
            &position,
            limits,
            weights,
        );
        if colour == root_colour {
            alpha = alpha.max(result);
        } else {
            beta = beta.min(result);
        }
        if alpha >= beta {
            break;
        }
    }

    if colour == root_colour {
        alpha
    } else {
        beta
    }
}
