//! Typed messages exchanged between the coordinator and its workers.

use std::time::Instant;

use crate::board::Board;
use crate::square::Square;
use crate::types::Score;

/// Command sent from the coordinator to a single worker.
#[derive(Clone, Debug)]
pub enum WorkerCommand {
    /// Barrier opening a move-generation cycle: the authoritative board
    /// snapshot every task of the cycle is searched against, plus the
    /// optional per-move deadline. Broadcast to every worker before any
    /// task is dispatched.
    StartCycle {
        board: Board,
        deadline: Option<Instant>,
    },
    /// One root move to search against the current cycle's board.
    Search(Square),
    /// The cycle is complete; return to the barrier wait.
    EndCycle,
    /// The match is over; exit the worker loop.
    Shutdown,
}

/// A worker's answer to a `Search` command.
#[derive(Clone, Copy, Debug)]
pub struct SearchReply {
    /// Index of the replying worker, so the coordinator can reissue work to
    /// the worker that just became idle.
    pub worker: usize,
    /// The root move that was searched.
    pub mv: Square,
    /// Minimax score for that move.
    pub score: Score,
}
