//! Master-side coordination of the distributed root-move search.
//!
//! Each move-generation cycle runs enumerate -> dispatch -> collect ->
//! select -> commit: the legal root moves are enumerated, the board snapshot
//! is broadcast to every worker as a barrier, one root move is handed to each
//! idle worker, and every incoming result immediately frees its worker for
//! the next unsent move (pull-based balancing, never static partitioning).
//! Once every root move has a score the workers get exactly one `EndCycle`
//! each and the best move is committed to the authoritative board.

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;

use crate::board::Board;
use crate::disc::Disc;
use crate::error::{EngineError, Result};
use crate::eval::{evaluate, EvalWeights};
use crate::message::{SearchReply, WorkerCommand};
use crate::moves::{self, MoveList};
use crate::search::{minimax, DepthPolicy, SearchLimits};
use crate::square::{ParseSquareError, Square};
use crate::types::Score;
use crate::worker;

/// A move as reported to (or received from) the referee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineMove {
    Place(Square),
    Pass,
}

impl fmt::Display for EngineMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineMove::Place(sq) => write!(f, "{sq}"),
            EngineMove::Pass => write!(f, "pass"),
        }
    }
}

impl FromStr for EngineMove {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim() == "pass" {
            Ok(EngineMove::Pass)
        } else {
            s.parse::<Square>().map(EngineMove::Place)
        }
    }
}

/// Configuration for a coordinator instance.
#[derive(Clone, Copy, Debug)]
pub struct CoordinatorConfig {
    /// Number of worker threads. Zero selects the serial fallback, where the
    /// coordinator searches every root move itself and no messages are sent.
    pub workers: usize,
    /// Per-move time budget, converted into a search deadline. `None` leaves
    /// the depth table as the only limit.
    pub move_time: Option<Duration>,
    /// Evaluator coefficients shared by master and workers.
    pub weights: EvalWeights,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        CoordinatorConfig {
            workers: 0,
            move_time: None,
            weights: EvalWeights::default(),
        }
    }
}

struct WorkerHandle {
    commands: Sender<WorkerCommand>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    fn send(&self, command: WorkerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::WorkerDisconnected)
    }
}

/// Owner of the authoritative board and of the worker pool.
///
/// The coordinator is strictly synchronous turn by turn: no move-generation
/// cycle overlaps another, and the only nondeterministic point is the order
/// in which worker replies arrive on the shared channel.
pub struct Coordinator {
    board: Board,
    colour: Disc,
    weights: EvalWeights,
    move_time: Option<Duration>,
    workers: Vec<WorkerHandle>,
    replies: Receiver<SearchReply>,
}

impl Coordinator {
    /// Spawns the worker pool and takes ownership of a fresh board.
    ///
    /// A colour that is not Black or White (the referee may leave the
    /// assignment empty) defaults to Black, the first mover. The colour is
    /// handed to every worker once, at spawn time.
    pub fn new(colour: Disc, config: CoordinatorConfig) -> Coordinator {
        let colour = if colour.is_player() {
            colour
        } else {
            tracing::warn!(?colour, "no colour assigned, defaulting to black");
            Disc::Black
        };

        let (reply_tx, replies) = channel::<SearchReply>();
        let workers = (0..config.workers)
            .map(|id| spawn_worker(id, colour, reply_tx.clone(), config.weights))
            .collect();

        Coordinator {
            board: Board::new(),
            colour,
            weights: config.weights,
            move_time: config.move_time,
            workers,
            replies,
        }
    }

    /// The authoritative board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The colour this engine plays.
    pub fn colour(&self) -> Disc {
        self.colour
    }

    /// Runs one full move-generation cycle and commits the chosen move.
    ///
    /// Returns `Pass` when no root move is legal. Fails only if a worker
    /// disappears mid-cycle, which is fatal to the match.
    pub fn generate_move(&mut self) -> Result<EngineMove> {
        let root_moves = moves::legal_moves(&self.board, self.colour);
        tracing::info!(
            colour = %self.colour.to_char(),
            candidates = root_moves.len(),
            "generating move"
        );

        if root_moves.is_empty() {
            // The cycle still opens and closes for every worker so none is
            // left waiting on a barrier that never completes.
            let deadline = self.move_deadline();
            for handle in &self.workers {
                handle.send(WorkerCommand::StartCycle {
                    board: self.board,
                    deadline,
                })?;
                handle.send(WorkerCommand::EndCycle)?;
            }
            return Ok(EngineMove::Pass);
        }

        let best = if self.workers.is_empty() {
            self.search_serial(&root_moves)
        } else {
            self.search_parallel(&root_moves)?
        };

        moves::apply(&mut self.board, best, self.colour);
        tracing::info!(
            mv = %best,
            eval = evaluate(&self.board, self.colour, &self.weights),
            "committed move\n{}", self.board
        );
        Ok(EngineMove::Place(best))
    }

    /// Applies the opponent's move to the authoritative board.
    pub fn apply_opponent_move(&mut self, mv: EngineMove) {
        match mv {
            EngineMove::Pass => tracing::info!("opponent passed"),
            EngineMove::Place(sq) => {
                moves::apply(&mut self.board, sq, self.colour.opposite());
                tracing::info!(mv = %sq, "opponent move applied\n{}", self.board);
            }
        }
    }

    /// Serial fallback: the coordinator scores every root move itself.
    fn search_serial(&self, root_moves: &MoveList) -> Square {
        let limits = SearchLimits::with_deadline(DepthPolicy::serial(), self.move_deadline());
        let results: Vec<(Square, Score)> = root_moves
            .iter()
            .map(|mv| (mv, minimax(mv, self.colour, &self.board, &limits, &self.weights)))
            .collect();
        select_best(&results)
    }

    /// Parallel cycle: barrier broadcast, corner-first dispatch, pull-based
    /// rebalancing, then a single termination message per worker.
    fn search_parallel(&self, root_moves: &MoveList) -> Result<Square> {
        let deadline = self.move_deadline();
        for handle in &self.workers {
            handle.send(WorkerCommand::StartCycle {
                board: self.board,
                deadline,
            })?;
        }

        let queue = prioritize_corners(root_moves);
        let mut next_unsent = 0;
        for handle in &self.workers {
            if next_unsent == queue.len() {
                break;
            }
            handle.send(WorkerCommand::Search(queue[next_unsent]))?;
            next_unsent += 1;
        }

        let mut results: Vec<(Square, Score)> = Vec::with_capacity(queue.len());
        while results.len() < queue.len() {
            let reply = self
                .replies
                .recv()
                .map_err(|_| EngineError::WorkerDisconnected)?;
            tracing::debug!(worker = reply.worker, mv = %reply.mv, score = reply.score, "result");
            results.push((reply.mv, reply.score));

            // Keep the worker that just replied busy.
            if next_unsent < queue.len() {
                self.workers[reply.worker].send(WorkerCommand::Search(queue[next_unsent]))?;
                next_unsent += 1;
            }
        }

        // Every outstanding result is in; only now may the cycle close.
        for handle in &self.workers {
            handle.send(WorkerCommand::EndCycle)?;
        }

        Ok(select_best(&results))
    }

    fn move_deadline(&self) -> Option<Instant> {
        self.move_time.map(|budget| Instant::now() + budget)
    }

    /// Stops the worker pool. Safe to call more than once.
    pub fn shutdown(&mut self) {
        for handle in &mut self.workers {
            let _ = handle.commands.send(WorkerCommand::Shutdown);
        }
        for handle in &mut self.workers {
            if let Some(thread) = handle.thread.take() {
                let _ = thread.join();
            }
        }
        self.workers.clear();
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_worker(
    id: usize,
    colour: Disc,
    replies: Sender<SearchReply>,
    weights: EvalWeights,
) -> WorkerHandle {
    let (commands, command_rx) = channel::<WorkerCommand>();
    let thread = std::thread::Builder::new()
        .name(format!("search-worker-{id}"))
        .spawn(move || worker::run(id, colour, command_rx, replies, weights))
        .expect("failed to spawn search worker");
    WorkerHandle {
        commands,
        thread: Some(thread),
    }
}

/// Dispatch order for the root moves: corners first, otherwise the original
/// scan order. A legal corner is strictly dominant, so it must reach a worker
/// before any non-corner move takes the slot.
pub fn prioritize_corners(root_moves: &MoveList) -> Vec<Square> {
    let mut queue: Vec<Square> = root_moves.iter().filter(|sq| sq.is_corner()).collect();
    queue.extend(root_moves.iter().filter(|sq| !sq.is_corner()));
    queue
}

/// Picks the winning root move: strictly greatest score, ties resolved to the
/// lowest square index so the choice does not depend on arrival order.
pub fn select_best(results: &[(Square, Score)]) -> Square {
    debug_assert!(!results.is_empty());
    let mut best = results[0];
    for &(mv, score) in &results[1..] {
        if score > best.1 || (score == best.1 && mv.index() < best.0.index()) {
            best = (mv, score);
        }
    }
    best.0
}

/// Uniformly random legal move, the fallback strategy when search is not
/// wanted. Returns `None` when the player must pass.
pub fn random_move(board: &Board, colour: Disc) -> Option<Square> {
    let list = moves::legal_moves(board, colour);
    list.as_slice().choose(&mut rand::thread_rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::from_row_col(row, col).unwrap()
    }

    /// Board where black may take the bottom-right corner or play any of the
    /// ordinary openings, all of which precede the corner in scan order.
    fn corner_position() -> Board {
        let mut board = Board::new();
        board.put(sq(7, 6), Disc::White);
        board.put(sq(7, 5), Disc::Black);
        board
    }

    #[test]
    fn test_engine_move_codec() {
        assert_eq!(EngineMove::Pass.to_string(), "pass");
        assert_eq!("pass\n".parse::<EngineMove>().unwrap(), EngineMove::Pass);

        let mv = EngineMove::Place(sq(0, 0));
        assert_eq!(mv.to_string(), "00");
        assert_eq!("00".parse::<EngineMove>().unwrap(), mv);
        assert!("xx".parse::<EngineMove>().is_err());
    }

    #[test]
    fn test_corner_moves_are_dispatched_first() {
        let board = corner_position();
        let root_moves = moves::legal_moves(&board, Disc::Black);
        assert!(root_moves.contains(sq(7, 7)));
        // The corner is last in scan order but must lead the dispatch queue.
        assert_eq!(*root_moves.as_slice().last().unwrap(), sq(7, 7));
        assert!(root_moves.len() > 1);

        let queue = prioritize_corners(&root_moves);
        assert_eq!(queue[0], sq(7, 7));
        assert_eq!(queue.len(), root_moves.len());
        // The non-corner tail keeps the scan order.
        let tail: Vec<Square> = root_moves.iter().filter(|m| !m.is_corner()).collect();
        assert_eq!(&queue[1..], tail.as_slice());
    }

    #[test]
    fn test_select_best_prefers_lowest_index_on_ties() {
        let a = sq(0, 3);
        let b = sq(2, 1);
        let c = sq(5, 5);
        assert_eq!(select_best(&[(b, 40), (c, 40), (a, 40)]), a);
        assert_eq!(select_best(&[(b, 40), (c, 90), (a, 40)]), c);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let serial_cfg = CoordinatorConfig::default();
        let parallel_cfg = CoordinatorConfig {
            workers: 3,
            ..CoordinatorConfig::default()
        };

        let mut serial = Coordinator::new(Disc::Black, serial_cfg);
        let mut parallel = Coordinator::new(Disc::Black, parallel_cfg);

        let serial_move = serial.generate_move().unwrap();
        let parallel_move = parallel.generate_move().unwrap();
        assert_eq!(serial_move, parallel_move);
        assert_eq!(serial.board(), parallel.board());
    }

    #[test]
    fn test_pass_cycle_keeps_workers_alive() {
        let mut coordinator = Coordinator::new(
            Disc::Black,
            CoordinatorConfig {
                workers: 2,
                ..CoordinatorConfig::default()
            },
        );
        // No legal move on a board with no empty cell.
        let mut board = Board::new();
        for cell in Square::all() {
            board.put(cell, Disc::Black);
        }
        coordinator.board = board;

        assert_eq!(coordinator.generate_move().unwrap(), EngineMove::Pass);
        // Workers survive the pass cycle and complete the next one.
        coordinator.board = corner_position();
        assert!(matches!(
            coordinator.generate_move().unwrap(),
            EngineMove::Place(_)
        ));
        coordinator.shutdown();
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut coordinator = Coordinator::new(
            Disc::Black,
            CoordinatorConfig {
                workers: 2,
                ..CoordinatorConfig::default()
            },
        );
        let _ = coordinator.generate_move().unwrap();
        coordinator.shutdown();
        coordinator.shutdown();
    }

    #[test]
    fn test_colour_defaults_to_black() {
        let coordinator = Coordinator::new(Disc::Empty, CoordinatorConfig::default());
        assert_eq!(coordinator.colour(), Disc::Black);
    }

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::new();
        for _ in 0..16 {
            let mv = random_move(&board, Disc::Black).unwrap();
            assert!(moves::is_legal(&board, mv, Disc::Black));
        }

        let mut full = Board::new();
        for cell in Square::all() {
            full.put(cell, Disc::Black);
        }
        assert!(random_move(&full, Disc::White).is_none());
    }
}
