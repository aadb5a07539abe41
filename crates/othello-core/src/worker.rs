//! Worker-side receive-compute-reply loop.

use std::sync::mpsc::{Receiver, Sender};

use crate::board::Board;
use crate::disc::Disc;
use crate::eval::EvalWeights;
use crate::message::{SearchReply, WorkerCommand};
use crate::search::{minimax, DepthPolicy, SearchLimits};

/// Runs one worker until `Shutdown` arrives or a channel closes.
///
/// The worker blocks on its command channel; all computation is synchronous.
/// A `StartCycle` barrier installs the board snapshot (and deadline) that
/// every subsequent `Search` command of that cycle is evaluated against.
pub(crate) fn run(
    id: usize,
    colour: Disc,
    commands: Receiver<WorkerCommand>,
    replies: Sender<SearchReply>,
    weights: EvalWeights,
) {
    let mut cycle: Option<(Board, SearchLimits)> = None;

    loop {
        let command = match commands.recv() {
            Ok(command) => command,
            // Coordinator gone; nothing left to compute for.
            Err(_) => break,
        };

        match command {
            WorkerCommand::StartCycle { board, deadline } => {
                cycle = Some((
                    board,
                    SearchLimits::with_deadline(DepthPolicy::parallel(), deadline),
                ));
            }
            WorkerCommand::Search(mv) => {
                let Some((board, limits)) = cycle.as_ref() else {
                    tracing::error!(worker = id, %mv, "task received before cycle barrier");
                    continue;
                };
                let score = minimax(mv, colour, board, limits, &weights);
                tracing::debug!(worker = id, %mv, score, "search task done");
                if replies.send(SearchReply { worker: id, mv, score }).is_err() {
                    break;
                }
            }
            WorkerCommand::EndCycle => {
                cycle = None;
            }
            WorkerCommand::Shutdown => {
                tracing::debug!(worker = id, "shutting down");
                break;
            }
        }
    }
}
