//! Referee line protocol.
//!
//! One command per line: `gen_move` requests a move for our colour,
//! `play_move <mv>` delivers the opponent's move, `game_over` ends the
//! match. Moves are two ASCII digits (row then column, 0-based, `"00"` is
//! the top-left corner) or the literal `pass`, newline terminated.
//!
//! A malformed or unknown command is logged and skipped for one cycle; a
//! transport failure ends the engine's participation in the match.

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use othello_core::coordinator::{Coordinator, EngineMove};

enum Command {
    GenMove,
    PlayMove(String),
    GameOver,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    match parts.next().unwrap_or("") {
        "gen_move" => Command::GenMove,
        "play_move" => Command::PlayMove(parts.next().unwrap_or("").trim().to_string()),
        "game_over" => Command::GameOver,
        other => Command::Unknown(other.to_string()),
    }
}

/// Runs the match loop until `game_over` or a transport failure.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    coordinator: &mut Coordinator,
) -> anyhow::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = input
            .read_line(&mut line)
            .context("failed to read referee command")?;
        if bytes == 0 {
            bail!("referee connection closed before game_over");
        }

        match parse_command(&line) {
            Command::GenMove => {
                let mv = coordinator
                    .generate_move()
                    .context("search worker pool failed")?;
                writeln!(output, "{mv}")
                    .and_then(|_| output.flush())
                    .context("failed to send move to referee")?;
            }
            Command::PlayMove(text) => match text.parse::<EngineMove>() {
                Ok(mv) => coordinator.apply_opponent_move(mv),
                Err(err) => tracing::warn!(%err, "ignoring malformed opponent move"),
            },
            Command::GameOver => {
                tracing::info!("game over");
                return Ok(());
            }
            Command::Unknown(command) => {
                tracing::warn!(command, "ignoring unknown referee command");
            }
        }
    }
}
