//! Engine entry point: argument parsing, log-file setup and the referee
//! match loop. All diagnostics go to the log file; the referee connection
//! carries nothing but protocol lines.

mod referee;

use std::fs::File;
use std::io::{self, BufReader};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use othello_core::coordinator::{Coordinator, CoordinatorConfig};
use othello_core::disc::Disc;
use othello_core::eval::EvalWeights;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColourArg {
    Black,
    White,
}

#[derive(Parser, Debug)]
#[command(name = "othello-engine", about = "Distributed Othello move generator")]
struct Cli {
    /// Referee host. When absent the protocol runs over stdin/stdout.
    #[arg(long)]
    host: Option<String>,

    /// Referee port.
    #[arg(long)]
    port: Option<u16>,

    /// Per-move time budget in seconds; omitted means depth-limited only.
    #[arg(long)]
    time_limit: Option<u64>,

    /// Diagnostics log file.
    #[arg(long, default_value = "othello-engine.log")]
    log_file: PathBuf,

    /// Search worker threads; 0 runs the serial fallback.
    /// Defaults to one worker per CPU beyond the coordinator.
    #[arg(long)]
    workers: Option<usize>,

    /// Colour assigned by the tournament bootstrap; defaults to the
    /// first mover (black).
    #[arg(long, value_enum)]
    colour: Option<ColourArg>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(&args.log_file)?;

    let config = CoordinatorConfig {
        workers: args
            .workers
            .unwrap_or_else(|| num_cpus::get().saturating_sub(1)),
        move_time: args.time_limit.map(Duration::from_secs),
        weights: EvalWeights::default(),
    };
    let colour = match args.colour {
        Some(ColourArg::Black) => Disc::Black,
        Some(ColourArg::White) => Disc::White,
        None => Disc::Empty,
    };

    tracing::info!(?config, ?colour, "engine starting");
    let mut coordinator = Coordinator::new(colour, config);

    let outcome = match (&args.host, args.port) {
        (Some(host), Some(port)) => {
            let stream = TcpStream::connect((host.as_str(), port))
                .with_context(|| format!("cannot reach referee at {host}:{port}"))?;
            let reader = BufReader::new(stream.try_clone().context("cannot split referee stream")?);
            referee::run(reader, stream, &mut coordinator)
        }
        (None, None) => referee::run(io::stdin().lock(), io::stdout().lock(), &mut coordinator),
        _ => anyhow::bail!("--host and --port must be given together"),
    };

    coordinator.shutdown();
    outcome
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}
