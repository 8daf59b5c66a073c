//! Interactive chess engine.
//!
//! Reads commands from stdin, plays moves on a board, and lets the search
//! reply. Diagnostics go to stderr through `tracing`; set `RUST_LOG` or pass
//! `--verbose` to see them.

mod command;
mod config;
mod session;

use anyhow::Context;
use chess_engine::Board;
use clap::Parser;
use config::EngineConfig;
use session::Session;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Play chess against an alpha-beta engine.
#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Play chess against an alpha-beta engine")]
struct Args {
    /// Search depth, overriding the config file
    #[arg(long)]
    depth: Option<u32>,

    /// Search time in milliseconds, overriding the config file
    #[arg(long)]
    time: Option<u64>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,

    /// Path to the engine config file
    #[arg(long, default_value = EngineConfig::FILE_NAME)]
    config: PathBuf,

    /// Log search diagnostics at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = EngineConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    if let Some(time) = args.time {
        config.max_time_ms = time;
    }
    config.validate().context("invalid search settings")?;

    let board = match &args.fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("invalid --fen '{}'", fen))?,
        None => Board::startpos(),
    };

    let limits = config.search_limits();
    debug!(
        max_depth = limits.max_depth,
        max_time = ?limits.max_time,
        max_nodes = ?limits.max_nodes,
        "search limits"
    );

    let stdin = std::io::stdin();
    let mut session = Session::new(stdin.lock(), std::io::stdout(), board, limits);
    session.run()?;
    info!("final position {}", session.board().serialize());
    Ok(())
}
