//! Indigo CLI - Command-line interface
//!
//! Commands:
//! - simulate: Run a batch of random self-play games
//! - play: Play one random game and optionally save it
//! - replay: Step through a saved game
//! - config: Write a default game configuration

mod config_cmd;
mod play_cmd;
mod replay_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "indigo")]
#[command(about = "Indigo tile-laying game engine")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log filter (overrides RUST_LOG), e.g. "debug" or "indigo_core=debug"
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run random self-play games in parallel
    Simulate(simulate_cmd::SimulateArgs),
    /// Play a single random game
    Play(play_cmd::PlayArgs),
    /// Step through a saved game
    Replay(replay_cmd::ReplayArgs),
    /// Write a default configuration file
    Config(config_cmd::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Simulate(args) => simulate_cmd::run(args, cli.seed),
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Replay(args) => replay_cmd::run(args),
        Commands::Config(args) => config_cmd::run(args),
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
