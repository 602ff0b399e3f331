//! Simulate command - batches of random self-play games
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_batch() from the library
//! - Level 3: report formatting

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use indigo_cli::{run_batch, summarize, BatchSummary};
use indigo_core::{GameConfig, GateMode};

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of players (2-4)
    #[arg(long, default_value = "2")]
    pub players: usize,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Use shared gates (3 or 4 players)
    #[arg(long)]
    pub shared_gates: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let mode = if args.shared_gates { GateMode::Shared } else { GateMode::Separate };
    let config = GameConfig::default()
        .with_player_count(args.players)
        .with_gate_mode(mode);
    config.validate()?;
    let base_seed = seed.unwrap_or_else(rand::random);

    tracing::info!(
        players = args.players,
        games = args.games,
        base_seed,
        gate_mode = ?mode,
        "starting simulation"
    );

    let progress = ProgressBar::new(args.games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} games ({eta})")?
            .progress_chars("=> "),
    );
    let records = run_batch(&config, args.games, base_seed, |_| progress.inc(1))?;
    progress.finish_and_clear();

    let summary = summarize(&records, args.players);
    if args.json {
        #[derive(serde::Serialize)]
        struct JsonOutput<'a> {
            base_seed: u64,
            summary: &'a BatchSummary,
            games: &'a [indigo_cli::GameRecord],
        }
        let output = JsonOutput { base_seed, summary: &summary, games: &records };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text_summary(&summary, base_seed);
    }
    Ok(())
}

fn print_text_summary(summary: &BatchSummary, base_seed: u64) {
    println!("\n=== Simulation Results ===");
    println!("Games:      {} (base seed {})", summary.games, base_seed);
    for (seat, (wins, avg)) in summary.wins.iter().zip(&summary.avg_scores).enumerate() {
        let rate = if summary.games > 0 {
            100.0 * *wins as f32 / summary.games as f32
        } else {
            0.0
        };
        println!("Player {}:   {} wins ({:.1}%), avg score {:.2}", seat + 1, wins, rate, avg);
    }
    println!("Ties:       {}", summary.ties);
    println!("Avg moves:  {:.1}", summary.avg_moves);
    println!("Avg collisions: {:.2} ({:.2} gems lost)", summary.avg_collisions, summary.avg_gems_lost);
}
