//! Play command - one random game, optionally saved with its full history

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use indigo_cli::play_random_game;
use indigo_core::GameConfig;

#[derive(Args)]
pub struct PlayArgs {
    /// Game configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of players when no config file is given
    #[arg(long, default_value = "2")]
    pub players: usize,

    /// Save the game; without a file name a timestamped name is used
    #[arg(long, value_name = "FILE")]
    pub save: Option<Option<PathBuf>>,
}

pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default().with_player_count(args.players),
    };
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);

    let (game, record) = play_random_game(&config, 1, seed, true)?;
    let state = game.state();

    println!("\n=== Game Over (seed {}) ===", seed);
    println!("Moves: {}, collisions: {}, gems lost: {}", record.moves, record.collisions, record.gems_lost);
    for (place, &index) in state.ranking().iter().enumerate() {
        if let Some(player) = state.player(index) {
            println!(
                "{}. {} ({:?}): {} points, {} gems",
                place + 1,
                player.name,
                player.color,
                player.score,
                player.collected.len()
            );
        }
    }

    if let Some(target) = args.save {
        let path = target.unwrap_or_else(default_save_path);
        game.save(&path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn default_save_path() -> PathBuf {
    PathBuf::from(format!("indigo-{}.json", chrono::Local::now().format("%Y%m%d-%H%M%S")))
}
