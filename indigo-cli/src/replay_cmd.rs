//! Replay command - rewind a saved game and step through it move by move

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use indigo_core::Game;

#[derive(Args)]
pub struct ReplayArgs {
    /// Saved game JSON file
    #[arg(long, value_name = "FILE")]
    pub save: PathBuf,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let mut game = Game::load(&args.save)?;
    let saved_at = game.history().cursor();
    tracing::info!(snapshots = game.history().len(), cursor = saved_at, "loaded save");

    while game.undo() {}

    println!("=== Replay of {} ===", args.save.display());
    let mut ply = 0;
    loop {
        let before: Vec<u32> = game.state().players().iter().map(|p| p.score).collect();
        let mover = game.state().current_player();
        if !game.redo() {
            break;
        }
        ply += 1;

        let state = game.state();
        if let Err(e) = state.check_integrity() {
            bail!("integrity check failed after move {ply}: {e}");
        }
        let gained: Vec<String> = state
            .players()
            .iter()
            .zip(&before)
            .filter(|(p, b)| p.score > **b)
            .map(|(p, b)| format!("{} +{}", p.name, p.score - *b))
            .collect();
        println!(
            "{:>3}. player {} | in play {:>2} | lost {:>2}{}",
            ply,
            mover + 1,
            state.pool().len(),
            state.lost().len(),
            if gained.is_empty() { String::new() } else { format!(" | {}", gained.join(", ")) }
        );
    }

    let state = game.state();
    println!("\n{} moves, saved at move {}", ply, saved_at);
    for &index in &state.ranking() {
        if let Some(player) = state.player(index) {
            println!("{}: {} points", player.name, player.score);
        }
    }
    println!("Integrity: ok");
    Ok(())
}
