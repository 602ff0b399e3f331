//! Config command - write a starting configuration file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use indigo_core::{GameConfig, GateMode};

#[derive(Args)]
pub struct ConfigArgs {
    /// Where to write the configuration
    #[arg(long, value_name = "FILE", default_value = "indigo.json")]
    pub output: PathBuf,

    /// Number of players (2-4)
    #[arg(long, default_value = "2")]
    pub players: usize,

    /// Use shared gates (3 or 4 players)
    #[arg(long)]
    pub shared_gates: bool,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let mut config = GameConfig::default().with_player_count(args.players);
    if args.shared_gates {
        config = config.with_gate_mode(GateMode::Shared);
    }
    config.validate()?;
    config.save(&args.output)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
