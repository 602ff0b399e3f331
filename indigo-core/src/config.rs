//! Game configuration: seats, gate layout and seeding

use crate::error::GameError;
use crate::pieces::{GateMode, TokenColor, TOKEN_COLORS};
use anyhow::Context;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: TokenColor,
}

impl PlayerConfig {
    pub fn new(name: impl Into<String>, color: TokenColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Everything needed to start a game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub players: Vec<PlayerConfig>,
    pub gate_mode: GateMode,
    /// Seed for the draw pile and start player. `None` draws from the OS.
    pub seed: Option<u64>,
    pub random_start_player: bool,
    pub shuffle_players: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: default_players(MIN_PLAYERS),
            gate_mode: GateMode::Separate,
            seed: None,
            random_start_player: false,
            shuffle_players: false,
        }
    }
}

fn default_players(count: usize) -> Vec<PlayerConfig> {
    TOKEN_COLORS
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, &color)| PlayerConfig::new(format!("Player {}", i + 1), color))
        .collect()
}

impl GameConfig {
    /// Replace the seats with `count` default players
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.players = default_players(count);
        self
    }

    pub fn with_players(mut self, players: Vec<PlayerConfig>) -> Self {
        self.players = players;
        self
    }

    pub fn with_gate_mode(mut self, mode: GateMode) -> Self {
        self.gate_mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_random_start(mut self, random: bool) -> Self {
        self.random_start_player = random;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let n = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(GameError::InvalidPlayerCount(n));
        }
        for (i, player) in self.players.iter().enumerate() {
            if self.players[..i].iter().any(|p| p.color == player.color) {
                return Err(GameError::DuplicateColor(format!("{:?}", player.color)));
            }
        }
        if self.gate_mode == GateMode::Shared && n < 3 {
            return Err(GameError::SharedGatesUnsupported(n));
        }
        Ok(())
    }

    /// RNG for setup, seeded when a seed is configured
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }
}
