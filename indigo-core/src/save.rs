//! Saved games: the whole history, oldest snapshot first

use crate::error::GameError;
use crate::game::GameState;
use crate::history::History;
use crate::session::Game;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedGame {
    pub format_version: u32,
    /// Index of the live snapshot
    pub cursor: usize,
    pub snapshots: Vec<GameState>,
}

impl SavedGame {
    pub fn from_game(game: &Game) -> Self {
        let history = game.history();
        Self {
            format_version: FORMAT_VERSION,
            cursor: history.cursor(),
            snapshots: history.snapshots().to_vec(),
        }
    }

    /// Check everything a loaded file could get wrong before it is trusted
    pub fn validate(&self) -> Result<(), GameError> {
        if self.format_version != FORMAT_VERSION {
            return Err(GameError::Integrity(format!(
                "unsupported save format {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }
        if self.cursor >= self.snapshots.len() {
            return Err(GameError::Integrity(format!(
                "cursor {} out of range for {} snapshots",
                self.cursor,
                self.snapshots.len()
            )));
        }
        for (i, snapshot) in self.snapshots.iter().enumerate() {
            snapshot
                .check_integrity()
                .map_err(|e| GameError::Integrity(format!("snapshot {i}: {e}")))?;
        }
        Ok(())
    }

    pub fn into_game(self) -> Result<Game, GameError> {
        self.validate()?;
        let history = History::from_parts(self.snapshots, self.cursor)?;
        Ok(Game::from_history(history))
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let saved: Self = serde_json::from_str(json).context("parsing saved game")?;
        if let Err(e) = saved.validate() {
            tracing::warn!(error = %e, "saved game failed validation");
            return Err(e.into());
        }
        Ok(saved)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("writing save {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading save {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("loading save {}", path.display()))
    }
}

impl Game {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        SavedGame::from_game(self).save(path)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Ok(SavedGame::load(path)?.into_game()?)
    }
}
