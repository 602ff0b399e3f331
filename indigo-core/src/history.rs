//! Undo/redo history: an append-only list of snapshots plus a cursor

use crate::error::GameError;
use crate::game::GameState;

/// Committed game states, oldest first. `cursor` marks the one the game is at.
///
/// Snapshots are never modified once stored. Committing from anywhere but the tip
/// drops the snapshots after the cursor.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<GameState>,
    cursor: usize,
}

impl History {
    pub fn new(initial: GameState) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Rebuild from stored snapshots
    pub fn from_parts(snapshots: Vec<GameState>, cursor: usize) -> Result<Self, GameError> {
        if cursor >= snapshots.len() {
            return Err(GameError::Integrity(format!(
                "history cursor {cursor} out of range for {} snapshots",
                snapshots.len()
            )));
        }
        Ok(Self { snapshots, cursor })
    }

    pub fn current(&self) -> &GameState {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[GameState] {
        &self.snapshots
    }

    pub fn previous(&self) -> Option<&GameState> {
        self.cursor.checked_sub(1).map(|i| &self.snapshots[i])
    }

    pub fn next(&self) -> Option<&GameState> {
        self.snapshots.get(self.cursor + 1)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Append `state` after the cursor and move onto it. Returns how many forward
    /// snapshots were discarded.
    pub fn commit(&mut self, state: GameState) -> usize {
        let discarded = self.snapshots.len() - self.cursor - 1;
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state);
        self.cursor += 1;
        discarded
    }

    pub fn undo(&mut self) -> Option<&GameState> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&GameState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn into_parts(self) -> (Vec<GameState>, usize) {
        (self.snapshots, self.cursor)
    }
}
