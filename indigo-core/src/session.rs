//! A running game: the live state plus its committed history

use crate::board::Coordinate;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{GameState, Move};
use crate::history::History;
use crate::propagation::GemEvent;

/// Owns the one live state callers interact with.
///
/// The live state may differ from the current snapshot only by the rotation of the
/// hand tile; everything else goes through a committed move.
#[derive(Clone, Debug)]
pub struct Game {
    live: GameState,
    history: History,
}

impl Game {
    pub fn start(config: &GameConfig) -> Result<Self, GameError> {
        let mut rng = config.rng();
        let state = GameState::new(config, &mut rng)?;
        Ok(Self::from_state(state))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            history: History::new(state.clone()),
            live: state,
        }
    }

    /// Resume at the history's cursor
    pub fn from_history(history: History) -> Self {
        Self {
            live: history.current().clone(),
            history,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.live
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.live.is_over()
    }

    pub fn rotate_hand_left(&mut self) -> Result<(), GameError> {
        self.live.rotate_hand_left()
    }

    pub fn rotate_hand_right(&mut self) -> Result<(), GameError> {
        self.live.rotate_hand_right()
    }

    pub fn check_placement(&self, coord: Coordinate) -> Result<(), GameError> {
        self.live.check_placement(coord)
    }

    pub fn can_place(&self, coord: Coordinate) -> bool {
        self.live.check_placement(coord).is_ok()
    }

    /// Place the hand tile as currently rotated and commit the result
    pub fn place(&mut self, coord: Coordinate) -> Result<Vec<GemEvent>, GameError> {
        let mut next = self.live.clone();
        let events = next.place(coord)?;
        Ok(self.commit(next, events))
    }

    /// Replay a move received as `(coordinate, rotation)` and commit it
    pub fn apply_move(&mut self, mv: Move) -> Result<Vec<GemEvent>, GameError> {
        let mut next = self.live.clone();
        let events = next.play(mv)?;
        Ok(self.commit(next, events))
    }

    fn commit(&mut self, next: GameState, events: Vec<GemEvent>) -> Vec<GemEvent> {
        let discarded = self.history.commit(next.clone());
        self.live = next;
        tracing::info!(
            ply = self.history.cursor(),
            discarded,
            events = events.len(),
            in_play = self.live.pool().len(),
            "move committed"
        );
        events
    }

    /// Step back one move. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(state) => {
                self.live = state.clone();
                tracing::info!(ply = self.history.cursor(), "undo");
                true
            }
            None => {
                tracing::info!("undo: already at the first move");
                false
            }
        }
    }

    /// Step forward one move. Returns false at the tip of history.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(state) => {
                self.live = state.clone();
                tracing::info!(ply = self.history.cursor(), "redo");
                true
            }
            None => {
                tracing::info!("redo: already at the latest move");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u64) -> Game {
        Game::start(&GameConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_place_commits() {
        let mut game = started(1);
        let mv = game.state().legal_moves()[0];
        game.apply_move(mv).unwrap();
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.state(), game.history().current());
    }

    #[test]
    fn test_illegal_place_commits_nothing() {
        let mut game = started(2);
        assert!(game.place(crate::board::CENTER).is_err());
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_undo_redo_restore_states() {
        let mut game = started(3);
        let before = game.state().clone();
        let mv = game.state().legal_moves()[10];
        game.apply_move(mv).unwrap();
        let after = game.state().clone();

        assert!(game.undo());
        assert_eq!(game.state(), &before);
        assert!(!game.undo());
        assert!(game.redo());
        assert_eq!(game.state(), &after);
        assert!(!game.redo());
    }

    #[test]
    fn test_rotation_not_recorded() {
        let mut game = started(4);
        game.rotate_hand_right().unwrap();
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.state().current_hand().unwrap().rotation(), 1);
        assert_eq!(game.history().current().current_hand().unwrap().rotation(), 0);
    }

    #[test]
    fn test_branch_discards_redo() {
        let mut game = started(5);
        for _ in 0..3 {
            let mv = game.state().legal_moves()[0];
            game.apply_move(mv).unwrap();
        }
        game.undo();
        game.undo();
        let mv = *game.state().legal_moves().last().unwrap();
        game.apply_move(mv).unwrap();
        assert_eq!(game.history().len(), 3);
        assert!(!game.redo());
    }
}
