//! Indigo Core - Rules engine for the Indigo tile-laying game
//!
//! This crate provides the core game logic:
//! - Board geometry (hex grid with axial coordinates, gates, treasure corners)
//! - Route tiles with rotation and gems resting on their edges
//! - Placement rules and gem propagation with collisions
//! - Gate scoring
//! - Undo/redo history and saved games

pub mod board;
pub mod pieces;
pub mod tile;
pub mod center;
pub mod error;
pub mod config;
pub mod placement;
pub mod propagation;
pub mod scoring;
pub mod game;
pub mod history;
pub mod session;
pub mod save;

// Re-exports for convenient access
pub use board::{Coordinate, opposite, all_cells, BOARD_RADIUS, CENTER, GATE_CELLS, TREASURE_CELLS};
pub use pieces::{Gem, GemColor, GemId, GateMode, GateToken, TokenColor, TOKEN_COLORS};
pub use tile::{Tile, TileType, ROUTE_TYPES};
pub use center::CenterPiece;
pub use error::{GameError, PlacementError};
pub use config::{GameConfig, PlayerConfig};
pub use propagation::{GemEvent, GemSource};
pub use game::{Board, GameState, GemCensus, Move, MoveOutcome, Player};
pub use history::History;
pub use session::Game;
pub use save::SavedGame;
