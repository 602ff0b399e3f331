//! Placement rules: where a route tile may go

use crate::board::{gate_edges, Coordinate, CENTER};
use crate::error::PlacementError;
use crate::game::Board;
use crate::tile::Tile;

/// Check a placement and say why it is illegal.
///
/// Used for direct player actions. Does not touch the board.
pub fn check_placement(board: &Board, coord: Coordinate, tile: &Tile) -> Result<(), PlacementError> {
    if !coord.is_valid() {
        return Err(PlacementError::OffBoard(coord));
    }
    if coord == CENTER {
        return Err(PlacementError::CenterReserved(coord));
    }
    if board.tile(coord).is_some() {
        return Err(PlacementError::Occupied(coord));
    }
    if let Some(gate) = coord.gate() {
        if blocks_exit(gate, tile) {
            return Err(PlacementError::BlocksExit { coord, gate });
        }
    }
    Ok(())
}

/// Boolean form for search and simulation callers
pub fn can_place(board: &Board, coord: Coordinate, tile: &Tile) -> bool {
    check_placement(board, coord, tile).is_ok()
}

/// A tile on a gate cell may not join the gate's two outward edges: a gem would leave
/// the board without ever reaching the gate.
pub fn blocks_exit(gate: usize, tile: &Tile) -> bool {
    let (a, b) = gate_edges(gate);
    tile.connects(a, b)
}
