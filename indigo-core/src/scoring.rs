//! Gate scoring

use crate::board::{gate_edges, Coordinate};
use crate::error::GameError;
use crate::game::GameState;
use crate::propagation::GemEvent;

/// Award any gems resting on the outward edges of a gate cell.
///
/// Each outward edge is aligned with one of the gate's two token slots: edge `gate`
/// with slot `2 * gate`, edge `gate + 1` with slot `2 * gate + 1`. The gem on an edge
/// goes to the player owning the token on that side, so a gate whose tokens match
/// hands everything to one player. A token nobody plays leaves its gem on the board.
pub fn resolve_gate(
    state: &mut GameState,
    coord: Coordinate,
    events: &mut Vec<GemEvent>,
) -> Result<(), GameError> {
    let Some(gate) = coord.gate() else {
        return Ok(());
    };
    let (first, second) = gate_edges(gate);

    for (slot, position) in [(2 * gate, first), (2 * gate + 1, second)] {
        let Some(tile) = state.board.tile(coord) else {
            return Ok(());
        };
        if tile.gem_at(position).is_none() {
            continue;
        }
        let Some(token) = state.board.gate_token(slot) else {
            continue;
        };
        let Some(player) = state.players.iter().position(|p| p.color == token.color) else {
            continue;
        };

        let gem = state
            .board
            .tile_mut(coord)
            .and_then(|tile| tile.take_gem(position))
            .ok_or_else(|| GameError::Integrity(format!("gem vanished from {coord} edge {position}")))?;
        state.retire(gem)?;
        let points = state.players[player].collect(gem);

        tracing::debug!(gate, player, points, gem = ?gem.id, "gem scored");
        events.push(GemEvent::Scored {
            gem,
            player,
            points,
            gate,
        });
    }
    Ok(())
}

/// Score a single cell outside of propagation, returning what happened
pub fn score_cell(state: &mut GameState, coord: Coordinate) -> Result<Vec<GemEvent>, GameError> {
    let mut events = Vec::new();
    resolve_gate(state, coord, &mut events)?;
    Ok(events)
}
