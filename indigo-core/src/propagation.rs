//! Gem propagation after a tile placement.
//!
//! Gems are *pulled*: a tile takes the gem sitting on a neighbour's facing edge, routes
//! it along its own path and offers it to the next tile in line. The chain is driven
//! from an explicit stack, one step per tile boundary, so partial chains are easy to
//! observe and recursion depth never depends on board contents.

use crate::board::{opposite, Coordinate, CELL_COUNT, CENTER};
use crate::error::GameError;
use crate::game::GameState;
use crate::pieces::Gem;
use crate::scoring;
use serde::{Deserialize, Serialize};

/// Where a moving gem came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GemSource {
    Center,
    Tile(Coordinate),
}

/// Something that happened to a gem during one placement, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GemEvent {
    /// `gem` now rests on the tile at `to`, edge `position`
    Moved {
        gem: Gem,
        from: GemSource,
        to: Coordinate,
        position: u8,
    },
    /// Two gems met on the boundary of `at` and were both removed from play
    Collision { gems: [Gem; 2], at: Coordinate },
    /// `gem` reached gate `gate` and was collected by `player`
    Scored {
        gem: Gem,
        player: usize,
        points: u32,
        gate: usize,
    },
}

impl GemEvent {
    pub fn is_collision(&self) -> bool {
        matches!(self, GemEvent::Collision { .. })
    }

    pub fn is_score(&self) -> bool {
        matches!(self, GemEvent::Scored { .. })
    }
}

/// One unit of work: `target` tries to pull a gem from the cell across its edge `entry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PullStep {
    pub target: Coordinate,
    pub source: Coordinate,
    pub entry: u8,
}

impl PullStep {
    pub fn towards(target: Coordinate, entry: u8) -> Self {
        Self {
            target,
            source: target.neighbor(entry),
            entry,
        }
    }
}

/// Run propagation for a tile just placed at `coord`: pull from all six neighbours,
/// edge 0 first, each chain followed to its end before the next edge starts.
pub fn propagate_from(state: &mut GameState, coord: Coordinate) -> Result<Vec<GemEvent>, GameError> {
    if state.board.tile(coord).is_none() {
        return Err(GameError::NoTileAt(coord));
    }
    run_chain(state, (0..6).map(|edge| PullStep::towards(coord, edge)))
}

/// Drive the given steps (processed in order) and everything they trigger.
///
/// Each follow-up step enters a tile edge, so a chain that takes more steps than the
/// board has edges is circling and fails with [`GameError::Integrity`].
pub fn run_chain(
    state: &mut GameState,
    seeds: impl IntoIterator<Item = PullStep>,
) -> Result<Vec<GemEvent>, GameError> {
    let mut stack: Vec<PullStep> = seeds.into_iter().collect();
    stack.reverse();
    let limit = stack.len() + CELL_COUNT * 6;
    let mut steps = 0;
    let mut events = Vec::new();
    while let Some(step) = stack.pop() {
        steps += 1;
        if steps > limit {
            return Err(GameError::Integrity(format!(
                "gem chain still moving after {limit} steps"
            )));
        }
        if let Some(next) = pull(state, step, &mut events)? {
            stack.push(next);
        }
    }
    Ok(events)
}

/// Resolve one step. Returns the follow-up step when a gem moved on.
fn pull(
    state: &mut GameState,
    step: PullStep,
    events: &mut Vec<GemEvent>,
) -> Result<Option<PullStep>, GameError> {
    let Some(target) = state.board.tile(step.target) else {
        return Ok(None);
    };
    let resident = target.gem_at(step.entry);
    let exit = target.exit_for(step.entry);

    if step.source == CENTER {
        return pull_from_center(state, step, resident, exit, events);
    }

    let Some(source) = state.board.tile(step.source) else {
        return Ok(None);
    };
    let facing = opposite(step.entry);
    let Some(incoming) = source.gem_at(facing) else {
        return Ok(None);
    };

    if let Some(resident) = resident {
        take_expected(state, step.source, facing)?;
        take_expected(state, step.target, step.entry)?;
        collide(state, [incoming, resident], step.target, events)?;
        return Ok(None);
    }

    // No path through the target: the gem stays where it is
    let Some(exit) = exit else {
        return Ok(None);
    };

    take_expected(state, step.source, facing)?;
    arrive(state, incoming, GemSource::Tile(step.source), step.target, exit, events)
}

fn pull_from_center(
    state: &mut GameState,
    step: PullStep,
    resident: Option<Gem>,
    exit: Option<u8>,
    events: &mut Vec<GemEvent>,
) -> Result<Option<PullStep>, GameError> {
    let Some(slot) = state.center.select_slot(opposite(step.entry)) else {
        return Ok(None);
    };
    if resident.is_none() && exit.is_none() {
        return Ok(None);
    }
    let gem = state.center.take(slot).ok_or_else(|| {
        GameError::Integrity(format!("center slot {slot} was selected but is empty"))
    })?;
    tracing::debug!(slot, gem = ?gem.id, to = %step.target, "gem leaves the center");

    match (resident, exit) {
        (Some(resident), _) => {
            take_expected(state, step.target, step.entry)?;
            collide(state, [gem, resident], step.target, events)?;
            Ok(None)
        }
        (None, Some(exit)) => arrive(state, gem, GemSource::Center, step.target, exit, events),
        (None, None) => Err(GameError::Integrity(format!(
            "center gem {:?} has nowhere to go at {}",
            gem.id, step.target
        ))),
    }
}

/// Put `gem` on the tile at `coord`, edge `exit`, score the gate there and hand the
/// gem on to whatever lies across that edge.
fn arrive(
    state: &mut GameState,
    gem: Gem,
    from: GemSource,
    coord: Coordinate,
    exit: u8,
    events: &mut Vec<GemEvent>,
) -> Result<Option<PullStep>, GameError> {
    let tile = state
        .board
        .tile_mut(coord)
        .ok_or(GameError::NoTileAt(coord))?;

    // Exit already taken: the two gems destroy each other
    if let Some(blocker) = tile.take_gem(exit) {
        collide(state, [gem, blocker], coord, events)?;
        return Ok(None);
    }

    tile.put_gem(exit, gem);
    tracing::debug!(gem = ?gem.id, ?from, to = %coord, position = exit, "gem moved");
    events.push(GemEvent::Moved {
        gem,
        from,
        to: coord,
        position: exit,
    });

    scoring::resolve_gate(state, coord, events)?;
    Ok(Some(PullStep::towards(coord.neighbor(exit), opposite(exit))))
}

fn take_expected(state: &mut GameState, coord: Coordinate, position: u8) -> Result<Gem, GameError> {
    state
        .board
        .tile_mut(coord)
        .and_then(|tile| tile.take_gem(position))
        .ok_or_else(|| GameError::Integrity(format!("expected a gem at {coord} edge {position}")))
}

fn collide(
    state: &mut GameState,
    gems: [Gem; 2],
    at: Coordinate,
    events: &mut Vec<GemEvent>,
) -> Result<(), GameError> {
    for gem in gems {
        state.lose(gem)?;
    }
    tracing::debug!(at = %at, first = ?gems[0].id, second = ?gems[1].id, "collision");
    events.push(GemEvent::Collision { gems, at });
    Ok(())
}
