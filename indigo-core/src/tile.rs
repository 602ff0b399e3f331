//! Tile definitions: route/treasure tiles, rotation state and gems resting on edges

use crate::pieces::Gem;
use serde::{Deserialize, Serialize};

/// Identity orientation: edge label `i` sits at position `i`
pub const IDENTITY_EDGES: [u8; 6] = [0, 1, 2, 3, 4, 5];

/// Tile type tag. Only used for rendering and equality, never for game logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Route0,
    Route1,
    Route2,
    Route3,
    Route4,
    Treasure,
}

/// Route tile path layouts, indexed like `ROUTE_TYPES`
pub static ROUTE_PATHS: [[(u8, u8); 3]; 5] = [
    [(0, 2), (1, 4), (3, 5)],
    [(2, 5), (1, 4), (0, 3)],
    [(0, 5), (1, 4), (2, 3)],
    [(0, 5), (1, 3), (2, 4)],
    [(0, 5), (1, 2), (3, 4)],
];

pub const ROUTE_TYPES: [TileType; 5] = [
    TileType::Route0,
    TileType::Route1,
    TileType::Route2,
    TileType::Route3,
    TileType::Route4,
];

/// Copies of each route type in the draw pile
pub const ROUTE_SUPPLY: [usize; 5] = [14, 6, 14, 14, 6];

/// A hexagonal tile.
///
/// `edges[position]` is the edge label currently sitting at physical position
/// `position`. Paths join edge *labels* and never change; rotating the tile only
/// permutes `edges`. Gems are keyed by physical position and are not remapped
/// when the tile turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileType,
    paths: Vec<(u8, u8)>,
    edges: [u8; 6],
    gems: [Option<Gem>; 6],
}

impl Tile {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a tile from raw paths
    pub fn new(kind: TileType, paths: Vec<(u8, u8)>) -> Self {
        Self {
            kind,
            paths,
            edges: IDENTITY_EDGES,
            gems: [None; 6],
        }
    }

    /// Create a route tile of the given type, in identity orientation.
    /// `None` for kinds that are not route tiles.
    pub fn route(kind: TileType) -> Option<Self> {
        let index = ROUTE_TYPES.iter().position(|&t| t == kind)?;
        Some(Self::new(kind, ROUTE_PATHS[index].to_vec()))
    }

    /// Create the treasure tile for corner `index`: one gem facing the center and a
    /// single path joining the two edges beside it
    pub fn treasure(index: usize, gem: Gem) -> Self {
        let gem_pos = ((index + 3) % 6) as u8;
        let mut tile = Self::new(
            TileType::Treasure,
            vec![((gem_pos + 5) % 6, (gem_pos + 1) % 6)],
        );
        tile.gems[gem_pos as usize] = Some(gem);
        tile
    }

    /// Builder: put a gem at `position`
    pub fn with_gem(mut self, position: u8, gem: Gem) -> Self {
        self.gems[position as usize % 6] = Some(gem);
        self
    }

    // ========================================================================
    // ROTATION
    // ========================================================================

    /// Shift the label list one step to the left (first label moves to the end)
    pub fn rotate_left(&mut self) {
        self.edges.rotate_left(1);
    }

    /// Shift the label list one step to the right (last label moves to the front)
    pub fn rotate_right(&mut self) {
        self.edges.rotate_right(1);
    }

    /// Number of right rotations away from identity, i.e. the position of label 0
    pub fn rotation(&self) -> u8 {
        self.position_of(0).unwrap_or(0)
    }

    /// Reset to identity and rotate right `rotation` times
    pub fn set_rotation(&mut self, rotation: u8) {
        self.edges = IDENTITY_EDGES;
        self.edges.rotate_right(rotation as usize % 6);
    }

    pub fn edges(&self) -> &[u8; 6] {
        &self.edges
    }

    pub fn paths(&self) -> &[(u8, u8)] {
        &self.paths
    }

    // ========================================================================
    // PATH LOOKUP
    // ========================================================================

    fn position_of(&self, label: u8) -> Option<u8> {
        self.edges.iter().position(|&l| l == label).map(|p| p as u8)
    }

    /// Given an edge label, the position (in current orientation) of the other end of
    /// its path. `None` when no path touches that label.
    pub fn other_end_of(&self, label: u8) -> Option<u8> {
        let other = self.paths.iter().find_map(|&(a, b)| {
            if a == label {
                Some(b)
            } else if b == label {
                Some(a)
            } else {
                None
            }
        })?;
        self.position_of(other)
    }

    /// A gem entering at physical `position` leaves at the returned position
    pub fn exit_for(&self, position: u8) -> Option<u8> {
        self.other_end_of(self.edges[position as usize % 6])
    }

    /// True when a path joins the two physical positions
    pub fn connects(&self, a: u8, b: u8) -> bool {
        self.exit_for(a) == Some(b % 6)
    }

    // ========================================================================
    // GEMS
    // ========================================================================

    pub fn gem_at(&self, position: u8) -> Option<Gem> {
        self.gems[position as usize % 6]
    }

    pub fn put_gem(&mut self, position: u8, gem: Gem) {
        self.gems[position as usize % 6] = Some(gem);
    }

    pub fn take_gem(&mut self, position: u8) -> Option<Gem> {
        self.gems[position as usize % 6].take()
    }

    /// Gems on this tile with their positions
    pub fn gems(&self) -> impl Iterator<Item = (u8, Gem)> + '_ {
        self.gems
            .iter()
            .enumerate()
            .filter_map(|(pos, gem)| gem.map(|g| (pos as u8, g)))
    }

    pub fn gem_count(&self) -> usize {
        self.gems.iter().flatten().count()
    }

    /// Labels form a permutation of 0..5
    pub fn is_well_formed(&self) -> bool {
        let mut seen = [false; 6];
        for &label in &self.edges {
            if label > 5 || seen[label as usize] {
                return false;
            }
            seen[label as usize] = true;
        }
        true
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}", self.kind, self.rotation())
    }
}
