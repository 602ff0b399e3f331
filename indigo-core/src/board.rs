//! Hex board geometry with (row, column) axial coordinates

use serde::{Deserialize, Serialize};

/// Board radius (distance from center to edge)
pub const BOARD_RADIUS: i8 = 4;

/// Number of cells on a radius-4 board
pub const CELL_COUNT: usize = 61;

/// The reserved center cell holding the center piece
pub const CENTER: Coordinate = Coordinate::new(0, 0);

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i8,
    pub col: i8,
}

impl Coordinate {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this cell is on the board
    pub fn is_valid(&self) -> bool {
        self.row.abs() <= BOARD_RADIUS
            && self.col.abs() <= BOARD_RADIUS
            && (self.row + self.col).abs() <= BOARD_RADIUS
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i8 {
        (self.row.abs() + self.col.abs() + (self.row + self.col).abs()) / 2
    }

    /// Get neighbor across edge (0-5)
    pub fn neighbor(&self, edge: u8) -> Coordinate {
        let (dr, dc) = NEIGHBOR_OFFSETS[edge as usize % 6];
        Coordinate::new(self.row + dr, self.col + dc)
    }

    /// All six neighbors, indexed by the edge that faces them
    pub fn neighbors(&self) -> [Coordinate; 6] {
        std::array::from_fn(|edge| self.neighbor(edge as u8))
    }

    /// Edge of `self` facing `other`, if the two cells are adjacent
    pub fn edge_towards(&self, other: Coordinate) -> Option<u8> {
        (0..6u8).find(|&edge| self.neighbor(edge) == other)
    }

    /// Gate this cell belongs to, if it is one of the eighteen gate cells
    pub fn gate(&self) -> Option<usize> {
        GATE_CELLS.iter().position(|cells| cells.contains(self))
    }

    /// A cell is "exit adjacent" when two of its edges face out through a gate
    pub fn has_exit(&self) -> bool {
        self.gate().is_some()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Offsets (drow, dcol) per edge.
/// Index: 0=up, 1=up-right, 2=down-right, 3=down, 4=down-left, 5=up-left
pub const NEIGHBOR_OFFSETS: [(i8, i8); 6] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Edge on the far side of a shared boundary
pub fn opposite(edge: u8) -> u8 {
    (edge + 3) % 6
}

/// Corner cells carrying the treasure tiles, in gate order
pub const TREASURE_CELLS: [Coordinate; 6] = [
    Coordinate::new(-4, 0),
    Coordinate::new(-4, 4),
    Coordinate::new(0, 4),
    Coordinate::new(4, 0),
    Coordinate::new(4, -4),
    Coordinate::new(0, -4),
];

/// The three cells of each gate. Gate `i` leads off the board through edges `i` and `i + 1`.
pub const GATE_CELLS: [[Coordinate; 3]; 6] = [
    [Coordinate::new(-4, 1), Coordinate::new(-4, 2), Coordinate::new(-4, 3)],
    [Coordinate::new(-3, 4), Coordinate::new(-2, 4), Coordinate::new(-1, 4)],
    [Coordinate::new(1, 3), Coordinate::new(2, 2), Coordinate::new(3, 1)],
    [Coordinate::new(4, -1), Coordinate::new(4, -2), Coordinate::new(4, -3)],
    [Coordinate::new(1, -4), Coordinate::new(2, -4), Coordinate::new(3, -4)],
    [Coordinate::new(-1, -3), Coordinate::new(-2, -2), Coordinate::new(-3, -1)],
];

/// The two outward edges of gate `gate`
pub fn gate_edges(gate: usize) -> (u8, u8) {
    let first = (gate % 6) as u8;
    (first, (first + 1) % 6)
}

/// Every board cell in row-major order
pub fn all_cells() -> impl Iterator<Item = Coordinate> {
    (-BOARD_RADIUS..=BOARD_RADIUS).flat_map(|row| {
        (-BOARD_RADIUS..=BOARD_RADIUS)
            .map(move |col| Coordinate::new(row, col))
            .filter(Coordinate::is_valid)
    })
}
