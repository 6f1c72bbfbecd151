//! Grid coordinates and cell types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance to another coordinate (king moves).
    pub fn chebyshev(self, other: Coord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Cell status.
///
/// The grid starts out entirely `Obstacle`; room and corridor placement
/// paints cells `Open`. `Marked` is a transient visit marker used by
/// external visualization layers and is treated as accessible.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellStatus {
    #[default]
    Obstacle = 0,
    Open = 1,
    OutOfBounds = 2,
    Marked = 3,
}

/// Identity of the room or corridor that painted a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellOwner {
    #[default]
    None,
    Room(super::room::RoomId),
    Corridor(super::room::CorridorId),
}

/// A single cell of the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub status: CellStatus,
    pub owner: CellOwner,
}

/// Sentinel returned for every query outside the grid.
pub static OUT_OF_BOUNDS_CELL: GridCell = GridCell {
    x: -1,
    y: -1,
    status: CellStatus::OutOfBounds,
    owner: CellOwner::None,
};

impl GridCell {
    /// Create a cell at the given position with the default obstacle status.
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            status: CellStatus::Obstacle,
            owner: CellOwner::None,
        }
    }

    /// Coordinate of this cell.
    pub const fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// A cell can be entered unless it is an obstacle or out of bounds.
    pub const fn is_accessible(&self) -> bool {
        matches!(self.status, CellStatus::Open | CellStatus::Marked)
    }

    /// Whether this is the out-of-bounds sentinel.
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.status, CellStatus::OutOfBounds)
    }
}
