//! The map grid and its paint/query operations.

use serde::{Deserialize, Serialize};

use super::cell::{CellOwner, CellStatus, Coord, GridCell, OUT_OF_BOUNDS_CELL};
use super::corridor::Corridor;
use super::room::Room;

/// Square matrix of cells. Starts out entirely obstacle; room and corridor
/// placement paints footprints open and tags them with the owning id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Create a grid of `width` x `width` obstacle cells.
    pub fn new(width: i32) -> Self {
        let side = width.max(0);
        let mut cells = Vec::with_capacity((side * side) as usize);
        for y in 0..side {
            for x in 0..side {
                cells.push(GridCell::new(x, y));
            }
        }
        Self { width: side, cells }
    }

    /// Side length of the grid.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Row-major cell matrix, for render layers that walk every cell.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.width {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Cell at `(x, y)`, or the out-of-bounds sentinel. Never fails.
    pub fn cell_at(&self, x: i32, y: i32) -> &GridCell {
        match self.index(x, y) {
            Some(idx) => &self.cells[idx],
            None => &OUT_OF_BOUNDS_CELL,
        }
    }

    /// Cell at a coordinate, or the out-of-bounds sentinel.
    pub fn cell(&self, at: Coord) -> &GridCell {
        self.cell_at(at.x, at.y)
    }

    /// Set the status of the cell at `(x, y)` and return it.
    ///
    /// Out-of-range targets are skipped with a diagnostic and answered
    /// with the sentinel.
    pub fn set_status_at(&mut self, status: CellStatus, x: i32, y: i32) -> &GridCell {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx].status = status;
                &self.cells[idx]
            }
            None => {
                tracing::debug!(x, y, %status, "status write outside grid skipped");
                &OUT_OF_BOUNDS_CELL
            }
        }
    }

    /// Paint every room footprint open, tagged with the owning room id.
    /// Returns the number of cells painted; out-of-range cells are
    /// skipped, never an error.
    pub fn place_rooms(&mut self, rooms: &[Room]) -> usize {
        let mut painted = 0;
        for room in rooms {
            for y in room.top_y()..=room.bottom_y() {
                for x in room.left_x()..=room.right_x() {
                    painted += self.paint(x, y, CellOwner::Room(room.id)) as usize;
                }
            }
        }
        painted
    }

    /// Paint every corridor cell open, tagged with the owning corridor id.
    /// Returns the number of cells painted; out-of-range cells are
    /// skipped, never an error.
    pub fn place_corridors(&mut self, corridors: &[Corridor]) -> usize {
        let mut painted = 0;
        for corridor in corridors {
            for at in corridor.cells() {
                painted += self.paint(at.x, at.y, CellOwner::Corridor(corridor.id)) as usize;
            }
        }
        painted
    }

    fn paint(&mut self, x: i32, y: i32, owner: CellOwner) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx].status = CellStatus::Open;
                self.cells[idx].owner = owner;
                true
            }
            None => {
                tracing::debug!(x, y, ?owner, "paint outside grid skipped");
                false
            }
        }
    }
}
