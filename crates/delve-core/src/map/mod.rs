//! Map generation subsystem.
//!
//! Contains the grid, room and corridor arenas, randomized placement,
//! connectivity repair and pruning, and the pipeline tying them together.

mod cell;
mod connectivity;
mod corridor;
mod generation;
mod grid;
mod params;
mod placement;
mod prune;
mod room;

pub use cell::{CellOwner, CellStatus, Coord, GridCell, OUT_OF_BOUNDS_CELL};
pub use connectivity::{disconnected_rooms, is_fully_connected};
pub use corridor::{
    sweep, Corridor, CorridorDirection, REPAIR_FAR_OFFSET, SWEEP_FAR_OFFSET, SWEEP_NEAR_OFFSET,
};
pub use generation::{generate_map, DungeonMap, MapBuilder};
pub use grid::Grid;
pub use params::{MapParams, ParamsError, MAP_BORDER};
pub use placement::{
    place_rooms, MAX_ASPECT_RATIO, OVERLAP_RELAX_THRESHOLD, OVERLAP_SHRINK_THRESHOLD,
};
pub use prune::{prune_corridors, PRUNE_CHANCE_PER_LENGTH};
pub use room::{Connection, CorridorId, Room, RoomId};
