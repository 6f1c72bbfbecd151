//! Full map generation pipeline.
//!
//! Rooms are placed first, then the two forward sweeps dig the bulk of
//! the corridors. Any disconnected component left over triggers repair
//! sweeps with a widened band, escalating from unconnected rooms to
//! poorly connected ones. Pruning trims redundant corridors under the
//! connectivity check, and the surviving layout is painted onto a grid.

use serde::{Deserialize, Serialize};

use crate::rng::DelveRng;

use super::cell::Coord;
use super::connectivity::disconnected_rooms;
use super::corridor::{
    sweep, Corridor, CorridorDirection, REPAIR_FAR_OFFSET, SWEEP_FAR_OFFSET, SWEEP_NEAR_OFFSET,
};
use super::grid::Grid;
use super::params::{MapParams, ParamsError};
use super::placement::place_rooms;
use super::prune::prune_corridors;
use super::room::{Room, RoomId};

/// Upper bound on repair rounds; each fruitless round escalates the
/// target class, so the loop is short in practice.
const MAX_REPAIR_PASSES: usize = 32;

/// A finished, traversable map. Serializable as the read-only layout
/// handed to render layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonMap {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
}

impl DungeonMap {
    /// A random cell inside a random room, for spawning entities.
    pub fn random_open_cell(&self, rng: &mut DelveRng) -> Option<Coord> {
        let room = rng.choose(&self.rooms)?;
        Some(room.random_interior(rng))
    }
}

/// Builds maps from validated parameters.
#[derive(Debug, Clone)]
pub struct MapBuilder {
    params: MapParams,
}

impl MapBuilder {
    /// Validate the parameters and create a builder.
    pub fn new(params: MapParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameters this builder generates with.
    pub fn params(&self) -> &MapParams {
        &self.params
    }

    /// Run the whole pipeline with the given RNG.
    pub fn build(&self, rng: &mut DelveRng) -> DungeonMap {
        let mut rooms = place_rooms(&self.params, rng);

        // Sweeps walk rooms top to bottom, left to right; ids double as
        // arena indices, so they are assigned after the sort.
        rooms.sort_by_key(|r| (r.y, r.x));
        for (idx, room) in rooms.iter_mut().enumerate() {
            room.id = RoomId(idx);
        }

        let mut corridors: Vec<Corridor> = Vec::new();
        let all: Vec<RoomId> = rooms.iter().map(|r| r.id).collect();
        for direction in CorridorDirection::FORWARD {
            sweep(
                &mut rooms,
                &mut corridors,
                direction,
                self.params.map_width,
                (SWEEP_NEAR_OFFSET, SWEEP_FAR_OFFSET),
                &all,
                rng,
            );
        }

        self.repair(&mut rooms, &mut corridors, rng);
        let pruned = prune_corridors(&mut rooms, &mut corridors, rng);
        tracing::debug!(
            rooms = rooms.len(),
            corridors = corridors.len(),
            pruned,
            "map layout complete"
        );

        let mut grid = Grid::new(self.params.map_width);
        grid.place_rooms(&rooms);
        grid.place_corridors(&corridors);

        DungeonMap {
            grid,
            rooms,
            corridors,
        }
    }

    /// Re-sweep with a widened band until the room graph is a single
    /// component. Targets escalate: rooms with no connections, then rooms
    /// with exactly one, then everything still unreachable. A round that
    /// digs nothing escalates; after the last class the remaining layout
    /// is accepted as-is.
    fn repair(&self, rooms: &mut Vec<Room>, corridors: &mut Vec<Corridor>, rng: &mut DelveRng) {
        let mut level = 0;

        for pass in 0..MAX_REPAIR_PASSES {
            let missing = disconnected_rooms(rooms);
            if missing.is_empty() {
                return;
            }

            let targets: Vec<RoomId> = match level {
                0 => rooms
                    .iter()
                    .filter(|r| r.connection_count() == 0)
                    .map(|r| r.id)
                    .collect(),
                1 => rooms
                    .iter()
                    .filter(|r| r.connection_count() == 1)
                    .map(|r| r.id)
                    .collect(),
                _ => missing.clone(),
            };

            if targets.is_empty() {
                level += 1;
                if level > 2 {
                    break;
                }
                continue;
            }

            tracing::debug!(
                pass,
                level,
                disconnected = missing.len(),
                targets = targets.len(),
                "corridor repair pass"
            );

            let mut dug = 0;
            for direction in CorridorDirection::ALL {
                dug += sweep(
                    rooms,
                    corridors,
                    direction,
                    self.params.map_width,
                    (SWEEP_FAR_OFFSET, REPAIR_FAR_OFFSET),
                    &targets,
                    rng,
                );
            }

            if dug > 0 {
                level = 0;
            } else {
                level += 1;
                if level > 2 {
                    break;
                }
            }
        }

        let leftover = disconnected_rooms(rooms);
        if !leftover.is_empty() {
            tracing::warn!(
                disconnected = leftover.len(),
                "repair passes could not reach every room"
            );
        }
    }
}

/// Validate `params` and generate a map in one call.
pub fn generate_map(params: MapParams, rng: &mut DelveRng) -> Result<DungeonMap, ParamsError> {
    Ok(MapBuilder::new(params)?.build(rng))
}
