//! Corridors and the directional sweep router.
//!
//! Corridors are found by sweeping a thin band of cells just beyond one
//! edge of each room. When the band touches another room that is not yet
//! connected to the swept room, a single-width corridor is dug between the
//! facing edges, at a random position inside the span where the two edges
//! overlap. Four sweeps cover the four axis directions; the map builder
//! runs the two forward sweeps first and the rest during repair passes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::DelveRng;

use super::cell::Coord;
use super::room::{CorridorId, Room, RoomId};

/// Band offsets for the initial forward sweeps: rooms separated by a gap
/// of `SWEEP_NEAR_OFFSET..=SWEEP_FAR_OFFSET` cells get connected.
pub const SWEEP_NEAR_OFFSET: i32 = 2;
pub const SWEEP_FAR_OFFSET: i32 = 3;

/// Far offset used by repair passes; wide enough to cross the whole map.
pub const REPAIR_FAR_OFFSET: i32 = 333;

/// Axis direction a sweep walks away from a room edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum CorridorDirection {
    /// Horizontal, toward increasing x.
    East,
    /// Horizontal, toward decreasing x.
    West,
    /// Vertical, toward decreasing y.
    North,
    /// Vertical, toward increasing y.
    South,
}

impl CorridorDirection {
    /// The two sweeps run over freshly placed rooms before any repair.
    pub const FORWARD: [CorridorDirection; 2] = [CorridorDirection::East, CorridorDirection::North];

    /// All four sweep directions, used by repair passes.
    pub const ALL: [CorridorDirection; 4] = [
        CorridorDirection::East,
        CorridorDirection::West,
        CorridorDirection::North,
        CorridorDirection::South,
    ];

    const fn is_horizontal(self) -> bool {
        matches!(self, CorridorDirection::East | CorridorDirection::West)
    }
}

/// Single-width accessible connector between exactly two rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    pub id: CorridorId,
    pub start: Coord,
    pub end: Coord,
    pub direction: CorridorDirection,
    /// Corridors are always one cell wide.
    pub width: i32,
}

impl Corridor {
    /// Manhattan distance between the endpoints along the corridor axis.
    pub fn length(&self) -> i32 {
        self.start.manhattan(self.end)
    }

    /// Every cell covered by the corridor, endpoints included.
    pub fn cells(&self) -> Vec<Coord> {
        let dx = (self.end.x - self.start.x).signum();
        let dy = (self.end.y - self.start.y).signum();
        let mut cells = Vec::with_capacity(self.length() as usize + 1);
        let mut at = self.start;
        loop {
            cells.push(at);
            if at == self.end {
                break;
            }
            at.x += dx;
            at.y += dy;
        }
        cells
    }
}

/// Sweep one direction from each room in `swept`, connecting them to any
/// room the band touches. `band` is the inclusive offset range scanned
/// beyond the room edge. New corridors are appended to the arena and
/// registered on both endpoint rooms. Returns the number of corridors dug.
pub fn sweep(
    rooms: &mut [Room],
    corridors: &mut Vec<Corridor>,
    direction: CorridorDirection,
    map_width: i32,
    band: (i32, i32),
    swept: &[RoomId],
    rng: &mut DelveRng,
) -> usize {
    let (near, far) = band;
    let mut dug = 0;

    for &swept_id in swept {
        let a_idx = swept_id.0;

        // Rooms flush against the border in the swept direction have
        // nothing on the other side.
        let line = first_band_line(&rooms[a_idx], direction, near);
        if line < 0 || line >= map_width {
            continue;
        }

        let (scan_lo, scan_hi) = along_edge_range(&rooms[a_idx], direction);
        let mut p = scan_lo;

        while p <= scan_hi {
            let mut advance_to = p;
            let mut matched = None;

            'offsets: for off in near..=far {
                let probe = probe_cell(&rooms[a_idx], direction, off, p);
                if probe.x < 0 || probe.x >= map_width || probe.y < 0 || probe.y >= map_width {
                    break 'offsets;
                }
                if let Some(b_idx) = rooms
                    .iter()
                    .position(|r| r.id != swept_id && r.contains(probe.x, probe.y))
                {
                    matched = Some(b_idx);
                    break 'offsets;
                }
            }

            if let Some(b_idx) = matched {
                // Move the scan past the matched room so one pair never
                // gets two corridors from the same sweep.
                advance_to = along_edge_extent(&rooms[b_idx], direction);

                if !rooms[a_idx].is_connected_to(rooms[b_idx].id) {
                    let corridor =
                        dig_between(&rooms[a_idx], &rooms[b_idx], direction, corridors.len(), rng);
                    let id = corridor.id;
                    let b_id = rooms[b_idx].id;
                    tracing::debug!(
                        from = a_idx,
                        to = b_idx,
                        %direction,
                        length = corridor.length(),
                        "dug corridor"
                    );
                    corridors.push(corridor);
                    rooms[a_idx].connect(b_id, id);
                    rooms[b_idx].connect(swept_id, id);
                    dug += 1;
                }
            }

            p = advance_to.max(p) + 1;
        }
    }

    dug
}

/// First grid line the band touches beyond the room edge.
fn first_band_line(room: &Room, direction: CorridorDirection, near: i32) -> i32 {
    match direction {
        CorridorDirection::East => room.right_x() + near,
        CorridorDirection::West => room.left_x() - near,
        CorridorDirection::North => room.top_y() - near,
        CorridorDirection::South => room.bottom_y() + near,
    }
}

/// Inclusive range of the edge coordinate perpendicular to the sweep.
fn along_edge_range(room: &Room, direction: CorridorDirection) -> (i32, i32) {
    if direction.is_horizontal() {
        (room.top_y(), room.bottom_y())
    } else {
        (room.left_x(), room.right_x())
    }
}

/// Far extent of a room along the perpendicular scan axis.
fn along_edge_extent(room: &Room, direction: CorridorDirection) -> i32 {
    if direction.is_horizontal() {
        room.bottom_y()
    } else {
        room.right_x()
    }
}

/// Cell probed at perpendicular position `p`, `off` cells beyond the edge.
fn probe_cell(room: &Room, direction: CorridorDirection, off: i32, p: i32) -> Coord {
    match direction {
        CorridorDirection::East => Coord::new(room.right_x() + off, p),
        CorridorDirection::West => Coord::new(room.left_x() - off, p),
        CorridorDirection::North => Coord::new(p, room.top_y() - off),
        CorridorDirection::South => Coord::new(p, room.bottom_y() + off),
    }
}

/// Build the corridor joining `a` to `b`, placed at a uniformly random
/// position within the overlapping span of the two facing edges. The
/// endpoints sit on the facing edges themselves, inside both footprints.
fn dig_between(
    a: &Room,
    b: &Room,
    direction: CorridorDirection,
    next_id: usize,
    rng: &mut DelveRng,
) -> Corridor {
    let id = CorridorId(next_id);

    if direction.is_horizontal() {
        let lo = a.top_y().max(b.top_y());
        let hi = a.bottom_y().min(b.bottom_y());
        let y = rng.between(lo, hi);
        let (start_x, end_x) = match direction {
            CorridorDirection::East => (a.right_x(), b.left_x()),
            _ => (a.left_x(), b.right_x()),
        };
        Corridor {
            id,
            start: Coord::new(start_x, y),
            end: Coord::new(end_x, y),
            direction,
            width: 1,
        }
    } else {
        let lo = a.left_x().max(b.left_x());
        let hi = a.right_x().min(b.right_x());
        let x = rng.between(lo, hi);
        let (start_y, end_y) = match direction {
            CorridorDirection::North => (a.top_y(), b.bottom_y()),
            _ => (a.bottom_y(), b.top_y()),
        };
        Corridor {
            id,
            start: Coord::new(x, start_y),
            end: Coord::new(x, end_y),
            direction,
            width: 1,
        }
    }
}
