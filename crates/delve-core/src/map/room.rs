//! Room arena types.
//!
//! Rooms and corridors are stored in arenas and refer to each other by
//! integer id, so the room graph carries no reference cycles. A room's
//! connection list names the peer room and the corridor joining them; the
//! same corridor appears in both endpoint rooms' lists.

use serde::{Deserialize, Serialize};

use crate::rng::DelveRng;

use super::cell::Coord;

/// Index of a room in the room arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub usize);

/// Index of a corridor in the corridor arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorridorId(pub usize);

/// One edge of the room-connection graph, stored on a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Room at the other end of the corridor.
    pub peer: RoomId,
    /// Corridor joining the two rooms.
    pub corridor: CorridorId,
}

/// Rectangular, axis-aligned accessible region of the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// X coordinate of the left edge.
    pub x: i32,
    /// Y coordinate of the top edge.
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Corridor links to peer rooms.
    pub connections: Vec<Connection>,
}

impl Room {
    /// Create a new unconnected room.
    pub fn new(id: RoomId, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            connections: Vec::new(),
        }
    }

    /// X coordinate of the leftmost column.
    pub fn left_x(&self) -> i32 {
        self.x
    }

    /// X coordinate of the rightmost column.
    pub fn right_x(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Y coordinate of the topmost row.
    pub fn top_y(&self) -> i32 {
        self.y
    }

    /// Y coordinate of the bottommost row.
    pub fn bottom_y(&self) -> i32 {
        self.y + self.height - 1
    }

    /// Interior cell count.
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Cell count of the footprint expanded by `clearance` on every side.
    pub fn cleared_area(&self, clearance: i32) -> i32 {
        (self.width + 2 * clearance) * (self.height + 2 * clearance)
    }

    /// Center cell of the room.
    pub fn center(&self) -> Coord {
        Coord::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a coordinate lies inside the room footprint.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right_x() && y >= self.y && y <= self.bottom_y()
    }

    /// Check if this room's footprint, expanded by `clearance` on every
    /// side, intersects another room's equally expanded footprint.
    pub fn overlaps(&self, other: &Room, clearance: i32) -> bool {
        let lx = self.x - clearance;
        let ly = self.y - clearance;
        let hx = self.right_x() + clearance;
        let hy = self.bottom_y() + clearance;

        let olx = other.x - clearance;
        let oly = other.y - clearance;
        let ohx = other.right_x() + clearance;
        let ohy = other.bottom_y() + clearance;

        !(hx < olx || lx > ohx || hy < oly || ly > ohy)
    }

    /// A random cell inside the room footprint.
    pub fn random_interior(&self, rng: &mut DelveRng) -> Coord {
        Coord::new(
            rng.between(self.x, self.right_x()),
            rng.between(self.y, self.bottom_y()),
        )
    }

    /// Number of corridors attached to this room.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Whether any corridor already joins this room to `peer`.
    pub fn is_connected_to(&self, peer: RoomId) -> bool {
        self.connections.iter().any(|c| c.peer == peer)
    }

    /// Record a corridor link to `peer`.
    pub fn connect(&mut self, peer: RoomId, corridor: CorridorId) {
        self.connections.push(Connection { peer, corridor });
    }

    /// Remove the link carried by `corridor`, returning it if present.
    pub fn disconnect(&mut self, corridor: CorridorId) -> Option<Connection> {
        let idx = self.connections.iter().position(|c| c.corridor == corridor)?;
        Some(self.connections.remove(idx))
    }
}
