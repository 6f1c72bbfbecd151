//! Reachability over the room-connection graph.

use std::collections::VecDeque;

use super::room::{Room, RoomId};

/// Rooms unreachable from the first room by walking connection lists.
///
/// An empty result means the graph is a single connected component. The
/// traversal keeps its own visited set; rooms carry no traversal state.
pub fn disconnected_rooms(rooms: &[Room]) -> Vec<RoomId> {
    if rooms.is_empty() {
        return Vec::new();
    }

    let mut visited = vec![false; rooms.len()];
    let mut queue = VecDeque::new();
    visited[0] = true;
    queue.push_back(0usize);

    while let Some(idx) = queue.pop_front() {
        for conn in &rooms[idx].connections {
            let peer = conn.peer.0;
            if !visited[peer] {
                visited[peer] = true;
                queue.push_back(peer);
            }
        }
    }

    rooms
        .iter()
        .filter(|r| !visited[r.id.0])
        .map(|r| r.id)
        .collect()
}

/// Whether every room is reachable from every other.
pub fn is_fully_connected(rooms: &[Room]) -> bool {
    disconnected_rooms(rooms).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::room::CorridorId;

    fn linked(pairs: &[(usize, usize)], count: usize) -> Vec<Room> {
        let mut rooms: Vec<Room> = (0..count)
            .map(|i| Room::new(RoomId(i), 0, 0, 1, 1))
            .collect();
        for (corridor, &(a, b)) in pairs.iter().enumerate() {
            rooms[a].connect(RoomId(b), CorridorId(corridor));
            rooms[b].connect(RoomId(a), CorridorId(corridor));
        }
        rooms
    }

    #[test]
    fn empty_room_set_is_connected() {
        assert!(is_fully_connected(&[]));
    }

    #[test]
    fn chain_is_one_component() {
        let rooms = linked(&[(0, 1), (1, 2), (2, 3)], 4);
        assert!(disconnected_rooms(&rooms).is_empty());
    }

    #[test]
    fn isolated_rooms_are_reported() {
        let rooms = linked(&[(0, 1), (2, 3)], 5);
        let missing = disconnected_rooms(&rooms);
        assert_eq!(missing, vec![RoomId(2), RoomId(3), RoomId(4)]);
    }

    #[test]
    fn single_room_is_connected() {
        let rooms = linked(&[], 1);
        assert!(is_fully_connected(&rooms));
    }
}
