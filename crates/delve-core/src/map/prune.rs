//! Corridor pruning.
//!
//! Generation tends to over-connect densely packed rooms. Pruning walks
//! every room with more than two connections and removes redundant
//! corridors, longest first, with a removal chance proportional to the
//! corridor length. Every removal is verified against the connectivity
//! check and undone if it would split the graph, so pruning can never
//! disconnect the map.

use hashbrown::HashSet;

use crate::rng::DelveRng;

use super::connectivity::disconnected_rooms;
use super::corridor::Corridor;
use super::room::{Connection, CorridorId, Room};

/// Removal chance in percent per cell of corridor length.
pub const PRUNE_CHANCE_PER_LENGTH: f64 = 2.0;

/// Fewest connections a room is left with after pruning around it.
const MIN_CONNECTIONS: usize = 2;

/// Remove redundant corridors in place, returning how many were removed.
///
/// Connection lists on both endpoint rooms and the corridor arena are
/// updated together; surviving corridors keep their ids.
pub fn prune_corridors(
    rooms: &mut [Room],
    corridors: &mut Vec<Corridor>,
    rng: &mut DelveRng,
) -> usize {
    let mut removed: HashSet<CorridorId> = HashSet::new();

    for a_idx in 0..rooms.len() {
        if rooms[a_idx].connection_count() <= MIN_CONNECTIONS {
            continue;
        }

        // Longest corridors are the most likely to be redundant and the
        // most expensive to walk, so they go first.
        let mut candidates: Vec<Connection> = rooms[a_idx].connections.clone();
        candidates.sort_by_key(|c| {
            corridor_length(corridors, c.corridor).map_or(0, |len| -len)
        });

        for candidate in candidates {
            if rooms[a_idx].connection_count() <= MIN_CONNECTIONS {
                break;
            }
            // A peer-side prune may already have taken this corridor.
            if removed.contains(&candidate.corridor) {
                continue;
            }
            if rooms[candidate.peer.0].connection_count() < MIN_CONNECTIONS {
                continue;
            }

            let Some(length) = corridor_length(corridors, candidate.corridor) else {
                continue;
            };
            if !rng.percent(PRUNE_CHANCE_PER_LENGTH * length as f64) {
                continue;
            }

            let Some(from_a) = rooms[a_idx].disconnect(candidate.corridor) else {
                continue;
            };
            let Some(from_peer) = rooms[candidate.peer.0].disconnect(candidate.corridor) else {
                rooms[a_idx].connect(from_a.peer, from_a.corridor);
                continue;
            };

            if disconnected_rooms(rooms).is_empty() {
                tracing::debug!(
                    room = a_idx,
                    peer = candidate.peer.0,
                    corridor = candidate.corridor.0,
                    length,
                    "pruned corridor"
                );
                removed.insert(candidate.corridor);
            } else {
                // The corridor was a bridge; put it back.
                tracing::debug!(
                    room = a_idx,
                    peer = candidate.peer.0,
                    corridor = candidate.corridor.0,
                    "removal would disconnect, reverted"
                );
                rooms[a_idx].connect(from_a.peer, from_a.corridor);
                rooms[candidate.peer.0].connect(from_peer.peer, from_peer.corridor);
            }
        }
    }

    corridors.retain(|c| !removed.contains(&c.id));
    removed.len()
}

/// Length of a corridor by id. Ids are assigned in push order, so the
/// arena stays sorted and a binary search suffices.
fn corridor_length(corridors: &[Corridor], id: CorridorId) -> Option<i32> {
    corridors
        .binary_search_by_key(&id.0, |c| c.id.0)
        .ok()
        .map(|idx| corridors[idx].length())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::cell::Coord;
    use crate::map::corridor::CorridorDirection;
    use crate::map::room::RoomId;

    fn link(rooms: &mut [Room], corridors: &mut Vec<Corridor>, a: usize, b: usize, length: i32) {
        let id = CorridorId(corridors.len());
        corridors.push(Corridor {
            id,
            start: Coord::new(0, 0),
            end: Coord::new(length, 0),
            direction: CorridorDirection::East,
            width: 1,
        });
        rooms[a].connect(RoomId(b), id);
        rooms[b].connect(RoomId(a), id);
    }

    fn rooms(count: usize) -> Vec<Room> {
        (0..count)
            .map(|i| Room::new(RoomId(i), 0, 0, 1, 1))
            .collect()
    }

    #[test]
    fn redundant_corridor_is_removed() {
        // Triangle 0-1-2 plus a stub 0-3. Room 0 has three connections;
        // the triangle edges are redundant. Length 50 forces the draw.
        let mut rs = rooms(4);
        let mut cs = Vec::new();
        link(&mut rs, &mut cs, 0, 1, 50);
        link(&mut rs, &mut cs, 1, 2, 50);
        link(&mut rs, &mut cs, 2, 0, 50);
        link(&mut rs, &mut cs, 0, 3, 50);

        let mut rng = DelveRng::new(11);
        let removed = prune_corridors(&mut rs, &mut cs, &mut rng);

        assert_eq!(removed, 1);
        assert_eq!(cs.len(), 3);
        assert!(disconnected_rooms(&rs).is_empty());
    }

    #[test]
    fn bridge_removal_is_reverted() {
        // Triangle 0-1-2 with a chain 0-3-4 hanging off room 0. The 0-3
        // corridor is room 0's only removable long edge and a bridge.
        let mut rs = rooms(5);
        let mut cs = Vec::new();
        link(&mut rs, &mut cs, 0, 1, 0); // length 0: draw never passes
        link(&mut rs, &mut cs, 1, 2, 0);
        link(&mut rs, &mut cs, 2, 0, 0);
        link(&mut rs, &mut cs, 0, 3, 50);
        link(&mut rs, &mut cs, 3, 4, 50);

        let before: Vec<usize> = rs.iter().map(Room::connection_count).collect();
        let mut rng = DelveRng::new(11);
        let removed = prune_corridors(&mut rs, &mut cs, &mut rng);

        assert_eq!(removed, 0);
        assert_eq!(cs.len(), 5);
        let after: Vec<usize> = rs.iter().map(Room::connection_count).collect();
        assert_eq!(before, after);
        assert!(disconnected_rooms(&rs).is_empty());
    }

    #[test]
    fn rooms_with_two_connections_are_untouched() {
        let mut rs = rooms(3);
        let mut cs = Vec::new();
        link(&mut rs, &mut cs, 0, 1, 50);
        link(&mut rs, &mut cs, 1, 2, 50);

        let mut rng = DelveRng::new(11);
        assert_eq!(prune_corridors(&mut rs, &mut cs, &mut rng), 0);
        assert_eq!(cs.len(), 2);
    }

    #[test]
    fn peer_with_one_connection_keeps_its_corridor() {
        // Star: room 0 connected to three leaves. Every peer has a single
        // connection, so nothing may be removed.
        let mut rs = rooms(4);
        let mut cs = Vec::new();
        link(&mut rs, &mut cs, 0, 1, 50);
        link(&mut rs, &mut cs, 0, 2, 50);
        link(&mut rs, &mut cs, 0, 3, 50);

        let mut rng = DelveRng::new(11);
        assert_eq!(prune_corridors(&mut rs, &mut cs, &mut rng), 0);
        assert_eq!(cs.len(), 3);
    }
}
