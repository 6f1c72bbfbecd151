//! End-to-end checks over the full generation, pathfinding and movement
//! pipeline.

use std::time::Duration;

use delve_core::map::{
    disconnected_rooms, generate_map, is_fully_connected, sweep, Coord, Corridor,
    CorridorDirection, Grid, MapParams, Room, RoomId, SWEEP_FAR_OFFSET, SWEEP_NEAR_OFFSET,
};
use delve_core::movement::{
    Entity, EntityId, EntitySnapshot, MovementAction, MovementController, StepSpeed,
};
use delve_core::path::{Pathfinder, PathfinderConfig};
use delve_core::DelveRng;

/// Two 3x3 rooms on a 10x10 grid, one in the top-left and one in the
/// bottom-right of the interior, sharing a one-column span.
fn two_room_layout() -> (Vec<Room>, Vec<Corridor>, Grid) {
    let mut rooms = vec![
        Room::new(RoomId(0), 2, 2, 3, 3),
        Room::new(RoomId(1), 4, 7, 3, 3),
    ];
    assert!(!rooms[0].overlaps(&rooms[1], 2));

    let mut corridors = Vec::new();
    let mut rng = DelveRng::new(42);
    let all: Vec<RoomId> = rooms.iter().map(|r| r.id).collect();
    for direction in CorridorDirection::FORWARD {
        sweep(
            &mut rooms,
            &mut corridors,
            direction,
            10,
            (SWEEP_NEAR_OFFSET, SWEEP_FAR_OFFSET),
            &all,
            &mut rng,
        );
    }

    let mut grid = Grid::new(10);
    grid.place_rooms(&rooms);
    grid.place_corridors(&corridors);
    (rooms, corridors, grid)
}

#[test]
fn two_rooms_get_a_corridor_with_endpoints_in_both_footprints() {
    let (rooms, corridors, _grid) = two_room_layout();

    assert!(is_fully_connected(&rooms));
    assert!(corridors.iter().any(|c| {
        let joins_forward = rooms[0].contains(c.start.x, c.start.y)
            && rooms[1].contains(c.end.x, c.end.y);
        let joins_backward = rooms[1].contains(c.start.x, c.start.y)
            && rooms[0].contains(c.end.x, c.end.y);
        joins_forward || joins_backward
    }));
}

#[test]
fn two_room_path_is_adjacent_and_accessible() {
    let (rooms, _corridors, grid) = two_room_layout();

    let finder = Pathfinder::new(&grid, PathfinderConfig::default());
    let path = finder.trace_path(rooms[0].center(), rooms[1].center(), None);

    assert!(!path.is_empty());
    assert_eq!(path[0], rooms[1].center());
    assert_eq!(*path.last().unwrap(), rooms[0].center());
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan(pair[1]), 1, "cells not adjacent");
        assert!(grid.cell(pair[0]).is_accessible());
    }
}

#[test]
fn generated_maps_keep_rooms_apart_and_connected() {
    for seed in 0..8 {
        let map = generate_map(MapParams::default(), &mut DelveRng::new(seed)).unwrap();

        for (i, a) in map.rooms.iter().enumerate() {
            for b in map.rooms.iter().skip(i + 1) {
                assert!(
                    !a.overlaps(b, 1),
                    "seed {seed}: rooms {:?}/{:?} too close",
                    a.id,
                    b.id
                );
            }
        }
        assert!(
            disconnected_rooms(&map.rooms).is_empty(),
            "seed {seed}: map is not a single component"
        );
    }
}

#[test]
fn out_of_bounds_queries_always_return_the_sentinel() {
    let map = generate_map(MapParams::default(), &mut DelveRng::new(3)).unwrap();
    let width = map.grid.width();

    for (x, y) in [(-1, 0), (0, -1), (width, 0), (0, width), (9999, -9999)] {
        let cell = map.grid.cell_at(x, y);
        assert!(cell.is_out_of_bounds());
        assert!(!cell.is_accessible());
    }
}

#[test]
fn entity_walks_between_rooms_on_a_generated_map() {
    let mut rng = DelveRng::new(12);
    let map = generate_map(MapParams::default(), &mut rng).unwrap();
    assert!(map.rooms.len() >= 2);

    let start = map.rooms[0].center();
    let target = map.rooms[map.rooms.len() - 1].center();

    let sink: Vec<EntitySnapshot> = Vec::new();
    let mut ctrl = MovementController::new(
        Entity::new(EntityId(7), start),
        PathfinderConfig::default(),
        sink,
    );

    ctrl.move_to(&map.grid, target, StepSpeed::new(8.0, 50), None);
    assert!(ctrl.is_moving());

    let mut guard = 0;
    while ctrl.is_moving() && guard < 10_000 {
        ctrl.tick(&map.grid, Duration::from_millis(50));
        guard += 1;
    }

    assert_eq!(ctrl.entity().position, target);
    assert_eq!(ctrl.state().action, MovementAction::LookingAround);

    // Every published step landed on an accessible cell.
    for snapshot in ctrl.sink() {
        assert!(map.grid.cell(snapshot.position).is_accessible());
    }
}

#[test]
fn cardinal_paths_on_generated_maps_never_cut_corners() {
    let map = generate_map(MapParams::default(), &mut DelveRng::new(21)).unwrap();
    let finder = Pathfinder::new(&map.grid, PathfinderConfig::default());

    let from = map.rooms[0].center();
    let to = map.rooms[map.rooms.len() / 2].center();
    let path = finder.trace_path(from, to, None);

    assert!(!path.is_empty());
    for pair in path.windows(2) {
        let dx = (pair[0].x - pair[1].x).abs();
        let dy = (pair[0].y - pair[1].y).abs();
        assert!(!(dx == 1 && dy == 1), "diagonal step in a cardinal path");
    }
}

#[test]
fn avoided_entity_cell_is_never_entered() {
    let (rooms, _corridors, grid) = two_room_layout();

    // Another entity stands in the corridor. The corridor is single
    // width and the layout's only link, so there is no way around.
    let occupied = Coord::new(4, 5);
    assert!(grid.cell(occupied).is_accessible());

    let finder = Pathfinder::new(&grid, PathfinderConfig::default());
    let path = finder.trace_path(rooms[0].center(), rooms[1].center(), Some(occupied));
    assert!(path.is_empty());
}
