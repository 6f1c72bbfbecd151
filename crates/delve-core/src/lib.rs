//! delve-core: dungeon map generation, pathfinding and movement.
//!
//! This crate contains the whole traversable-map core with no I/O
//! dependencies: randomized room placement, corridor routing with
//! connectivity repair and pruning, A* path queries over the finished
//! grid, and a tick-driven movement controller per entity. Rendering,
//! input and persistence live behind the published snapshot and grid
//! accessors and are not part of this crate.

pub mod map;
pub mod movement;
pub mod path;

mod rng;

pub use rng::DelveRng;
