//! Pathfinding subsystem: the scored min-heap and the A* search.

mod astar;
mod heap;

pub use astar::{Pathfinder, PathfinderConfig};
pub use heap::MinHeap;
