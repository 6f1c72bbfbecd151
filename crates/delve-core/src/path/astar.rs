//! A* search over the map grid.
//!
//! Queries are synchronous and side-effect free: all search bookkeeping
//! lives in a per-query table, never on the grid. The open set is the
//! crate's min-heap scored by `(f, h)`, so two frontier cells with equal
//! f are popped lower-h first and exploration order is deterministic.

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

use crate::map::{Coord, Grid, GridCell};

use super::heap::MinHeap;

const SQRT_2: f64 = core::f64::consts::SQRT_2;

static CARDINAL_STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
static ALL_STEPS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Search behavior flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathfinderConfig {
    /// Expand all eight neighbors instead of the four cardinal ones.
    pub allow_diagonal: bool,
    /// When the goal is unreachable, return the path to the explored
    /// cell closest to it instead of an empty path.
    pub return_closest_on_failure: bool,
}

/// Per-query search bookkeeping for one cell.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g: f64,
    h: f64,
    f: f64,
    parent: Option<Coord>,
    open: bool,
    closed: bool,
}

/// Shortest-path queries over a finished grid.
#[derive(Debug, Clone, Copy)]
pub struct Pathfinder<'g> {
    grid: &'g Grid,
    config: PathfinderConfig,
}

impl<'g> Pathfinder<'g> {
    /// Borrow a grid for the lifetime of the queries.
    pub fn new(grid: &'g Grid, config: PathfinderConfig) -> Self {
        Self { grid, config }
    }

    /// The configuration this pathfinder searches with.
    pub fn config(&self) -> PathfinderConfig {
        self.config
    }

    /// Cell lookup passthrough for callers holding only the pathfinder.
    pub fn grid_cell_at(&self, x: i32, y: i32) -> &GridCell {
        self.grid.cell_at(x, y)
    }

    /// Trace a path from `start` to `goal`, returned goal-first; callers
    /// reverse it for walking order. `avoid` excludes one cell from
    /// expansion, typically another entity's position. An unreachable
    /// goal yields the closest-cell path or an empty path, per
    /// configuration; never an error.
    pub fn trace_path(&self, start: Coord, goal: Coord, avoid: Option<Coord>) -> Vec<Coord> {
        let mut nodes: HashMap<Coord, SearchNode> = HashMap::new();
        let mut open: MinHeap<Coord, (f64, f64)> = MinHeap::with_capacity(64);

        let start_h = self.heuristic(start, goal);
        nodes.insert(
            start,
            SearchNode {
                g: 0.0,
                h: start_h,
                f: start_h,
                parent: None,
                open: true,
                closed: false,
            },
        );
        open.push(start, (start_h, start_h));

        let mut closest = (start, start_h);
        let steps: &[(i32, i32)] = if self.config.allow_diagonal {
            &ALL_STEPS
        } else {
            &CARDINAL_STEPS
        };

        while let Some(current) = open.pop() {
            let node = nodes[&current];
            if node.closed {
                continue;
            }
            if let Some(n) = nodes.get_mut(&current) {
                n.open = false;
                n.closed = true;
            }

            if current == goal {
                return reconstruct(&nodes, current);
            }
            if node.h < closest.1 {
                closest = (current, node.h);
            }

            for &(dx, dy) in steps {
                let next = Coord::new(current.x + dx, current.y + dy);
                if avoid == Some(next) {
                    continue;
                }
                if !self.grid.cell(next).is_accessible() {
                    continue;
                }

                let step_cost = if dx != 0 && dy != 0 { SQRT_2 } else { 1.0 };
                let tentative_g = node.g + step_cost;

                match nodes.entry(next) {
                    Entry::Vacant(slot) => {
                        let h = self.heuristic(next, goal);
                        let f = tentative_g + h;
                        slot.insert(SearchNode {
                            g: tentative_g,
                            h,
                            f,
                            parent: Some(current),
                            open: true,
                            closed: false,
                        });
                        open.push(next, (f, h));
                    }
                    Entry::Occupied(mut slot) => {
                        let seen = slot.get_mut();
                        if seen.closed || tentative_g >= seen.g {
                            continue;
                        }
                        seen.g = tentative_g;
                        seen.f = tentative_g + seen.h;
                        seen.parent = Some(current);
                        let rescored = (seen.f, seen.h);
                        if seen.open {
                            open.rescore(&next, rescored);
                        }
                    }
                }
            }
        }

        if self.config.return_closest_on_failure {
            reconstruct(&nodes, closest.0)
        } else {
            Vec::new()
        }
    }

    /// Manhattan distance for cardinal movement, octile distance when
    /// diagonal steps are allowed.
    fn heuristic(&self, from: Coord, to: Coord) -> f64 {
        let dx = (from.x - to.x).abs() as f64;
        let dy = (from.y - to.y).abs() as f64;
        if self.config.allow_diagonal {
            dx.min(dy) * SQRT_2 + (dx - dy).abs()
        } else {
            dx + dy
        }
    }
}

/// Walk parent links back from `end`; the result is ordered end-first
/// and finishes with the search start.
fn reconstruct(nodes: &HashMap<Coord, SearchNode>, end: Coord) -> Vec<Coord> {
    let mut path = vec![end];
    let mut at = end;
    while let Some(parent) = nodes[&at].parent {
        path.push(parent);
        at = parent;
    }
    path
}
