//! Per-entity movement state.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Compass facing derived from the last step vector. The grid's y axis
/// grows downward, so north is toward decreasing y.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Facing {
    North,
    NorthEast,
    East,
    SouthEast,
    #[default]
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Facing {
    /// Facing for a step of `(dx, dy)` cells; `None` for a zero step.
    pub fn from_step(dx: i32, dy: i32) -> Option<Facing> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Facing::North),
            (1, -1) => Some(Facing::NorthEast),
            (1, 0) => Some(Facing::East),
            (1, 1) => Some(Facing::SouthEast),
            (0, 1) => Some(Facing::South),
            (-1, 1) => Some(Facing::SouthWest),
            (-1, 0) => Some(Facing::West),
            (-1, -1) => Some(Facing::NorthWest),
            _ => None,
        }
    }
}

/// What an entity is currently doing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MovementAction {
    /// Standing still between paths.
    #[default]
    LookingAround,
    /// Walking a path.
    Running,
}

/// Step cadence: how far a step carries in render units and how long one
/// step takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSpeed {
    pub px_per_step: f32,
    pub ms_per_step: u64,
}

impl StepSpeed {
    pub const fn new(px_per_step: f32, ms_per_step: u64) -> Self {
        Self {
            px_per_step,
            ms_per_step,
        }
    }
}

impl Default for StepSpeed {
    fn default() -> Self {
        Self::new(8.0, 200)
    }
}

/// Movement state consumed by render layers: action, facing, velocity
/// and the configured cadence. Mutated on every step, reset when a path
/// ends for any reason.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MovementState {
    pub action: MovementAction,
    pub facing: Facing,
    pub velocity: (f32, f32),
    pub speed: StepSpeed,
}

impl MovementState {
    /// Drop back to standing still; facing is kept.
    pub fn rest(&mut self) {
        self.action = MovementAction::LookingAround;
        self.velocity = (0.0, 0.0);
    }
}
