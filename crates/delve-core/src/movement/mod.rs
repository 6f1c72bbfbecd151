//! Stepwise entity movement over a finished map.

mod controller;
mod state;

pub use controller::{
    Entity, EntityId, EntitySnapshot, MoveHandle, MovementController, NullSink, SnapshotSink,
};
pub use state::{Facing, MovementAction, MovementState, StepSpeed};
