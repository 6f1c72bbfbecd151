//! Stepwise path movement with cooperative cancellation.
//!
//! One controller drives one entity. `move_to` traces a path and arms
//! the stepper; callers feed elapsed time through `tick`, and the
//! controller performs a step each time the accumulated time crosses the
//! configured cadence. Cancellation is cooperative: the handle sets a
//! shared flag that the next scheduled step observes, so an armed delay
//! is never pre-empted, but nothing moves after the flag is seen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::map::{Coord, Grid};
use crate::path::{Pathfinder, PathfinderConfig};

use super::state::{Facing, MovementAction, MovementState, StepSpeed};

/// Identity of a moving entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// A movable occupant of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Coord,
    pub is_alive: bool,
}

impl Entity {
    pub fn new(id: EntityId, position: Coord) -> Self {
        Self {
            id,
            position,
            is_alive: true,
        }
    }
}

/// State published to subscribers after every step and idle transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub position: Coord,
    pub state: MovementState,
    pub is_alive: bool,
}

/// Seam to the external broadcast broker. The broker fans snapshots out
/// to render and proximity subscribers; it is not part of this crate.
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: &EntitySnapshot);
}

/// Sink that drops every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn publish(&mut self, _snapshot: &EntitySnapshot) {}
}

/// Recording sink, mostly for tests and replay tooling.
impl SnapshotSink for Vec<EntitySnapshot> {
    fn publish(&mut self, snapshot: &EntitySnapshot) {
        self.push(*snapshot);
    }
}

/// Cancellation handle for a move in progress.
///
/// Cancelling is observed at the next scheduled step after the first;
/// it guarantees that step becomes a no-op that also clears the pending
/// cadence state. Dropping the handle does not cancel.
#[derive(Debug, Clone)]
pub struct MoveHandle {
    cancelled: Arc<AtomicBool>,
}

impl MoveHandle {
    /// Request the walk to end at the next scheduled step.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Drives a single entity along traced paths.
#[derive(Debug)]
pub struct MovementController<S: SnapshotSink> {
    entity: Entity,
    state: MovementState,
    config: PathfinderConfig,
    sink: S,
    /// Remaining path cells; the next step sits at the end.
    steps: Vec<Coord>,
    elapsed_ms: u64,
    steps_taken: u32,
    cancelled: Arc<AtomicBool>,
}

impl<S: SnapshotSink> MovementController<S> {
    /// Create a controller owning `entity`'s movement state.
    pub fn new(entity: Entity, config: PathfinderConfig, sink: S) -> Self {
        Self {
            entity,
            state: MovementState::default(),
            config,
            sink,
            steps: Vec::new(),
            elapsed_ms: 0,
            steps_taken: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    /// The sink snapshots are published into.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether a path is still being walked.
    pub fn is_moving(&self) -> bool {
        !self.steps.is_empty() || self.state.action == MovementAction::Running
    }

    /// Trace a path to `target` and arm the stepper. A previous walk is
    /// dropped. `avoid` excludes one cell, typically another entity's
    /// position. Returns the cancellation handle for this walk; when no
    /// path exists the controller simply stays put.
    pub fn move_to(
        &mut self,
        grid: &Grid,
        target: Coord,
        speed: StepSpeed,
        avoid: Option<Coord>,
    ) -> MoveHandle {
        let finder = Pathfinder::new(grid, self.config);
        let mut path = finder.trace_path(self.entity.position, target, avoid);
        // The trace ends on the entity's own cell; the step consumer
        // wants the first step at the end of the vector.
        if path.last() == Some(&self.entity.position) {
            path.pop();
        }

        self.steps = path;
        self.state.speed = speed;
        self.elapsed_ms = 0;
        self.steps_taken = 0;
        self.cancelled = Arc::new(AtomicBool::new(false));

        if self.steps.is_empty() {
            tracing::debug!(entity = self.entity.id.0, ?target, "no path, staying put");
        }

        MoveHandle {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Stop immediately and broadcast the idle state.
    pub fn stop_moving(&mut self) {
        if self.is_moving() {
            self.go_idle();
        }
    }

    /// Advance the walk by `elapsed` wall time, stepping once per
    /// crossed cadence interval.
    pub fn tick(&mut self, grid: &Grid, elapsed: Duration) {
        if self.steps.is_empty() && self.state.action == MovementAction::LookingAround {
            return;
        }

        self.elapsed_ms += elapsed.as_millis() as u64;
        let cadence = self.state.speed.ms_per_step.max(1);
        while self.elapsed_ms >= cadence {
            self.elapsed_ms -= cadence;
            if !self.step(grid) {
                break;
            }
        }
    }

    /// Perform one step. Returns false when the walk ended, for any of:
    /// cancellation observed, path exhausted, next cell equal to the
    /// current position, or next cell no longer accessible.
    fn step(&mut self, grid: &Grid) -> bool {
        if self.steps_taken >= 1 && self.cancelled.load(Ordering::Relaxed) {
            self.go_idle();
            return false;
        }
        let Some(next) = self.steps.pop() else {
            self.go_idle();
            return false;
        };
        if next == self.entity.position {
            self.go_idle();
            return false;
        }
        if !grid.cell(next).is_accessible() {
            tracing::debug!(
                entity = self.entity.id.0,
                x = next.x,
                y = next.y,
                "next path cell blocked, stopping"
            );
            self.go_idle();
            return false;
        }

        let dx = next.x - self.entity.position.x;
        let dy = next.y - self.entity.position.y;
        if let Some(facing) = Facing::from_step(dx, dy) {
            self.state.facing = facing;
        }
        self.state.velocity = (
            dx as f32 * self.state.speed.px_per_step,
            dy as f32 * self.state.speed.px_per_step,
        );
        self.state.action = MovementAction::Running;
        self.entity.position = next;
        self.steps_taken += 1;
        self.publish();
        true
    }

    fn go_idle(&mut self) {
        self.steps.clear();
        self.elapsed_ms = 0;
        self.state.rest();
        self.publish();
    }

    fn publish(&mut self) {
        let snapshot = EntitySnapshot {
            id: self.entity.id,
            position: self.entity.position,
            state: self.state,
            is_alive: self.entity.is_alive,
        };
        self.sink.publish(&snapshot);
    }
}
