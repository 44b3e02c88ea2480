//! Per-frame simulation tick
//!
//! One tick is one display frame; speeds are pixels per frame.

use rand::Rng;

use super::collision::{self, CollisionReport};
use super::state::{GameEvent, RunState};
use super::{difficulty, movement, spawn};
use crate::tuning::Tuning;

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub collisions: CollisionReport,
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    /// The run must end after this tick
    pub fn crashed(&self) -> bool {
        self.collisions.lethal.is_some()
    }
}

/// Advance the run by one frame
///
/// Order: distance and speed ramp, spawning, movement, then the collision
/// pass over the moved entities. Does nothing unless the run is playing.
/// A crash is reported, not applied; the caller owns the phase change.
pub fn tick<R: Rng>(state: &mut RunState, tuning: &Tuning, rng: &mut R) -> TickOutcome {
    if !state.is_playing() {
        return TickOutcome::default();
    }

    let mut events = Vec::new();

    difficulty::advance_distance(state, tuning, &mut events);
    spawn::spawn(state, tuning, rng);
    movement::advance(state, tuning);
    let collisions = collision::resolve(state, tuning, &mut events);

    TickOutcome { collisions, events }
}
