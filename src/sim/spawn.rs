//! Entity spawning at the right edge of the field

use rand::Rng;

use super::state::{CollectibleKind, ObstacleKind, RunState};
use crate::tuning::Tuning;

/// Roll both spawn trials for one tick
///
/// The obstacle and collectible rolls are independent, so both may fire in
/// the same tick. Returns how many entities were added.
pub fn spawn<R: Rng>(state: &mut RunState, tuning: &Tuning, rng: &mut R) -> usize {
    if !state.is_playing() {
        return 0;
    }

    let mut spawned = 0;
    let x = tuning.field_width;

    if rng.random_bool(tuning.obstacle_chance) {
        let kind = if rng.random_bool(tuning.hole_chance) {
            ObstacleKind::Hole
        } else {
            ObstacleKind::Barrier
        };
        state.push_obstacle(x, kind);
        spawned += 1;
    }

    if rng.random_bool(tuning.collectible_chance) {
        let y = tuning.lanes[rng.random_range(0..tuning.lanes.len())];
        let kind = if rng.random_bool(tuning.star_chance) {
            CollectibleKind::Star
        } else {
            CollectibleKind::Cookie
        };
        state.push_collectible(x, y, kind);
        spawned += 1;
    }

    spawned
}
