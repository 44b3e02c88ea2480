//! Player hitbox tests against obstacles and collectibles
//!
//! Obstacles only care about horizontal overlap: the player is either on the
//! ground (and dies) or in the air (and clears it). Collectibles also need
//! the player's reach point to be close to the collectible's lane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{CollectibleKind, GameEvent, ObstacleKind, RunState};
use crate::tuning::Tuning;

/// Axis-aligned box, `pos` is the left/top corner in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Half-open horizontal overlap with `[x, x + width)`
    #[inline]
    pub fn overlaps_x(&self, x: f32, width: f32) -> bool {
        x < self.right() && x + width > self.left()
    }
}

/// The player, derived each frame from the airborne flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub hitbox: Hitbox,
    pub airborne: bool,
}

impl Player {
    pub fn from_state(state: &RunState, tuning: &Tuning) -> Self {
        let y = if state.airborne {
            tuning.air_y
        } else {
            tuning.ground_y
        };
        Self {
            hitbox: Hitbox::new(tuning.player_x, y, tuning.player_width, tuning.player_height),
            airborne: state.airborne,
        }
    }

    /// Vertical point collectibles are measured against
    #[inline]
    pub fn reach_y(&self, tuning: &Tuning) -> f32 {
        self.hitbox.pos.y - tuning.pickup_offset
    }
}

/// What the collision pass found this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// First obstacle that hit a grounded player
    pub lethal: Option<(u32, ObstacleKind)>,
    /// Collectibles picked up, in collection order
    pub collected: Vec<(u32, CollectibleKind)>,
}

/// Find the first obstacle that ends the run, if any
///
/// Holes and barriers share one rule: lethal unless airborne.
pub fn find_lethal_obstacle(
    state: &RunState,
    player: &Player,
    tuning: &Tuning,
) -> Option<(u32, ObstacleKind)> {
    if player.airborne {
        return None;
    }
    state
        .obstacles
        .iter()
        .find(|o| player.hitbox.overlaps_x(o.x, tuning.obstacle_width))
        .map(|o| (o.id, o.kind))
}

/// IDs and kinds of collectibles the player is touching
pub fn find_pickups(
    state: &RunState,
    player: &Player,
    tuning: &Tuning,
) -> Vec<(u32, CollectibleKind)> {
    let reach_y = player.reach_y(tuning);
    state
        .collectibles
        .iter()
        .filter(|c| {
            player.hitbox.overlaps_x(c.x, tuning.collectible_size)
                && (c.y - reach_y).abs() < tuning.pickup_reach
        })
        .map(|c| (c.id, c.kind))
        .collect()
}

/// Run the collision pass and apply pickups
///
/// Scoring and removal happen here; ending the run is left to the caller so
/// it can cancel its scheduled callbacks. Collected entries are removed by
/// ID, so several pickups in one pass cannot shift each other out of place.
pub fn resolve(
    state: &mut RunState,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> CollisionReport {
    if !state.is_playing() {
        return CollisionReport::default();
    }

    let player = Player::from_state(state, tuning);
    let lethal = find_lethal_obstacle(state, &player, tuning);
    let collected = find_pickups(state, &player, tuning);

    if !collected.is_empty() {
        for &(id, kind) in &collected {
            let points = kind.points(tuning);
            state.score += points;
            events.push(GameEvent::Collected { id, kind, points });
        }
        state
            .collectibles
            .retain(|c| !collected.iter().any(|&(id, _)| id == c.id));
    }

    if let Some((id, kind)) = lethal {
        events.push(GameEvent::Crashed { id, kind });
    }

    CollisionReport { lethal, collected }
}
