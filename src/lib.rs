//! Shadow Runner - A single-screen endless runner
//!
//! Core modules:
//! - `sim`: Simulation (spawning, movement, collisions, difficulty, run state)
//! - `game`: Run lifecycle, jump control and frame driving
//! - `platform`: Browser scheduling and shell glue
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Shared by the simulation and the presentation layer, so a pixel offset
/// is only ever written down once.
pub mod consts {
    /// Starting scroll speed (pixels per frame)
    pub const BASE_SPEED: f32 = 5.0;
    /// Speed added at each distance milestone
    pub const SPEED_STEP: f32 = 0.5;
    /// Distance (ticks) between speed ramps
    pub const SPEED_MILESTONE: u64 = 1000;

    /// Per-tick obstacle spawn probability
    pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.015;
    /// Per-tick collectible spawn probability
    pub const COLLECTIBLE_SPAWN_CHANCE: f64 = 0.02;
    /// Chance a spawned obstacle is a hole (otherwise a barrier)
    pub const HOLE_CHANCE: f64 = 0.5;
    /// Chance a spawned collectible is a star (otherwise a cookie)
    pub const STAR_CHANCE: f64 = 0.7;

    /// Collectible lanes (vertical positions)
    pub const LANE_LOW: f32 = 100.0;
    pub const LANE_HIGH: f32 = 200.0;

    /// Play field width used when the viewport is unknown
    pub const FIELD_WIDTH: f32 = 1280.0;
    /// Entities at or left of this x are pruned
    pub const DESPAWN_X: f32 = -100.0;

    /// Player box
    pub const PLAYER_X: f32 = 120.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_GROUND_Y: f32 = 320.0;
    pub const PLAYER_AIR_Y: f32 = 200.0;

    /// Jump length in wall-clock milliseconds (independent of frame rate)
    pub const JUMP_DURATION_MS: u32 = 600;

    /// Entity widths
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const COLLECTIBLE_SIZE: f32 = 30.0;

    /// Pickup window: collectible y must be within this distance of the
    /// player's reach point (player y minus `PICKUP_OFFSET`)
    pub const PICKUP_OFFSET: f32 = 40.0;
    pub const PICKUP_REACH: f32 = 40.0;

    /// Points per collectible
    pub const STAR_POINTS: u64 = 10;
    pub const COOKIE_POINTS: u64 = 5;

    /// Distance ticks per displayed metre
    pub const TICKS_PER_METER: u64 = 10;

    /// Presentation-only heights (obstacle art)
    pub const BARRIER_HEIGHT: f32 = 80.0;
    pub const HOLE_HEIGHT: f32 = 32.0;
    /// Ground strip height at the bottom of the field
    pub const GROUND_HEIGHT: f32 = 128.0;
    /// How far the sprite is raised while airborne
    pub const JUMP_RISE: f32 = 192.0;
}
