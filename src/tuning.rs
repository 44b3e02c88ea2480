//! Data-driven game balance
//!
//! Every rule number the simulation uses lives here, defaulting to `consts`.
//! The browser shell may override any subset from a JSON blob embedded in the
//! page; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Browser timers take a signed 32-bit delay
pub const MAX_JUMP_DURATION_MS: u32 = i32::MAX as u32;

/// Reasons a tuning blob is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("speed_step must not be negative, got {0}")]
    NegativeSpeedStep(f32),
    #[error("jump_duration_ms must be at most {max}, got {value}")]
    JumpTooLong { value: u32, max: u32 },
}

/// Game balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Difficulty ===
    pub base_speed: f32,
    pub speed_step: f32,
    pub speed_milestone: u64,

    // === Spawning ===
    pub obstacle_chance: f64,
    pub collectible_chance: f64,
    pub hole_chance: f64,
    pub star_chance: f64,
    pub lanes: [f32; 2],

    // === Field ===
    /// Right edge where entities appear
    pub field_width: f32,
    pub despawn_x: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub ground_y: f32,
    pub air_y: f32,
    pub jump_duration_ms: u32,

    // === Collision ===
    pub obstacle_width: f32,
    pub collectible_size: f32,
    pub pickup_offset: f32,
    pub pickup_reach: f32,
    pub star_points: u64,
    pub cookie_points: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            speed_step: SPEED_STEP,
            speed_milestone: SPEED_MILESTONE,

            obstacle_chance: OBSTACLE_SPAWN_CHANCE,
            collectible_chance: COLLECTIBLE_SPAWN_CHANCE,
            hole_chance: HOLE_CHANCE,
            star_chance: STAR_CHANCE,
            lanes: [LANE_LOW, LANE_HIGH],

            field_width: FIELD_WIDTH,
            despawn_x: DESPAWN_X,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            ground_y: PLAYER_GROUND_Y,
            air_y: PLAYER_AIR_Y,
            jump_duration_ms: JUMP_DURATION_MS,

            obstacle_width: OBSTACLE_WIDTH,
            collectible_size: COLLECTIBLE_SIZE,
            pickup_offset: PICKUP_OFFSET,
            pickup_reach: PICKUP_REACH,
            star_points: STAR_POINTS,
            cookie_points: COOKIE_POINTS,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) tuning blob
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Same tuning with a different spawn edge (viewport width)
    pub fn with_field_width(mut self, width: f32) -> Self {
        self.field_width = width;
        self
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("obstacle_chance", self.obstacle_chance),
            ("collectible_chance", self.collectible_chance),
            ("hole_chance", self.hole_chance),
            ("star_chance", self.star_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Probability { field, value });
            }
        }

        for (field, value) in [
            ("base_speed", self.base_speed),
            ("field_width", self.field_width),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("collectible_size", self.collectible_size),
        ] {
            // NaN fails this check too
            if !(value > 0.0) {
                return Err(TuningError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }

        if self.speed_milestone == 0 {
            return Err(TuningError::NotPositive {
                field: "speed_milestone",
                value: 0.0,
            });
        }
        if self.jump_duration_ms == 0 {
            return Err(TuningError::NotPositive {
                field: "jump_duration_ms",
                value: 0.0,
            });
        }
        if self.jump_duration_ms > MAX_JUMP_DURATION_MS {
            return Err(TuningError::JumpTooLong {
                value: self.jump_duration_ms,
                max: MAX_JUMP_DURATION_MS,
            });
        }
        if !(self.speed_step >= 0.0) {
            return Err(TuningError::NegativeSpeedStep(self.speed_step));
        }

        Ok(())
    }
}
