//! Run state and core simulation types
//!
//! A `RunState` is built fresh by every start and frozen at game over.
//! Nothing carries over between runs.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_METER;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Ground hazard types
///
/// Both kinds are lethal to a grounded player; they only differ in art.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Hole,
    Barrier,
}

/// A ground obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    pub kind: ObstacleKind,
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Star,
    Cookie,
}

impl CollectibleKind {
    /// Score awarded on pickup
    pub fn points(self, tuning: &Tuning) -> u64 {
        match self {
            CollectibleKind::Star => tuning.star_points,
            CollectibleKind::Cookie => tuning.cookie_points,
        }
    }
}

/// A floating pickup in one of the two lanes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: CollectibleKind,
}

/// Things that happened during a tick, for sounds/effects in the shell
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A collectible was picked up
    Collected {
        id: u32,
        kind: CollectibleKind,
        points: u64,
    },
    /// Scroll speed went up at a distance milestone
    SpeedUp { distance: u64, speed: f32 },
    /// Grounded player ran into an obstacle
    Crashed { id: u32, kind: ObstacleKind },
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub score: u64,
    /// Ticks survived
    pub distance: u64,
    /// Scroll speed in pixels per tick
    pub speed: f32,
    /// Player is mid-jump
    pub airborne: bool,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Active collectibles in spawn order
    pub collectibles: Vec<Collectible>,
    next_obstacle_id: u32,
    next_collectible_id: u32,
}

impl RunState {
    /// State shown before the first run
    pub fn menu(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            distance: 0,
            speed: tuning.base_speed,
            airborne: false,
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            next_obstacle_id: 0,
            next_collectible_id: 0,
        }
    }

    /// Fresh state for a new run
    pub fn new_run(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Playing,
            ..Self::menu(tuning)
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Distance as shown on the HUD
    pub fn meters(&self) -> u64 {
        self.distance / TICKS_PER_METER
    }

    /// Allocate the next obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_obstacle_id;
        self.next_obstacle_id += 1;
        id
    }

    /// Allocate the next collectible ID
    pub fn next_collectible_id(&mut self) -> u32 {
        let id = self.next_collectible_id;
        self.next_collectible_id += 1;
        id
    }

    /// Append an obstacle with a fresh ID
    pub fn push_obstacle(&mut self, x: f32, kind: ObstacleKind) -> u32 {
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle { id, x, kind });
        id
    }

    /// Append a collectible with a fresh ID
    pub fn push_collectible(&mut self, x: f32, y: f32, kind: CollectibleKind) -> u32 {
        let id = self.next_collectible_id();
        self.collectibles.push(Collectible { id, x, y, kind });
        id
    }
}
