//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - One tick per frame, no wall-clock reads
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - Scheduling through the `Scheduler` trait, never the display directly

pub mod collision;
pub mod difficulty;
pub mod movement;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Hitbox, Player};
pub use schedule::{FrameHandle, ManualScheduler, Scheduler, TimerHandle, Wakeup};
pub use state::{
    Collectible, CollectibleKind, GameEvent, GamePhase, Obstacle, ObstacleKind, RunState,
};
pub use tick::{TickOutcome, tick};
