//! Run lifecycle: menu, playing, game over
//!
//! `Game` owns the run state, the RNG and the scheduler handles. The shell
//! only ever calls [`Game::start`], [`Game::jump`], reads [`Game::state`],
//! and forwards scheduler wakeups.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::sim::collision::Player;
use crate::sim::schedule::{FrameHandle, Scheduler, TimerHandle, Wakeup};
use crate::sim::state::{GameEvent, GamePhase, RunState};
use crate::sim::tick::{TickOutcome, tick};
use crate::tuning::{Tuning, TuningError};

/// Game instance: state machine plus frame driver
pub struct Game<S: Scheduler> {
    state: RunState,
    tuning: Tuning,
    rng: Pcg32,
    scheduler: S,
    /// Outstanding frame request while playing
    frame: Option<FrameHandle>,
    /// Outstanding landing timer while airborne
    jump_timer: Option<TimerHandle>,
}

impl<S: Scheduler> Game<S> {
    /// New game sitting on the menu
    ///
    /// Tuning is validated here, so the simulation never sees a zero
    /// milestone or an out-of-range probability.
    pub fn new(tuning: Tuning, seed: u64, scheduler: S) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            state: RunState::menu(&tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            scheduler,
            frame: None,
            jump_timer: None,
        })
    }

    /// Read-only snapshot for the presentation layer
    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current player hitbox
    pub fn player(&self) -> Player {
        Player::from_state(&self.state, &self.tuning)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin a fresh run from any phase
    ///
    /// Everything from the previous run is dropped, including frame and
    /// landing callbacks that have not fired yet.
    pub fn start(&mut self) {
        self.cancel_callbacks();
        self.state = RunState::new_run(&self.tuning);
        self.frame = Some(self.scheduler.request_frame());
        log::info!("Run started (speed {})", self.state.speed);
    }

    /// Finish the run and freeze its state
    pub fn end(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.cancel_callbacks();
        self.state.phase = GamePhase::GameOver;
        self.state.airborne = false;
        log::info!(
            "Run over: score {}, {}m",
            self.state.score,
            self.state.meters()
        );
    }

    /// Jump if playing and on the ground; returns whether a jump started
    pub fn jump(&mut self) -> bool {
        if !self.state.is_playing() || self.state.airborne {
            return false;
        }
        self.state.airborne = true;
        self.jump_timer = Some(self.scheduler.set_timeout(self.tuning.jump_duration_ms));
        log::debug!("Jump at distance {}", self.state.distance);
        true
    }

    /// Run one frame for the given frame request
    ///
    /// Returns `None` for a stale request (cancelled or superseded).
    pub fn on_frame(&mut self, handle: FrameHandle) -> Option<TickOutcome> {
        if self.frame != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return None;
        }
        self.frame = None;

        if !self.state.is_playing() {
            return None;
        }

        let outcome = tick(&mut self.state, &self.tuning, &mut self.rng);
        for event in &outcome.events {
            if let GameEvent::Collected { kind, points, .. } = event {
                log::debug!("Collected {:?} (+{})", kind, points);
            }
        }

        if outcome.crashed() {
            self.end();
        } else {
            self.frame = Some(self.scheduler.request_frame());
        }

        Some(outcome)
    }

    /// Landing timer fired
    pub fn on_timeout(&mut self, handle: TimerHandle) {
        if self.jump_timer != Some(handle) {
            log::trace!("Ignoring stale timer {:?}", handle);
            return;
        }
        self.jump_timer = None;
        self.state.airborne = false;
    }

    /// Dispatch any scheduler wakeup
    pub fn wake(&mut self, wakeup: Wakeup) -> Option<TickOutcome> {
        match wakeup {
            Wakeup::Frame(handle) => self.on_frame(handle),
            Wakeup::Timeout(handle) => {
                self.on_timeout(handle);
                None
            }
        }
    }

    fn cancel_callbacks(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if let Some(handle) = self.jump_timer.take() {
            self.scheduler.clear_timeout(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::schedule::ManualScheduler;
    use crate::sim::state::{CollectibleKind, ObstacleKind};

    fn quiet() -> Tuning {
        Tuning {
            obstacle_chance: 0.0,
            collectible_chance: 0.0,
            ..Default::default()
        }
    }

    fn new_game(tuning: Tuning) -> Game<ManualScheduler> {
        Game::new(tuning, 12345, ManualScheduler::new()).unwrap()
    }

    /// Fire up to `n` frames, stopping early if the driver stops
    fn run_frames(game: &mut Game<ManualScheduler>, n: usize) -> usize {
        let mut ran = 0;
        for _ in 0..n {
            let Some(handle) = game.scheduler_mut().fire_frame() else {
                break;
            };
            game.on_frame(handle);
            ran += 1;
        }
        ran
    }

    fn advance_clock(game: &mut Game<ManualScheduler>, ms: u64) {
        for handle in game.scheduler_mut().advance(ms) {
            game.on_timeout(handle);
        }
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let zero_milestone = Tuning {
            speed_milestone: 0,
            ..Default::default()
        };
        let result = Game::new(zero_milestone, 1, ManualScheduler::new());
        assert!(matches!(
            result,
            Err(TuningError::NotPositive {
                field: "speed_milestone",
                ..
            })
        ));

        let bad_chance = Tuning {
            obstacle_chance: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            Game::new(bad_chance, 1, ManualScheduler::new()),
            Err(TuningError::Probability { .. })
        ));
    }

    #[test]
    fn test_starts_on_menu() {
        let mut game = new_game(Tuning::default());
        assert_eq!(game.state().phase, GamePhase::Menu);
        assert_eq!(game.scheduler().pending_frame(), None);
        assert_eq!(run_frames(&mut game, 10), 0);
        assert_eq!(game.state().distance, 0);
    }

    #[test]
    fn test_start_resets_run() {
        let mut game = new_game(Tuning::default());
        game.start();

        let state = game.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0);
        assert_eq!(state.speed, 5.0);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(game.scheduler().pending_frame().is_some());
    }

    #[test]
    fn test_barrier_ends_run() {
        let mut game = new_game(quiet());
        game.start();
        game.state.push_obstacle(105.0, ObstacleKind::Barrier);

        // Moves to x=100, overlapping the player at 120..180
        assert_eq!(run_frames(&mut game, 1), 1);
        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert_eq!(game.scheduler().pending_frame(), None);

        // Frozen: no more frames are driven
        let frozen = game.state().clone();
        assert_eq!(run_frames(&mut game, 10), 0);
        assert_eq!(game.state(), &frozen);
    }

    #[test]
    fn test_jump_lasts_600ms() {
        let mut game = new_game(quiet());
        game.start();

        assert!(game.jump());
        assert!(game.state().airborne);
        assert!(game.player().airborne);

        advance_clock(&mut game, 599);
        assert!(game.state().airborne);
        advance_clock(&mut game, 1);
        assert!(!game.state().airborne);
    }

    #[test]
    fn test_jump_is_independent_of_frames() {
        let mut game = new_game(quiet());
        game.start();
        game.jump();

        // Lots of frames, no wall-clock time: still airborne
        run_frames(&mut game, 500);
        assert!(game.state().airborne);
        advance_clock(&mut game, 600);
        assert!(!game.state().airborne);
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let mut game = new_game(quiet());
        game.start();
        assert!(game.jump());
        advance_clock(&mut game, 300);
        assert!(!game.jump());
        assert_eq!(game.scheduler().pending_timers(), 1);

        // Lands on the first jump's schedule, not extended
        advance_clock(&mut game, 300);
        assert!(!game.state().airborne);
    }

    #[test]
    fn test_jump_outside_playing_is_noop() {
        let mut game = new_game(quiet());
        assert!(!game.jump());
        assert!(!game.state().airborne);

        game.start();
        game.state.push_obstacle(110.0, ObstacleKind::Hole);
        run_frames(&mut game, 1);
        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert!(!game.jump());
        assert_eq!(game.scheduler().pending_timers(), 0);
    }

    #[test]
    fn test_airborne_player_clears_obstacle() {
        let mut game = new_game(quiet());
        game.start();
        game.state.push_obstacle(190.0, ObstacleKind::Barrier);
        game.jump();

        // 190 -> passes fully behind the player (x + 60 <= 120) by frame 26
        run_frames(&mut game, 26);
        assert_eq!(game.state().phase, GamePhase::Playing);
        advance_clock(&mut game, 600);
        run_frames(&mut game, 5);
        assert_eq!(game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_end_cancels_landing_timer() {
        let mut game = new_game(quiet());
        game.start();
        game.jump();
        let old_timer = game.jump_timer.unwrap();
        game.end();
        assert_eq!(game.scheduler().cleared_timers(), 1);
        assert_eq!(game.scheduler().pending_timers(), 0);

        // Restart and jump again; the old run's timer must not land us early
        game.start();
        game.jump();
        game.on_timeout(old_timer);
        assert!(game.state().airborne);
        advance_clock(&mut game, 600);
        assert!(!game.state().airborne);
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let mut game = new_game(quiet());
        game.start();
        let first = game.scheduler_mut().fire_frame().unwrap();
        game.on_frame(first);

        // Replaying an old handle does nothing
        assert!(game.on_frame(first).is_none());
        assert_eq!(game.state().distance, 1);
    }

    #[test]
    fn test_restart_cancels_pending_frame() {
        let mut game = new_game(quiet());
        game.start();
        let pending = game.scheduler().pending_frame().unwrap();
        game.start();
        assert_eq!(game.scheduler().cancelled_frames(), 1);
        assert!(game.on_frame(pending).is_none());
        assert_eq!(game.state().distance, 0);
    }

    #[test]
    fn test_restart_after_game_over_resets_everything() {
        let mut game = new_game(Tuning::default());
        game.start();
        for _ in 0..3 {
            game.state.push_obstacle(900.0, ObstacleKind::Hole);
            game.state.push_collectible(900.0, 100.0, CollectibleKind::Star);
        }
        game.state.score = 250;
        game.state.speed = 8.5;
        game.state.distance = 7000;
        game.end();

        game.start();
        let state = game.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0);
        assert_eq!(state.speed, 5.0);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());

        // ID counters restart at zero
        game.state.push_obstacle(900.0, ObstacleKind::Barrier);
        assert_eq!(game.state().obstacles[0].id, 0);
    }

    #[test]
    fn test_speed_ramp_through_frames() {
        let mut game = new_game(quiet());
        game.start();
        assert_eq!(run_frames(&mut game, 1000), 1000);
        assert_eq!(game.state().speed, 5.5);
        assert_eq!(run_frames(&mut game, 1000), 1000);
        assert_eq!(game.state().speed, 6.0);
        assert_eq!(game.state().distance, 2000);
    }

    #[test]
    fn test_wake_dispatch() {
        let mut game = new_game(quiet());
        game.start();
        game.jump();
        let frame = game.scheduler_mut().fire_frame().unwrap();
        assert!(game.wake(Wakeup::Frame(frame)).is_some());

        let timers = game.scheduler_mut().advance(600);
        assert_eq!(timers.len(), 1);
        assert!(game.wake(Wakeup::Timeout(timers[0])).is_none());
        assert!(!game.state().airborne);
    }
}
