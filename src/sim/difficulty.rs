//! Distance tracking and the linear speed ramp

use super::state::{GameEvent, RunState};
use crate::tuning::Tuning;

/// Count one tick of distance and bump speed on milestones
///
/// Distance moves by exactly one per call, so every multiple of the
/// milestone is hit once and only once.
pub fn advance_distance(state: &mut RunState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if !state.is_playing() {
        return;
    }

    state.distance += 1;

    if state.distance % tuning.speed_milestone == 0 {
        state.speed += tuning.speed_step;
        log::debug!("Distance {}: speed -> {}", state.distance, state.speed);
        events.push(GameEvent::SpeedUp {
            distance: state.distance,
            speed: state.speed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_ramps_at_milestones() {
        let tuning = Tuning::default();
        let mut state = RunState::new_run(&tuning);
        let mut events = Vec::new();

        for _ in 0..999 {
            advance_distance(&mut state, &tuning, &mut events);
        }
        assert_eq!(state.speed, 5.0);
        assert!(events.is_empty());

        advance_distance(&mut state, &tuning, &mut events);
        assert_eq!(state.distance, 1000);
        assert_eq!(state.speed, 5.5);

        for _ in 0..1000 {
            advance_distance(&mut state, &tuning, &mut events);
        }
        assert_eq!(state.distance, 2000);
        assert_eq!(state.speed, 6.0);
        assert_eq!(
            events,
            vec![
                GameEvent::SpeedUp {
                    distance: 1000,
                    speed: 5.5
                },
                GameEvent::SpeedUp {
                    distance: 2000,
                    speed: 6.0
                },
            ]
        );
    }

    #[test]
    fn test_custom_milestone() {
        let tuning = Tuning {
            speed_milestone: 3,
            speed_step: 1.0,
            ..Default::default()
        };
        let mut state = RunState::new_run(&tuning);
        for _ in 0..9 {
            advance_distance(&mut state, &tuning, &mut Vec::new());
        }
        assert_eq!(state.speed, 8.0);
    }

    #[test]
    fn test_no_distance_outside_playing() {
        let tuning = Tuning::default();
        let mut state = RunState::menu(&tuning);
        advance_distance(&mut state, &tuning, &mut Vec::new());
        assert_eq!(state.distance, 0);
    }
}
