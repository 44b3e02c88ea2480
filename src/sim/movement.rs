//! Leftward scrolling and off-screen pruning

use super::state::RunState;
use crate::tuning::Tuning;

/// Scroll every entity left by the current speed, then drop the ones past
/// the despawn edge. Spawn order is kept.
pub fn advance(state: &mut RunState, tuning: &Tuning) {
    if !state.is_playing() {
        return;
    }

    let speed = state.speed;
    let edge = tuning.despawn_x;

    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }
    state.obstacles.retain(|o| o.x > edge);

    for collectible in &mut state.collectibles {
        collectible.x -= speed;
    }
    state.collectibles.retain(|c| c.x > edge);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CollectibleKind, GamePhase, ObstacleKind};

    #[test]
    fn test_moves_by_speed() {
        let tuning = Tuning::default();
        let mut state = RunState::new_run(&tuning);
        state.push_obstacle(500.0, ObstacleKind::Barrier);
        state.push_collectible(300.0, 100.0, CollectibleKind::Star);

        advance(&mut state, &tuning);
        assert_eq!(state.obstacles[0].x, 495.0);
        assert_eq!(state.collectibles[0].x, 295.0);
        assert_eq!(state.collectibles[0].y, 100.0);
    }

    #[test]
    fn test_prunes_at_despawn_edge() {
        let tuning = Tuning::default();
        let mut state = RunState::new_run(&tuning);
        // Lands exactly on -100: pruned
        state.push_obstacle(-95.0, ObstacleKind::Hole);
        // Lands on -99: kept
        state.push_obstacle(-94.0, ObstacleKind::Hole);
        state.push_collectible(-96.0, 200.0, CollectibleKind::Cookie);

        advance(&mut state, &tuning);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, 1);
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn test_keeps_spawn_order() {
        let tuning = Tuning::default();
        let mut state = RunState::new_run(&tuning);
        state.push_obstacle(-98.0, ObstacleKind::Hole);
        state.push_obstacle(400.0, ObstacleKind::Barrier);
        state.push_obstacle(900.0, ObstacleKind::Hole);

        advance(&mut state, &tuning);
        let ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_frozen_after_game_over() {
        let tuning = Tuning::default();
        let mut state = RunState::new_run(&tuning);
        state.push_obstacle(500.0, ObstacleKind::Barrier);
        state.phase = GamePhase::GameOver;

        advance(&mut state, &tuning);
        assert_eq!(state.obstacles[0].x, 500.0);
    }
}
