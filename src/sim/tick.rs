//! Fixed timestep simulation tick
//!
//! One call advances the session by a single 60 Hz tick: physics, then
//! obstacle spawn/advance/cull, then the score cadence, then collision.
//! Everything gates on the phase, so a finished run freezes in place --
//! including the spawn and score counters -- until restart.

use rand::Rng;

use super::collision::first_hit;
use super::state::{GameEvent, GamePhase, GameState, Obstacle};
use crate::consts::*;

/// Input commands for a single tick, latched by the driver and cleared
/// after each consumed tick (edge-triggered)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/tap); only meaningful while grounded
    pub jump: bool,
    /// Start a new run; only meaningful while GameOver
    pub restart: bool,
    /// Demo mode - the game jumps for itself
    pub auto_pilot: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        return;
    }

    state.time_ticks += 1;

    // Background scroll, wrapping after one field width (presentational)
    state.background_x -= BACKGROUND_SCROLL_SPEED;
    if state.background_x <= -FIELD_WIDTH {
        state.background_x = 0.0;
    }

    // Edge-triggered jump, from input or the autopilot
    let want_jump = input.jump || (input.auto_pilot && obstacle_incoming(state));
    if want_jump && state.player.jump() {
        state.events.push(GameEvent::Jump);
    }

    // Physics
    state.player.integrate();
    state.player.advance_spin();

    // Obstacles: spawn on cadence at the right edge, advance, cull
    state.spawn_timer -= 1;
    if state.spawn_timer == 0 {
        let width = state
            .rng
            .random_range(OBSTACLE_MIN_WIDTH..OBSTACLE_MAX_WIDTH);
        state.obstacles.push(Obstacle::new(FIELD_WIDTH, width));
        state.spawn_timer = SPAWN_INTERVAL_TICKS;
    }
    advance_obstacles(&mut state.obstacles);
    cull_obstacles(&mut state.obstacles);

    // Score cadence
    state.score_timer -= 1;
    if state.score_timer == 0 {
        state.score += 1;
        state.score_timer = SCORE_INTERVAL_TICKS;
    }

    // First overlap ends the run; the transition is idempotent, so
    // several simultaneous overlaps cannot double-fire
    if let Some(index) = first_hit(&state.player, &state.obstacles) {
        state.on_collision(index);
    }
}

/// Move every obstacle left by the per-tick speed
pub fn advance_obstacles(obstacles: &mut [Obstacle]) {
    for obstacle in obstacles {
        obstacle.pos.x -= OBSTACLE_SPEED;
    }
}

/// Order-preserving removal of obstacles fully past the left edge
pub fn cull_obstacles(obstacles: &mut Vec<Obstacle>) {
    obstacles.retain(|obstacle| !obstacle.off_screen());
}

/// Autopilot trigger: some obstacle's leading edge is within jumping
/// distance ahead of the player
fn obstacle_incoming(state: &GameState) -> bool {
    let player_right = state.player.pos.x + state.player.width;
    state.obstacles.iter().any(|obstacle| {
        let gap = obstacle.pos.x - player_right;
        (0.0..AUTOPILOT_JUMP_GAP).contains(&gap)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Player};
    use proptest::prelude::*;

    #[test]
    fn test_grounded_player_stays_pinned() {
        let mut state = GameState::new(1);
        let input = TickInput::default();
        // No obstacle can reach the player before the first spawn
        for _ in 0..100 {
            tick(&mut state, &input);
            assert_eq!(state.player.pos.y, GROUND_Y);
            assert_eq!(state.player.dy, 0.0);
        }
    }

    #[test]
    fn test_first_spawn_cadence_and_width_bounds() {
        let mut state = GameState::new(2);
        let input = TickInput::default();
        for _ in 0..SPAWN_INTERVAL_TICKS - 1 {
            tick(&mut state, &input);
        }
        assert!(state.obstacles.is_empty());

        tick(&mut state, &input);
        assert_eq!(state.obstacles.len(), 1);
        let obstacle = &state.obstacles[0];
        // Advanced once on its spawn tick
        assert_eq!(obstacle.pos.x, FIELD_WIDTH - OBSTACLE_SPEED);
        assert!(obstacle.width >= OBSTACLE_MIN_WIDTH);
        assert!(obstacle.width < OBSTACLE_MAX_WIDTH);
    }

    #[test]
    fn test_score_increments_once_per_interval() {
        let mut state = GameState::new(3);
        let input = TickInput::default();
        for _ in 0..SCORE_INTERVAL_TICKS {
            tick(&mut state, &input);
        }
        assert_eq!(state.score, 1);
        for _ in 0..SCORE_INTERVAL_TICKS {
            tick(&mut state, &input);
        }
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_cull_removes_exactly_off_screen() {
        let mut obstacles = vec![Obstacle::new(-25.0, 20.0), Obstacle::new(100.0, 20.0)];
        // -25 + 20 <= 0: gone. 100 + 20 > 0: kept.
        cull_obstacles(&mut obstacles);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].pos.x, 100.0);

        // Partially off the left edge is still visible
        let mut partial = vec![Obstacle::new(-5.0, 20.0)];
        cull_obstacles(&mut partial);
        assert_eq!(partial.len(), 1);
    }

    #[test]
    fn test_game_over_freezes_field_and_counters() {
        let mut state = GameState::new(4);
        state.obstacles.push(Obstacle::new(60.0, 30.0));
        let input = TickInput::default();
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen_x = state.obstacles[0].pos.x;
        let frozen_score = state.score;
        let frozen_spawn = state.spawn_timer;
        for _ in 0..300 {
            tick(&mut state, &input);
        }
        assert_eq!(state.obstacles[0].pos.x, frozen_x);
        assert_eq!(state.score, frozen_score);
        assert_eq!(state.spawn_timer, frozen_spawn);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = GameState::new(5);
        state.score = 3;
        // Restart while Running has no effect
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.score, 3);

        state.obstacles.push(Obstacle::new(60.0, 30.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_same_seed_same_run() {
        let input = TickInput::default();
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for _ in 0..1000 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.pos.x, ob.pos.x);
            assert_eq!(oa.width, ob.width);
        }
    }

    #[test]
    fn test_autopilot_survives_first_obstacle() {
        let mut state = GameState::new(6);
        let input = TickInput {
            auto_pilot: true,
            ..Default::default()
        };
        // Long enough for the first obstacle to pass the player
        for _ in 0..(SPAWN_INTERVAL_TICKS + 200) {
            tick(&mut state, &input);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.score > 0);
    }

    proptest! {
        /// Airborne integration adds exactly the gravity constant to dy
        #[test]
        fn prop_airborne_gravity_is_fixed_increment(
            dy in -JUMP_POWER..JUMP_POWER,
            y in 100.0f32..GROUND_Y,
        ) {
            let mut player = Player::default();
            player.pos.y = y;
            player.dy = dy;
            let before = player.dy;
            player.integrate();
            prop_assert!((player.dy - (before + GRAVITY)).abs() < 1e-5);
            prop_assert!((player.pos.y - (y + player.dy)).abs() < 1e-3);
        }

        /// Culling keeps exactly the visible obstacles, in order
        #[test]
        fn prop_cull_is_order_preserving_filter(
            cases in proptest::collection::vec((-100.0f32..900.0, 1.0f32..50.0), 0..20),
        ) {
            let mut obstacles: Vec<Obstacle> = cases
                .iter()
                .map(|&(x, w)| Obstacle::new(x, w))
                .collect();
            let expected: Vec<f32> = obstacles
                .iter()
                .filter(|o| o.pos.x + o.width > 0.0)
                .map(|o| o.pos.x)
                .collect();

            cull_obstacles(&mut obstacles);

            let kept: Vec<f32> = obstacles.iter().map(|o| o.pos.x).collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
