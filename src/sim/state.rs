//! Game state and core simulation types
//!
//! Coordinates follow the canvas convention: the origin is the top-left of
//! the field and y grows downward, so a negative `dy` is upward motion and
//! `GROUND_Y` is where a grounded player's top edge rests.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; the field is frozen until restart
    GameOver,
}

/// Fire-and-forget cue raised by the simulation, drained by the driver
/// each frame and handed to the audio boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player left the ground
    Jump,
    /// Player hit an obstacle (ends the session)
    Collision,
}

/// The player sprite
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub dy: f32,
    pub width: f32,
    pub height: f32,
    /// Whether the spin animation cycle is active (set on jump, cleared on landing)
    pub spinning: bool,
    /// Fractional sprite-sheet frame, wraps modulo `SPIN_FRAME_COUNT`
    pub spin_frame: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y),
            dy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            spinning: false,
            spin_frame: 0.0,
        }
    }
}

impl Player {
    /// Grounded means resting exactly on the ground line
    #[inline]
    pub fn grounded(&self) -> bool {
        self.pos.y == GROUND_Y
    }

    /// Attempt a jump. Only effective while grounded (no mid-air double
    /// jump). Returns whether the jump happened so the caller can raise
    /// the cue.
    pub fn jump(&mut self) -> bool {
        if !self.grounded() {
            return false;
        }
        self.dy = -JUMP_POWER;
        self.spinning = true;
        self.spin_frame = 0.0;
        true
    }

    /// Semi-implicit Euler step: while airborne (or still moving upward),
    /// apply gravity then move; otherwise snap to the ground line, zero
    /// the velocity, and end the spin cycle.
    pub fn integrate(&mut self) {
        if self.pos.y < GROUND_Y || self.dy < 0.0 {
            self.dy += GRAVITY;
            self.pos.y += self.dy;
        } else {
            self.pos.y = GROUND_Y;
            self.dy = 0.0;
            self.spinning = false;
        }
    }

    /// Advance the looping spin animation while active. Cosmetic only.
    pub fn advance_spin(&mut self) {
        if self.spinning {
            self.spin_frame += SPIN_FRAME_STEP;
            if self.spin_frame >= SPIN_FRAME_COUNT {
                self.spin_frame = 0.0;
            }
        }
    }

    /// Collision bounds
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// How an obstacle should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObstacleVisual {
    #[default]
    Normal,
    /// Tagged once by the session on the obstacle that ended the run;
    /// read-only thereafter
    Collided,
}

/// An obstacle scrolling in from the right edge
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    /// Randomized at spawn, always positive
    pub width: f32,
    pub height: f32,
    pub visual: ObstacleVisual,
}

impl Obstacle {
    pub fn new(x: f32, width: f32) -> Self {
        Self {
            pos: Vec2::new(x, GROUND_Y),
            width,
            height: OBSTACLE_HEIGHT,
            visual: ObstacleVisual::Normal,
        }
    }

    /// True once the obstacle has fully left the visible field
    #[inline]
    pub fn off_screen(&self) -> bool {
        self.pos.x + self.width <= 0.0
    }

    /// Collision bounds
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Read-only per-frame view handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub phase: GamePhase,
    pub score: u64,
    pub background_x: f32,
}

/// Complete session state. One value owns everything a run mutates, so
/// components receive it explicitly instead of reaching into globals.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter (runs across restarts)
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles, insertion order = spawn order
    pub obstacles: Vec<Obstacle>,
    /// Monotonic while Running, reset on restart
    pub score: u64,
    /// Ticks until the next spawn
    pub spawn_timer: u32,
    /// Ticks until the next score increment
    pub score_timer: u32,
    /// Background scroll offset, wraps after one field width (presentational)
    pub background_x: f32,
    /// Cues raised this tick, drained by the driver
    pub events: Vec<GameEvent>,
    /// Obstacle width RNG; the stream continues across restarts
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Running,
            player: Player::default(),
            obstacles: Vec::new(),
            score: 0,
            spawn_timer: SPAWN_INTERVAL_TICKS,
            score_timer: SCORE_INTERVAL_TICKS,
            background_x: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset gameplay state for a new run: fresh player pose, empty field,
    /// zero score, timers re-armed. The background offset and RNG stream
    /// carry over; only reachable from GameOver in practice.
    pub fn restart(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.score = 0;
        self.spawn_timer = SPAWN_INTERVAL_TICKS;
        self.score_timer = SCORE_INTERVAL_TICKS;
        self.phase = GamePhase::Running;
        self.events.clear();
    }

    /// Idempotent Running -> GameOver transition. Tags the colliding
    /// obstacle and raises the collision cue exactly once per session;
    /// repeat calls (e.g. several overlaps in one tick) are absorbed.
    pub fn on_collision(&mut self, obstacle_index: usize) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if let Some(obstacle) = self.obstacles.get_mut(obstacle_index) {
            obstacle.visual = ObstacleVisual::Collided;
        }
        self.events.push(GameEvent::Collision);
        self.phase = GamePhase::GameOver;
    }

    /// The external UI shows the restart control while this holds
    #[inline]
    pub fn offer_restart(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the cues raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player,
            obstacles: &self.obstacles,
            phase: self.phase,
            score: self.score,
            background_x: self.background_x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_only_from_ground() {
        let mut player = Player::default();
        assert!(player.jump());
        assert_eq!(player.dy, -JUMP_POWER);
        assert!(player.spinning);

        // Airborne after one step; a second jump must not change anything
        player.integrate();
        let before = player.clone();
        assert!(!player.jump());
        assert_eq!(player.dy, before.dy);
        assert_eq!(player.pos.y, before.pos.y);
    }

    #[test]
    fn test_landing_snaps_and_clears_spin() {
        let mut player = Player::default();
        player.jump();
        // Integrate until back on the ground
        for _ in 0..200 {
            player.integrate();
        }
        assert_eq!(player.pos.y, GROUND_Y);
        assert_eq!(player.dy, 0.0);
        assert!(!player.spinning);
    }

    #[test]
    fn test_spin_frame_wraps() {
        let mut player = Player::default();
        player.jump();
        for _ in 0..(SPIN_FRAME_COUNT / SPIN_FRAME_STEP) as u32 {
            player.advance_spin();
        }
        assert_eq!(player.spin_frame, 0.0);
    }

    #[test]
    fn test_on_collision_idempotent() {
        let mut state = GameState::new(7);
        state.obstacles.push(Obstacle::new(60.0, 30.0));

        state.on_collision(0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.obstacles[0].visual, ObstacleVisual::Collided);
        assert_eq!(state.drain_events(), vec![GameEvent::Collision]);

        // Second invocation: same terminal state, no second cue
        state.on_collision(0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_resets_run_state() {
        let mut state = GameState::new(7);
        state.obstacles.push(Obstacle::new(60.0, 30.0));
        state.score = 12;
        state.player.pos.y = 100.0;
        state.on_collision(0);

        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos.y, GROUND_Y);
        assert!(state.events.is_empty());
    }
}
