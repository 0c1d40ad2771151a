//! Spin Dash - a side-scrolling reflex runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session state)
//! - `renderer`: Canvas2D rendering over read-only snapshots
//! - `highscores`: Persisted best score
//! - `settings`: Audio/HUD preferences

pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use highscores::BestScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions (y grows downward, canvas convention)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Ground line: y of a grounded player's top edge
    pub const GROUND_Y: f32 = FIELD_HEIGHT - 100.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Upward impulse applied by a jump
    pub const JUMP_POWER: f32 = 8.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.2;

    /// Spin animation: sprite-sheet frame count and per-tick advance
    pub const SPIN_FRAME_COUNT: f32 = 16.0;
    pub const SPIN_FRAME_STEP: f32 = 0.5;

    /// Obstacle defaults
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_MIN_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 50.0;
    /// Leftward travel per tick
    pub const OBSTACLE_SPEED: f32 = 5.0;
    /// Ticks between spawns (2 seconds)
    pub const SPAWN_INTERVAL_TICKS: u32 = 120;

    /// Ticks between score increments (1 second)
    pub const SCORE_INTERVAL_TICKS: u32 = 60;

    /// Background scroll speed per tick (purely presentational)
    pub const BACKGROUND_SCROLL_SPEED: f32 = 2.0;

    /// Autopilot: jump when the nearest obstacle closes within this gap
    pub const AUTOPILOT_JUMP_GAP: f32 = 120.0;
}
