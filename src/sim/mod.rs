//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, aabb_overlap, first_hit};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleVisual, Player, Snapshot};
pub use tick::{TickInput, tick};
