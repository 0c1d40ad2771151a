//! Rendering layer
//!
//! Reads a [`Snapshot`](crate::sim::Snapshot) each frame and draws it.
//! The simulation never calls into here; the driver hands snapshots
//! across. Only the wasm32 build carries an actual renderer - native
//! builds run headless.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, HudInfo};
