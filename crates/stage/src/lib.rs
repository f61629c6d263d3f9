//! The stage: one owner for the registry, the simulation and capture.
//!
//! # Invariants
//! - Only the frame driver mutates the entity collection.
//! - Entities spawned during a frame are first drawn in the next frame.
//! - A rejected shape request leaves the simulation untouched.
//! - Capture events are handled at frame start, in arrival order.

pub mod config;
mod stage;

pub use config::{ConfigError, StageConfig};
pub use stage::{FrameReport, Stage};

pub fn crate_info() -> &'static str {
    "voxshape-stage v0.1.0"
}
