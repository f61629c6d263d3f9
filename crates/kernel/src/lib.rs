//! Simulation kernel: moving entities and the per-frame update/draw loop.
//!
//! # Invariants
//! - The entity collection is append-only.
//! - `update` runs before `draw` for each entity, in insertion order.
//! - Drawing never mutates entity state.

mod entity;
mod simulation;

pub use entity::{EntityConfig, MovingEntity};
pub use simulation::SimulationLoop;
