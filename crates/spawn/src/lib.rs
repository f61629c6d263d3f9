//! Spawn pipeline: classified shape requests become moving entities.
//!
//! # Invariants
//! - Entities are only built from renderers returned by `ShapeRegistry::resolve`.
//! - A failed spawn never modifies the entity collection.
//! - All randomness flows from one seedable source.

mod palette;
mod pipeline;
mod request;

pub use palette::{COLOR_TOKENS, DEFAULT_SIZE, SIZE_TOKENS, color_for, named_color, size_for};
pub use pipeline::{SpawnConfig, SpawnError, SpawnPipeline};
pub use request::ShapeRequest;
