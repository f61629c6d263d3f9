//! Shape registry: maps shape tokens to renderers.
//!
//! # Invariants
//! - Shape identity is a string token; drawing logic lives behind `Renderer`.
//! - Every renderer draws around the local origin; placement is the caller's job.
//! - Re-registering a name never changes renderers already handed out.

mod registry;
mod renderer;
mod surface;

pub use registry::{ShapeDefinition, ShapeRegistry, UnknownShapeError};
pub use renderer::{RenderFn, Renderer};
pub use surface::{Surface, TransformScope};

pub fn crate_info() -> &'static str {
    "voxshape-shapes v0.1.0"
}
