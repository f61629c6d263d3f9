//! Rendering adapters: a headless recording surface and text reports.
//!
//! # Invariants
//! - Renderers cannot mutate simulation state.
//! - Render output derives from simulation state and canvas bounds.
//!
//! # Workaround
//! No windowed backend ships here. `RecordingSurface` implements the
//! `Surface` trait by recording primitives, which is enough for the CLI and
//! for tests; a windowed surface can implement the same trait.

mod recording;
mod renderer;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{DebugTextRenderer, SceneRenderer};

pub fn crate_info() -> &'static str {
    "voxshape-render v0.1.0"
}
