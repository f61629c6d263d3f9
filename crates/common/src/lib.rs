//! Shared value types for the voxshape workspace.

mod types;

pub use types::{Bounds, EntityId, Rgb};
