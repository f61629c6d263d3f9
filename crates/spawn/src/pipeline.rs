use crate::palette::{color_for, size_for};
use crate::request::ShapeRequest;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use voxshape_common::{Bounds, EntityId};
use voxshape_kernel::{EntityConfig, MovingEntity, SimulationLoop};
use voxshape_shapes::{ShapeRegistry, UnknownShapeError};

/// Spawn tuning: RNG seed and speed limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Fixed seed for reproducible spawns. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_speed: 2.0,
        }
    }
}

/// Errors from a single spawn attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error(transparent)]
    UnknownShape(#[from] UnknownShapeError),
}

/// Turns shape requests into entities.
///
/// Holds the random source for spawn position, velocity and fallback color.
#[derive(Debug)]
pub struct SpawnPipeline {
    rng: StdRng,
    max_speed: f32,
}

impl SpawnPipeline {
    pub fn new(config: &SpawnConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            max_speed: config.max_speed,
        }
    }

    /// Compute position, velocity, size and color for `request`.
    pub fn entity_config(&mut self, request: &ShapeRequest, bounds: Bounds) -> EntityConfig {
        let size = size_for(&request.size);
        let color = color_for(&request.color, &mut self.rng);
        let position = Vec2::new(
            sample_extent(&mut self.rng, bounds.width),
            sample_extent(&mut self.rng, bounds.height),
        );
        let velocity = Vec2::new(self.sample_speed(), self.sample_speed());
        EntityConfig {
            position,
            size,
            color,
            velocity,
        }
    }

    /// Resolve the shape, build the entity and append it to `sim`.
    ///
    /// An unknown shape returns an error and leaves `sim` untouched.
    pub fn spawn(
        &mut self,
        registry: &ShapeRegistry,
        request: &ShapeRequest,
        bounds: Bounds,
        sim: &mut SimulationLoop,
    ) -> Result<EntityId, SpawnError> {
        let renderer = registry.resolve(&request.shape)?;
        let config = self.entity_config(request, bounds);
        let entity = MovingEntity::new(request.shape.clone(), config, renderer);
        let id = sim.push(entity);
        tracing::info!(
            %id,
            shape = %request.shape,
            size = config.size,
            color = %config.color,
            x = config.position.x,
            y = config.position.y,
            "spawned entity"
        );
        Ok(id)
    }

    /// Uniform in `[-max_speed, max_speed)`. Sampled as a unit draw scaled by
    /// `max_speed` so a huge limit cannot overflow the range width. A
    /// non-finite or non-positive limit gives 0.
    fn sample_speed(&mut self) -> f32 {
        let limit = self.max_speed;
        if limit.is_finite() && limit > 0.0 {
            self.rng.gen_range(-1.0f32..1.0) * limit
        } else {
            0.0
        }
    }
}

/// Uniform in `[0, extent)`, or 0 for a degenerate or non-finite extent.
fn sample_extent(rng: &mut StdRng, extent: f32) -> f32 {
    if extent.is_finite() && extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
