use voxshape_common::Bounds;
use voxshape_kernel::SimulationLoop;

/// Produces some output from the simulation state.
///
/// Reporters only read the simulation; they never advance or mutate it.
pub trait SceneRenderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render the current state of `sim` for a canvas of `bounds`.
    fn render(&self, sim: &SimulationLoop, bounds: Bounds) -> Self::Output;
}

/// Text summary of the simulation, one line per entity.
///
/// Useful for CLI output, logging, and testing.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SceneRenderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, sim: &SimulationLoop, bounds: Bounds) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Canvas {:.0}x{:.0} (tick={}) ===\n",
            bounds.width,
            bounds.height,
            sim.tick()
        ));
        out.push_str(&format!("Entities: {}\n", sim.len()));

        for entity in sim.entities() {
            let p = entity.position();
            let v = entity.velocity();
            out.push_str(&format!(
                "  [{}] {:<9} size={:<3.0} {} pos=({:.2}, {:.2}) vel=({:.2}, {:.2})\n",
                entity.id(),
                entity.kind(),
                entity.size(),
                entity.color(),
                p.x,
                p.y,
                v.x,
                v.y
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use voxshape_common::Rgb;
    use voxshape_kernel::{EntityConfig, MovingEntity};
    use voxshape_shapes::Renderer;

    #[test]
    fn debug_renderer_empty_sim() {
        let sim = SimulationLoop::new();
        let output = DebugTextRenderer::new().render(&sim, Bounds::new(640.0, 480.0));

        assert!(output.contains("640x480"));
        assert!(output.contains("tick=0"));
        assert!(output.contains("Entities: 0"));
    }

    #[test]
    fn debug_renderer_with_entities() {
        let mut sim = SimulationLoop::new();
        sim.push(MovingEntity::new(
            "dinosaur",
            EntityConfig {
                position: Vec2::new(1.0, 2.0),
                size: 70.0,
                color: Rgb::new(0, 0, 255),
                velocity: Vec2::new(-1.5, 0.5),
            },
            Renderer::Dinosaur,
        ));

        let output = DebugTextRenderer::new().render(&sim, Bounds::default());

        assert!(output.contains("Entities: 1"));
        assert!(output.contains("dinosaur"));
        assert!(output.contains("rgb(0, 0, 255)"));
        assert!(output.contains("pos=(1.00, 2.00)"));
        assert!(output.contains("vel=(-1.50, 0.50)"));
    }
}
