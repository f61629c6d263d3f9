use crate::entity::MovingEntity;
use voxshape_common::EntityId;
use voxshape_shapes::Surface;

/// The live entity collection and its per-frame update/draw pass.
///
/// Entities are kept in insertion order and never removed. Appends happen
/// between frames, so an entity pushed after frame N is first drawn in
/// frame N+1.
#[derive(Debug, Default)]
pub struct SimulationLoop {
    entities: Vec<MovingEntity>,
    tick: u64,
}

impl SimulationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> &[MovingEntity] {
        &self.entities
    }

    pub fn get(&self, id: EntityId) -> Option<&MovingEntity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Append an entity. Returns its id.
    pub fn push(&mut self, entity: MovingEntity) -> EntityId {
        let id = entity.id();
        self.entities.push(entity);
        id
    }

    /// Run one frame: update then draw every entity against the surface's
    /// current bounds.
    pub fn frame(&mut self, surface: &mut dyn Surface) {
        let _span = tracing::trace_span!("frame", tick = self.tick).entered();
        surface.begin_frame();
        let bounds = surface.bounds();
        for entity in &mut self.entities {
            entity.update(bounds);
            entity.draw(surface);
        }
        self.tick += 1;
        tracing::trace!(entities = self.entities.len(), "frame complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityConfig;
    use glam::Vec2;
    use voxshape_common::Rgb;
    use voxshape_shapes::{Renderer, ShapeRegistry};

    /// Records primitives in canvas coordinates; supports translation only.
    struct TraceSurface {
        width: f32,
        height: f32,
        offset: Vec2,
        saved: Vec<Vec2>,
        drawn: Vec<(&'static str, Vec2)>,
        frames_begun: usize,
    }

    impl TraceSurface {
        fn new(width: f32, height: f32) -> Self {
            Self {
                width,
                height,
                offset: Vec2::ZERO,
                saved: Vec::new(),
                drawn: Vec::new(),
                frames_begun: 0,
            }
        }
    }

    impl Surface for TraceSurface {
        fn width(&self) -> f32 {
            self.width
        }
        fn height(&self) -> f32 {
            self.height
        }
        fn fill(&mut self, _color: Rgb) {}
        fn ellipse(&mut self, center: Vec2, _w: f32, _h: f32) {
            self.drawn.push(("ellipse", self.offset + center));
        }
        fn rect(&mut self, center: Vec2, _w: f32, _h: f32) {
            self.drawn.push(("rect", self.offset + center));
        }
        fn triangle(&mut self, a: Vec2, _b: Vec2, _c: Vec2) {
            self.drawn.push(("triangle", self.offset + a));
        }
        fn push_transform(&mut self) {
            self.saved.push(self.offset);
        }
        fn pop_transform(&mut self) {
            self.offset = self.saved.pop().unwrap_or(Vec2::ZERO);
        }
        fn translate(&mut self, offset: Vec2) {
            self.offset += offset;
        }
        fn rotate(&mut self, _radians: f32) {}
        fn begin_frame(&mut self) {
            assert!(self.saved.is_empty(), "frame began inside a transform");
            self.frames_begun += 1;
        }
    }

    fn config(x: f32, y: f32, vx: f32, vy: f32) -> EntityConfig {
        EntityConfig {
            position: Vec2::new(x, y),
            size: 50.0,
            color: Rgb::new(0, 0, 255),
            velocity: Vec2::new(vx, vy),
        }
    }

    #[test]
    fn loop_starts_empty() {
        let sim = SimulationLoop::new();
        assert_eq!(sim.tick(), 0);
        assert!(sim.is_empty());
    }

    #[test]
    fn frame_updates_then_draws_in_insertion_order() {
        let mut sim = SimulationLoop::new();
        sim.push(MovingEntity::new("circle", config(10.0, 10.0, 1.0, 0.0), Renderer::Circle));
        sim.push(MovingEntity::new("square", config(20.0, 20.0, 0.0, 2.0), Renderer::Square));

        let mut surface = TraceSurface::new(100.0, 100.0);
        sim.frame(&mut surface);

        assert_eq!(
            surface.drawn,
            vec![
                ("ellipse", Vec2::new(11.0, 10.0)),
                ("rect", Vec2::new(20.0, 22.0)),
            ]
        );
        assert_eq!(sim.tick(), 1);
        assert!(surface.saved.is_empty());
    }

    #[test]
    fn frame_reads_bounds_from_surface() {
        let mut sim = SimulationLoop::new();
        let id = sim.push(MovingEntity::new("circle", config(49.0, 10.0, 2.0, 0.0), Renderer::Circle));

        sim.frame(&mut TraceSurface::new(50.0, 50.0));
        assert_eq!(sim.get(id).unwrap().velocity().x, -2.0);

        let mut sim = SimulationLoop::new();
        let id = sim.push(MovingEntity::new("circle", config(49.0, 10.0, 2.0, 0.0), Renderer::Circle));
        sim.frame(&mut TraceSurface::new(500.0, 50.0));
        assert_eq!(sim.get(id).unwrap().velocity().x, 2.0);
    }

    #[test]
    fn captured_renderer_survives_registry_overwrite() {
        let mut registry = ShapeRegistry::new();
        registry.register("blob", Renderer::Circle);

        let mut sim = SimulationLoop::new();
        let renderer = registry.resolve("blob").unwrap();
        sim.push(MovingEntity::new("blob", config(10.0, 10.0, 0.0, 0.0), renderer));

        registry.register("blob", Renderer::Square);

        let mut surface = TraceSurface::new(100.0, 100.0);
        sim.frame(&mut surface);
        assert_eq!(surface.drawn, vec![("ellipse", Vec2::new(10.0, 10.0))]);
    }

    #[test]
    fn panicking_renderer_restores_transform() {
        let mut sim = SimulationLoop::new();
        let boom = Renderer::custom(|_, _, _| panic!("bad renderer"));
        sim.push(MovingEntity::new("boom", config(30.0, 30.0, 0.0, 0.0), boom));

        let mut surface = TraceSurface::new(100.0, 100.0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sim.frame(&mut surface);
        }));
        assert!(result.is_err());
        assert!(surface.saved.is_empty());
        assert_eq!(surface.offset, Vec2::ZERO);
    }

    #[test]
    fn every_frame_is_announced_to_the_surface() {
        let mut sim = SimulationLoop::new();
        sim.push(MovingEntity::new("circle", config(5.0, 5.0, 1.0, 1.0), Renderer::Circle));
        let mut surface = TraceSurface::new(100.0, 100.0);
        for _ in 0..3 {
            sim.frame(&mut surface);
        }
        assert_eq!(surface.frames_begun, 3);
        assert_eq!(sim.tick(), 3);
    }

    #[test]
    fn push_after_frame_is_drawn_next_frame() {
        let mut sim = SimulationLoop::new();
        let mut surface = TraceSurface::new(100.0, 100.0);
        sim.frame(&mut surface);
        assert!(surface.drawn.is_empty());

        sim.push(MovingEntity::new("circle", config(5.0, 5.0, 0.0, 0.0), Renderer::Circle));
        sim.frame(&mut surface);
        assert_eq!(surface.drawn.len(), 1);
    }
}
