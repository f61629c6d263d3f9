use glam::Vec2;
use voxshape_common::{Bounds, EntityId, Rgb};
use voxshape_shapes::{Renderer, Surface, TransformScope};

/// Parameters for constructing a `MovingEntity`.
///
/// Every field is required. Choosing a velocity when the caller has none in
/// mind is the spawn pipeline's job, which draws each component at random.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityConfig {
    pub position: Vec2,
    pub size: f32,
    pub color: Rgb,
    pub velocity: Vec2,
}

/// A live shape bouncing around the canvas.
///
/// The renderer is captured at construction and never looked up again, so
/// the entity's visual kind is fixed for its lifetime.
#[derive(Debug, Clone)]
pub struct MovingEntity {
    id: EntityId,
    kind: String,
    position: Vec2,
    velocity: Vec2,
    size: f32,
    color: Rgb,
    renderer: Renderer,
}

impl MovingEntity {
    /// Build an entity from a resolved renderer. `kind` is the shape token
    /// the renderer was resolved under.
    pub fn new(kind: impl Into<String>, config: EntityConfig, renderer: Renderer) -> Self {
        Self {
            id: EntityId::new(),
            kind: kind.into(),
            position: config.position,
            velocity: config.velocity,
            size: config.size,
            color: config.color,
            renderer,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Advance one step, then reflect velocity on any axis now out of bounds.
    ///
    /// Position is not clamped: an entity past an edge stays there for this
    /// frame and heads back on the next.
    pub fn update(&mut self, bounds: Bounds) {
        self.position += self.velocity;
        if self.position.x < 0.0 || self.position.x > bounds.width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.height {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Draw with the local origin at the entity's position.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let mut scope = TransformScope::new(surface);
        scope.translate(self.position);
        self.renderer.render(&mut *scope, self.size, self.color);
    }
}
