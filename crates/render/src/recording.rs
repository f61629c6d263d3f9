use glam::{Affine2, Vec2};
use voxshape_common::{Bounds, Rgb};
use voxshape_shapes::Surface;

/// One primitive, resolved to canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Ellipse {
        center: Vec2,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Rect {
        center: Vec2,
        width: f32,
        height: f32,
        rotation: f32,
        color: Rgb,
    },
    Triangle {
        vertices: [Vec2; 3],
        color: Rgb,
    },
}

impl DrawCommand {
    /// Anchor point in canvas coordinates (centroid for triangles).
    pub fn anchor(&self) -> Vec2 {
        match self {
            Self::Ellipse { center, .. } | Self::Rect { center, .. } => *center,
            Self::Triangle { vertices, .. } => (vertices[0] + vertices[1] + vertices[2]) / 3.0,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Ellipse { color, .. } | Self::Rect { color, .. } | Self::Triangle { color, .. } => {
                *color
            }
        }
    }
}

/// Headless surface that records the primitives of the current frame.
///
/// Local coordinates are mapped through an `Affine2` transform stack.
/// Sizes are recorded unscaled; only translation and rotation are supported.
/// `begin_frame` discards the previous frame's commands, so memory stays
/// bounded by one frame; `total_commands` keeps the running count.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    bounds: Bounds,
    transform: Affine2,
    stack: Vec<Affine2>,
    fill: Rgb,
    commands: Vec<DrawCommand>,
    total: u64,
}

impl RecordingSurface {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            fill: Rgb::new(255, 255, 255),
            commands: Vec::new(),
            total: 0,
        }
    }

    /// Change the canvas size, as a window resize would.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Primitives recorded since the surface was created, across all frames.
    pub fn total_commands(&self) -> u64 {
        self.total
    }

    /// Take the recorded commands, leaving the surface ready for the next frame.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of transforms currently pushed.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn rotation(&self) -> f32 {
        let x_axis = self.transform.matrix2.x_axis;
        x_axis.y.atan2(x_axis.x)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.bounds.width
    }

    fn height(&self) -> f32 {
        self.bounds.height
    }

    fn fill(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn ellipse(&mut self, center: Vec2, width: f32, height: f32) {
        self.total += 1;
        self.commands.push(DrawCommand::Ellipse {
            center: self.transform.transform_point2(center),
            width,
            height,
            color: self.fill,
        });
    }

    fn rect(&mut self, center: Vec2, width: f32, height: f32) {
        self.total += 1;
        self.commands.push(DrawCommand::Rect {
            center: self.transform.transform_point2(center),
            width,
            height,
            rotation: self.rotation(),
            color: self.fill,
        });
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        let t = self.transform;
        self.total += 1;
        self.commands.push(DrawCommand::Triangle {
            vertices: [
                t.transform_point2(a),
                t.transform_point2(b),
                t.transform_point2(c),
            ],
            color: self.fill,
        });
    }

    fn push_transform(&mut self) {
        self.stack.push(self.transform);
    }

    fn pop_transform(&mut self) {
        match self.stack.pop() {
            Some(t) => self.transform = t,
            None => tracing::warn!("pop_transform with empty stack"),
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self.transform * Affine2::from_angle(radians);
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
    }
}
