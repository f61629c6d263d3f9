use crate::surface::{Surface, TransformScope};
use glam::Vec2;
use std::fmt;
use std::sync::Arc;
use voxshape_common::Rgb;

/// Signature of a user-supplied shape routine: surface, size, color.
pub type RenderFn = dyn Fn(&mut dyn Surface, f32, Rgb) + Send + Sync;

/// Draws one shape kind around the local origin.
///
/// Cloning is cheap; `Custom` shares its closure. Two renderers are equal
/// when they are the same built-in or share the same closure allocation.
#[derive(Clone)]
pub enum Renderer {
    Circle,
    Square,
    Triangle,
    Dinosaur,
    Custom(Arc<RenderFn>),
}

impl Renderer {
    /// Wrap a closure as a custom renderer.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Surface, f32, Rgb) + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Draw at the local origin of `surface` with the given size and color.
    pub fn render(&self, surface: &mut dyn Surface, size: f32, color: Rgb) {
        match self {
            Self::Circle => {
                surface.fill(color);
                surface.ellipse(Vec2::ZERO, size, size);
            }
            Self::Square => {
                surface.fill(color);
                surface.rect(Vec2::ZERO, size, size);
            }
            Self::Triangle => {
                surface.fill(color);
                let h = size * 3f32.sqrt() / 2.0;
                surface.triangle(
                    Vec2::new(0.0, -h / 2.0),
                    Vec2::new(-size / 2.0, h / 2.0),
                    Vec2::new(size / 2.0, h / 2.0),
                );
            }
            Self::Dinosaur => {
                surface.fill(color);
                draw_dinosaur(surface, size / 50.0);
            }
            Self::Custom(f) => f(surface, size, color),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Dinosaur => "dinosaur",
            Self::Custom(_) => "custom",
        }
    }
}

/// Body, head, tail and two legs, scaled from a 50px reference size.
fn draw_dinosaur(surface: &mut dyn Surface, s: f32) {
    surface.ellipse(Vec2::ZERO, 40.0 * s, 20.0 * s);
    {
        let mut head = TransformScope::new(surface);
        head.translate(Vec2::new(15.0 * s, -10.0 * s));
        head.ellipse(Vec2::ZERO, 20.0 * s, 15.0 * s);
        head.rect(Vec2::new(-15.0 * s, 0.0), 15.0 * s, 5.0 * s);
    }
    {
        let mut tail = TransformScope::new(surface);
        tail.translate(Vec2::new(-20.0 * s, 0.0));
        tail.rotate(-0.2);
        tail.rect(Vec2::ZERO, 25.0 * s, 5.0 * s);
    }
    surface.rect(Vec2::new(-10.0 * s, 10.0 * s), 5.0 * s, 15.0 * s);
    surface.rect(Vec2::new(10.0 * s, 10.0 * s), 5.0 * s, 15.0 * s);
}

impl PartialEq for Renderer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            (Self::Custom(_), _) | (_, Self::Custom(_)) => false,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(func) => write!(f, "Custom({:p})", Arc::as_ptr(func)),
            other => f.write_str(other.kind()),
        }
    }
}
