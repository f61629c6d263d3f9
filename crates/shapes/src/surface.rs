use glam::Vec2;
use std::ops::{Deref, DerefMut};
use voxshape_common::{Bounds, Rgb};

/// Drawing primitives consumed by shape renderers.
///
/// Coordinates are interpreted in the current local frame, which is the
/// canvas frame modified by every `translate`/`rotate` since the enclosing
/// `push_transform`.
pub trait Surface {
    /// Current canvas width in pixels.
    fn width(&self) -> f32;

    /// Current canvas height in pixels.
    fn height(&self) -> f32;

    /// Set the fill color for subsequent primitives.
    fn fill(&mut self, color: Rgb);

    /// Filled ellipse centered at `center`.
    fn ellipse(&mut self, center: Vec2, width: f32, height: f32);

    /// Filled axis-aligned rectangle centered at `center`.
    fn rect(&mut self, center: Vec2, width: f32, height: f32);

    /// Filled triangle through three vertices.
    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2);

    /// Save the current transform.
    fn push_transform(&mut self);

    /// Restore the most recently saved transform.
    fn pop_transform(&mut self);

    fn translate(&mut self, offset: Vec2);

    /// Rotate the local frame by `radians`.
    fn rotate(&mut self, radians: f32);

    fn bounds(&self) -> Bounds {
        Bounds::new(self.width(), self.height())
    }

    /// Called once at the start of every simulation frame, before anything
    /// is drawn. Surfaces that keep per-frame state reset it here.
    fn begin_frame(&mut self) {}
}

/// A pushed transform that is popped when the scope is dropped.
///
/// The pop also runs while unwinding, so a panicking renderer cannot leave
/// the surface in a translated frame.
pub struct TransformScope<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> TransformScope<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.push_transform();
        Self { surface }
    }
}

impl<'a> Deref for TransformScope<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for TransformScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.surface.pop_transform();
    }
}
