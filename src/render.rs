//! Drawing-surface contract and the line renderer for a cloth mesh.

use crate::float::Float;
use crate::mesh::ClothMesh;

/// Color and width used to stroke the cloth.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Any CSS-style color string the surface understands.
    pub color: String,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle {
            color: String::from("#888"),
            width: 1.0,
        }
    }
}

/// Minimal 2D path API the renderer needs from a host surface.
///
/// A browser canvas context maps onto this one call per method.
pub trait Surface<F: Float> {
    fn clear_rect(&mut self, x: F, y: F, width: F, height: F);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: F, y: F);
    fn line_to(&mut self, x: F, y: F);
    fn stroke(&mut self, style: &StrokeStyle);
}

impl<F: Float> ClothMesh<F> {
    /// Add every live constraint to one path and stroke it once.
    pub fn draw<S: Surface<F>>(&self, surface: &mut S, style: &StrokeStyle) {
        surface.begin_path();
        for (a, b) in self.segments() {
            surface.move_to(a.x, a.y);
            surface.line_to(b.x, b.y);
        }
        surface.stroke(style);
    }

    /// Clear the area covered by the bounds plus the 1-unit margin.
    pub fn clear<S: Surface<F>>(&self, surface: &mut S) {
        let bounds = self.bounds();
        surface.clear_rect(F::zero(), F::zero(), bounds.x + F::one(), bounds.y + F::one());
    }
}
