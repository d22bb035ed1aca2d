//! Projection strategies.
//!
//! A Projector maps world-space AABBs into integer screen-space rectangles
//! and exposes the on-screen direction increasing Z projects toward. Both
//! chunk placement and the pairwise overlap pre-filter depend on it, so a
//! projector must be a pure function of its configuration: the same box
//! must always land in the same cells.

use glam::{IVec2, Vec3};
use super::drawable::{Aabb, ScreenRect};

/// Strategy mapping 3D bounds to 2D screen space.
///
/// `&self` only; projection is stateless and deterministic.
pub trait Projector: Send + Sync {
    /// On-screen direction increasing Z projects toward, per axis in
    /// {-1, 0, +1}. (0, 0) means Z has no on-screen footprint (top-down).
    fn sign(&self) -> IVec2;

    /// Screen-space bounding rectangle of a world-space box.
    ///
    /// Empty boxes must project to an empty rectangle.
    fn project(&self, aabb: &Aabb) -> ScreenRect;
}

/// Linear projector: screen coordinates are dot products with two axes.
///
/// `screen = (dot(x_axis, p), dot(y_axis, p))` for a world point `p`.
/// Covers top-down, side-on, and classic 2:1 dimetric layouts; the screen
/// Y axis points downward.
pub struct LinearProjector {
    x_axis: Vec3,
    y_axis: Vec3,
}

impl LinearProjector {
    /// Create a projector from explicit screen axes
    pub fn new(x_axis: Vec3, y_axis: Vec3) -> Self {
        Self { x_axis, y_axis }
    }

    /// Top-down view: world X/Y map straight to screen, Z is pure depth.
    pub fn top_down() -> Self {
        Self::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0))
    }

    /// Side-on view: Z shifts objects down the screen as they come nearer.
    ///
    /// `sign()` is (0, 1).
    pub fn side_on() -> Self {
        Self::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0))
    }

    /// Classic 2:1 dimetric layout: height (Z) moves objects up the screen.
    ///
    /// `sign()` is (0, -1).
    pub fn dimetric() -> Self {
        Self::new(Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.5, 0.5, -1.0))
    }

    /// Min/max screen extent of a box along one screen axis.
    ///
    /// Accumulates each world axis' contribution separately (the Arvo
    /// method for transformed AABBs, reduced to a single output row),
    /// avoiding the eight-corner sweep.
    fn extent(axis: Vec3, aabb: &Aabb) -> (f32, f32) {
        let mut lo = 0.0_f32;
        let mut hi = 0.0_f32;
        for i in 0..3 {
            let a = axis[i] * aabb.min[i];
            let b = axis[i] * aabb.max[i];
            lo += a.min(b);
            hi += a.max(b);
        }
        (lo, hi)
    }
}

impl Projector for LinearProjector {
    fn sign(&self) -> IVec2 {
        IVec2::new(
            if self.x_axis.z > 0.0 { 1 } else if self.x_axis.z < 0.0 { -1 } else { 0 },
            if self.y_axis.z > 0.0 { 1 } else if self.y_axis.z < 0.0 { -1 } else { 0 },
        )
    }

    fn project(&self, aabb: &Aabb) -> ScreenRect {
        if aabb.is_empty() {
            return ScreenRect::EMPTY;
        }

        let (x0, x1) = Self::extent(self.x_axis, aabb);
        let (y0, y1) = Self::extent(self.y_axis, aabb);

        ScreenRect::new(
            IVec2::new(x0.floor() as i32, y0.floor() as i32),
            IVec2::new(x1.ceil() as i32, y1.ceil() as i32),
        )
    }
}

#[cfg(test)]
#[path = "projector_tests.rs"]
mod tests;
