//! Drawable types for the scene system.
//!
//! A Drawable is any scene object participating in draw-order resolution.
//! The engine only sees its capability surface: a 3D bounding box, a render
//! method, and optional hidden/parent/transform behavior. Identity is the
//! SlotMap key handed out at insertion.

use std::any::Any;
use glam::{Affine2, IVec2, Vec3};
use slotmap::new_key_type;
use bitflags::bitflags;
use crate::error::Result;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Drawable within a Scene.
    ///
    /// Keys remain valid even after other drawables are removed.
    /// A key becomes invalid only when its own drawable is removed.
    /// Parent back-references are stored as keys, never as references,
    /// so a removed ancestor simply ends the chain instead of dangling.
    pub struct DrawableKey;
}

// ===== AABB =====

/// Axis-Aligned Bounding Box in world space
///
/// Drives both chunk placement (via projection) and pairwise occlusion
/// testing. A box that is malformed (min > max on some axis) or has a
/// degenerate extent is treated as empty: it occupies no chunks and
/// never generates draw-order edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl Aabb {
    /// Construct from corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Whether min <= max holds on every axis.
    pub fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Whether this box is empty (malformed, NaN, or zero extent on any axis).
    ///
    /// An empty box cannot occlude anything.
    pub fn is_empty(&self) -> bool {
        !(self.min.x < self.max.x && self.min.y < self.max.y && self.min.z < self.max.z)
    }

    /// Test if this AABB strictly overlaps another on all three axes.
    ///
    /// Exactly touching faces count as non-overlapping.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
            && self.min.y < other.max.y && self.max.y > other.min.y
            && self.min.z < other.max.z && self.max.z > other.min.z
    }
}

// ===== SCREEN RECT =====

/// Integer screen-space rectangle, min inclusive, max exclusive.
///
/// Produced by a Projector from a world-space AABB; consumed by the chunk
/// index for cell placement and by the pairwise pre-filter before the
/// occlusion oracle runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    /// Top-left corner (inclusive)
    pub min: IVec2,
    /// Bottom-right corner (exclusive)
    pub max: IVec2,
}

impl ScreenRect {
    /// The empty rectangle
    pub const EMPTY: ScreenRect = ScreenRect {
        min: IVec2::ZERO,
        max: IVec2::ZERO,
    };

    /// Construct from corners
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Whether this rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Test if two rectangles overlap by at least one pixel.
    ///
    /// Shared edges (zero-width overlap) count as non-overlapping, and an
    /// empty rectangle overlaps nothing.
    pub fn overlaps(&self, other: &ScreenRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x && self.max.x > other.min.x
            && self.min.y < other.max.y && self.max.y > other.min.y
    }
}

// ===== CAPABILITIES =====

bitflags! {
    /// Optional behaviors a Drawable supports.
    ///
    /// Resolved once at insertion time and cached by the Scene, so the
    /// per-frame walker never re-probes the trait object for behaviors the
    /// drawable declared it does not have.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// `hidden()` is meaningful and may change between frames
        const HIDER       = 1 << 0;
        /// `local_transform()` is meaningful (non-identity)
        const TRANSFORMER = 1 << 1;
        /// `parent()` is meaningful; inherited state flows from it
        const PARENTED    = 1 << 2;
    }
}

// ===== RENDER TARGET =====

/// Opaque render destination handed through to `Drawable::render`.
///
/// The engine never draws pixels itself; it only sequences drawables and
/// forwards the target. Concrete drawables downcast via `as_any_mut` to
/// reach the surface they know how to blit to.
pub trait RenderTarget {
    /// Downcast support for concrete drawable implementations
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===== DRAWABLE =====

/// A scene object participating in draw-order resolution.
///
/// Implementations own their visual state; the Scene owns the objects
/// themselves (`Box<dyn Drawable>`) and addresses them by [`DrawableKey`].
/// The trait is deliberately not `Send + Sync`: scene mutation and
/// traversal are strictly sequenced on one thread.
pub trait Drawable {
    /// Current world-space bounding box.
    ///
    /// May change between frames; call [`crate::scene::Scene::update`]
    /// afterwards so chunk occupancy matches before the next draw.
    fn bounding_box(&self) -> Aabb;

    /// Render this drawable with its resolved cumulative transform.
    fn render(&self, transform: &Affine2, target: &mut dyn RenderTarget) -> Result<()>;

    /// Nearest ancestor in the scene hierarchy, if any.
    fn parent(&self) -> Option<DrawableKey> {
        None
    }

    /// Whether this drawable (and its descendants) should be skipped.
    fn hidden(&self) -> bool {
        false
    }

    /// Local 2D transform composed onto the inherited one.
    fn local_transform(&self) -> Affine2 {
        Affine2::IDENTITY
    }

    /// Which optional behaviors this drawable supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }
}

#[cfg(test)]
#[path = "drawable_tests.rs"]
mod tests;
