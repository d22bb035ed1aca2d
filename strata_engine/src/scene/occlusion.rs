//! Pairwise occlusion oracle.
//!
//! Decides whether one drawable's box must be painted strictly before
//! another's under the active projection. The caller is responsible for
//! the screen-rectangle overlap pre-filter: two boxes whose projected
//! rectangles do not overlap need no ordering at all.

use glam::IVec2;
use super::drawable::Aabb;

/// Effective depth sign for a projector sign vector.
///
/// The vertical component dominates, then horizontal. A projector with no
/// on-screen Z footprint (top-down) defaults to +1: larger Z is nearer.
fn depth_sign(sign: IVec2) -> i32 {
    if sign.y != 0 {
        sign.y
    } else if sign.x != 0 {
        sign.x
    } else {
        1
    }
}

/// `a` entirely farther from the viewer than `b` along the depth axis.
///
/// Exactly touching Z faces count as separated, so two boxes stacked flush
/// against each other still get a definite order.
fn strictly_farther(a: &Aabb, b: &Aabb, s: i32) -> bool {
    if s > 0 {
        a.max.z <= b.min.z
    } else {
        a.min.z >= b.max.z
    }
}

/// Must `a` be drawn strictly before `b`?
///
/// Decision policy, first matching rule wins:
/// 1. `a` entirely beyond `b` in depth: `a` first.
/// 2. `b` entirely beyond `a` in depth: not before (the caller evaluates
///    the swapped direction itself).
/// 3. Depth overlap: the box whose vertical extent lies entirely above the
///    other draws first (screen position stands in for depth on ties).
/// 4. Otherwise the pair is unconstrained.
///
/// The relation is irreflexive and empty boxes are never ordered.
pub fn must_draw_before(a: &Aabb, b: &Aabb, sign: IVec2) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let s = depth_sign(sign);
    if strictly_farther(a, b, s) {
        return true;
    }
    if strictly_farther(b, a, s) {
        return false;
    }

    // Depth overlap: world Y grows toward the viewer's screen bottom, so a
    // box ending above the other's top sits behind it.
    a.max.y <= b.min.y
}
