//! Unit tests for Scene
//!
//! Covers construction validation, insert/remove/update bookkeeping, and
//! edge derivation through the chunk index and occlusion oracle.

use glam::Vec3;
use crate::scene::drawable::{Aabb, DrawableKey};
use crate::scene::mock_drawable::{MockDrawable, MockTarget};
use crate::scene::projector::LinearProjector;
use crate::scene::scene::{Scene, SceneConfig};

fn side_on_scene(chunk_size: i32) -> Scene {
    Scene::new(SceneConfig {
        chunk_size,
        projector: Box::new(LinearProjector::side_on()),
    })
    .unwrap()
}

fn boxed(name: &str, min: Vec3, max: Vec3) -> Box<MockDrawable> {
    Box::new(MockDrawable::new(name, Aabb::new(min, max)))
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_scene_new_valid_config() {
    let scene = side_on_scene(16);
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
}

#[test]
fn test_scene_new_rejects_zero_chunk_size() {
    let result = Scene::new(SceneConfig {
        chunk_size: 0,
        projector: Box::new(LinearProjector::top_down()),
    });
    assert!(result.is_err());
}

#[test]
fn test_scene_new_rejects_negative_chunk_size() {
    let result = Scene::new(SceneConfig {
        chunk_size: -8,
        projector: Box::new(LinearProjector::top_down()),
    });
    assert!(result.is_err());
}

// ============================================================================
// INSERT / REMOVE
// ============================================================================

#[test]
fn test_insert_registers_everywhere() {
    let mut scene = side_on_scene(16);
    let key = scene.insert(boxed("a", Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0)));

    assert_eq!(scene.len(), 1);
    assert!(scene.contains(key));
    assert!(scene.graph().contains(key));
    assert!(scene.chunk_index().occupied_rect(key).is_some());
    assert_eq!(scene.insertion_order(), &[key]);
    assert!(scene.drawable(key).is_some());
    assert!(!scene.projected_rect(key).unwrap().is_empty());
}

#[test]
fn test_remove_leaves_no_trace() {
    let mut scene = side_on_scene(16);
    let a = scene.insert(boxed("a", Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0)));
    let b = scene.insert(boxed("b", Vec3::new(1.0, 1.0, 5.0), Vec3::new(5.0, 5.0, 9.0)));
    assert_eq!(scene.graph().edge_count(), 1);

    assert!(scene.remove(a));
    assert_eq!(scene.len(), 1);
    assert!(!scene.contains(a));
    assert!(!scene.graph().contains(a));
    assert!(scene.chunk_index().occupied_rect(a).is_none());
    assert_eq!(scene.graph().edge_count(), 0);
    assert_eq!(scene.insertion_order(), &[b]);
}

#[test]
fn test_remove_stale_key_is_noop() {
    let mut scene = side_on_scene(16);
    let key = scene.insert(boxed("a", Vec3::ZERO, Vec3::ONE));
    assert!(scene.remove(key));
    assert!(!scene.remove(key));
    assert!(!scene.remove(DrawableKey::default()));
}

#[test]
fn test_clear_empties_all_structures() {
    let mut scene = side_on_scene(16);
    scene.insert(boxed("a", Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0)));
    scene.insert(boxed("b", Vec3::new(1.0, 1.0, 5.0), Vec3::new(5.0, 5.0, 9.0)));

    scene.clear();
    assert!(scene.is_empty());
    assert_eq!(scene.graph().vertex_count(), 0);
    assert!(scene.chunk_index().is_empty());
    assert!(scene.insertion_order().is_empty());
}

// ============================================================================
// EDGE DERIVATION
// ============================================================================

#[test]
fn test_stacked_boxes_produce_far_to_near_edges() {
    // Side-on projection, sign (0, 1): larger Z is nearer the viewer.
    // Three unit boxes stacked along Z, overlapping on screen. Inserted
    // near-to-far; edges must still run far-to-near.
    let mut scene = side_on_scene(16);
    let a = scene.insert(boxed("a", Vec3::new(0.0, 0.0, 2.0), Vec3::new(4.0, 4.0, 3.0)));
    let b = scene.insert(boxed("b", Vec3::new(0.0, 0.0, 1.0), Vec3::new(4.0, 4.0, 2.0)));
    let c = scene.insert(boxed("c", Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 4.0, 1.0)));

    assert!(scene.graph().has_edge(c, b));
    assert!(scene.graph().has_edge(b, a));
    // Transitive edge is also derived: c and a overlap on screen too.
    assert!(scene.graph().has_edge(c, a));
    assert!(!scene.graph().has_edge(a, b));
    assert!(!scene.graph().has_edge(b, c));
}

#[test]
fn test_distant_drawables_get_no_edges() {
    // Far apart on screen: different chunks, never even reach the oracle.
    let mut scene = side_on_scene(16);
    scene.insert(boxed("a", Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0)));
    scene.insert(boxed("b", Vec3::new(500.0, 0.0, 0.0), Vec3::new(504.0, 4.0, 4.0)));

    assert_eq!(scene.graph().edge_count(), 0);
}

#[test]
fn test_same_chunk_but_disjoint_rects_get_no_edge() {
    // Both land in chunk (0, 0) with a 64-unit grid, but their projected
    // rectangles do not overlap, so no ordering is needed.
    let mut scene = side_on_scene(64);
    scene.insert(boxed("a", Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0)));
    scene.insert(boxed("b", Vec3::new(20.0, 20.0, 0.0), Vec3::new(24.0, 24.0, 4.0)));

    assert_eq!(scene.graph().edge_count(), 0);
}

#[test]
fn test_empty_bounds_constrain_nothing() {
    let mut scene = side_on_scene(16);
    let a = scene.insert(boxed("a", Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0)));
    // Degenerate box (zero extent on every axis).
    let b = scene.insert(boxed("b", Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0)));

    assert!(scene.contains(b));
    assert_eq!(scene.graph().edge_count(), 0);
    assert!(scene.chunk_index().occupied_rect(b).is_none());
    let _ = a;
}

#[test]
fn test_malformed_bounds_treated_as_empty() {
    let mut scene = side_on_scene(16);
    let bad = scene.insert(boxed(
        "bad",
        Vec3::new(5.0, 5.0, 5.0),
        Vec3::new(-5.0, -5.0, -5.0),
    ));
    assert!(scene.contains(bad));
    assert!(scene.chunk_index().occupied_rect(bad).is_none());
    assert_eq!(scene.graph().edge_count(), 0);
}

// ============================================================================
// UPDATE
// ============================================================================

#[test]
fn test_update_rederives_edges() {
    let mut scene = side_on_scene(16);
    let a = scene.insert(boxed("a", Vec3::new(0.0, 0.0, 1.0), Vec3::new(4.0, 4.0, 2.0)));

    // b starts behind a.
    let b_drawable = boxed("b", Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 4.0, 1.0));
    let bounds = b_drawable.bounds_handle();
    let b = scene.insert(b_drawable);
    assert!(scene.graph().has_edge(b, a));

    // Move b in front of a and update; the edge must flip.
    bounds.set(Aabb::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(4.0, 4.0, 3.0)));
    assert!(scene.update(b));
    assert!(scene.graph().has_edge(a, b));
    assert!(!scene.graph().has_edge(b, a));
}

#[test]
fn test_update_moves_chunk_occupancy() {
    let mut scene = side_on_scene(16);
    let drawable = boxed("a", Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0));
    let bounds = drawable.bounds_handle();
    let key = scene.insert(drawable);
    let before = scene.chunk_index().occupied_rect(key).unwrap();

    bounds.set(Aabb::new(
        Vec3::new(100.0, 100.0, 0.0),
        Vec3::new(104.0, 104.0, 4.0),
    ));
    assert!(scene.update(key));
    let after = scene.chunk_index().occupied_rect(key).unwrap();
    assert_ne!(before, after);
}

#[test]
fn test_update_stale_key_is_noop() {
    let mut scene = side_on_scene(16);
    let key = scene.insert(boxed("a", Vec3::ZERO, Vec3::ONE));
    scene.remove(key);
    assert!(!scene.update(key));
}

#[test]
fn test_middle_removal_leaves_remaining_order_intact() {
    // [far, mid, near] stacked along Z; removing mid keeps far -> near.
    let mut scene = side_on_scene(16);
    let far = scene.insert(boxed("far", Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 4.0, 1.0)));
    let mid = scene.insert(boxed("mid", Vec3::new(0.0, 0.0, 1.0), Vec3::new(4.0, 4.0, 2.0)));
    let near = scene.insert(boxed("near", Vec3::new(0.0, 0.0, 2.0), Vec3::new(4.0, 4.0, 3.0)));

    scene.remove(mid);

    assert!(scene.graph().has_edge(far, near));
    let mut target = MockTarget::new();
    scene.draw(&mut target).unwrap();
    assert_eq!(target.names(), vec!["far", "near"]);
}
