//! Topological draw walker.
//!
//! Linearizes the DrawGraph once per frame with Kahn's algorithm and
//! renders each visible drawable in that order. Inherited hidden state and
//! cumulative 2D transforms are resolved along parent chains during the
//! walk, memoized in a frame-local cache so siblings sharing an ancestor
//! pay for the chain walk once. The cache lives exactly one walk; bounds
//! and flags may change between frames, so nothing is carried over.

use std::collections::VecDeque;
use glam::Affine2;
use rustc_hash::{FxHashMap, FxHashSet};
use crate::error::Result;
use crate::engine_warn;
use super::drawable::{Capabilities, DrawableKey, RenderTarget};
use super::scene::Scene;

/// Resolved per-drawable state for one frame.
#[derive(Debug, Clone, Copy)]
struct ResolvedState {
    /// Effective hidden flag (own OR any ancestor's)
    hidden: bool,
    /// Cumulative transform, composed outermost-to-innermost
    transform: Affine2,
}

const ROOT_STATE: ResolvedState = ResolvedState {
    hidden: false,
    transform: Affine2::IDENTITY,
};

/// Frame-local memo of resolved ancestor state.
struct FrameCache {
    resolved: FxHashMap<DrawableKey, ResolvedState>,
}

impl FrameCache {
    fn new() -> Self {
        Self {
            resolved: FxHashMap::default(),
        }
    }

    /// Resolve `{hidden, transform}` for `key`, memoizing every ancestor
    /// touched on the way.
    ///
    /// Climbs the parent chain until a cached ancestor (or the chain's end)
    /// is found, then unwinds, composing state outermost-to-innermost.
    /// Stale parent keys terminate the chain as if the drawable were a
    /// root; so does a malformed parent cycle.
    fn resolve(&mut self, scene: &Scene, key: DrawableKey) -> ResolvedState {
        let mut chain: Vec<DrawableKey> = Vec::new();
        let mut current = key;

        let mut base = loop {
            if let Some(&state) = self.resolved.get(&current) {
                break state;
            }
            let Some(entry) = scene.entry(current) else {
                // Parent was removed from the scene; treat as chain end.
                break ROOT_STATE;
            };
            if chain.contains(&current) {
                // Parent cycle; bail out rather than climb forever.
                break ROOT_STATE;
            }
            chain.push(current);

            match entry.parent_key() {
                Some(parent) if entry.caps().contains(Capabilities::PARENTED) => {
                    current = parent;
                }
                _ => break ROOT_STATE,
            }
        };

        for &link in chain.iter().rev() {
            // Entries on the chain were looked up above; they exist.
            if let Some(entry) = scene.entry(link) {
                let hidden = base.hidden
                    || (entry.caps().contains(Capabilities::HIDER) && entry.drawable().hidden());
                let transform = if entry.caps().contains(Capabilities::TRANSFORMER) {
                    base.transform * entry.drawable().local_transform()
                } else {
                    base.transform
                };
                base = ResolvedState { hidden, transform };
                self.resolved.insert(link, base);
            }
        }

        base
    }
}

/// Per-frame linearization and rendering pass over a Scene.
///
/// `&self` because walking is stateless; all per-frame state lives in the
/// FrameCache created inside `walk`.
pub struct DrawWalker;

impl DrawWalker {
    pub fn new() -> Self {
        Self
    }

    /// Run one full pass: topological order, hidden/transform propagation,
    /// render calls.
    ///
    /// Every live drawable is visited exactly once. If the occlusion
    /// relation contains a cycle, its members are appended in scene
    /// insertion order after the acyclic part, so no object is ever
    /// dropped from rendering.
    pub fn walk(&self, scene: &Scene, target: &mut dyn RenderTarget) -> Result<()> {
        let graph = scene.graph();
        let order = scene.insertion_order();

        let mut in_degree: FxHashMap<DrawableKey, usize> = FxHashMap::default();
        let mut queue: VecDeque<DrawableKey> = VecDeque::new();
        for &key in order {
            let degree = graph.in_degree(key);
            in_degree.insert(key, degree);
            if degree == 0 {
                queue.push_back(key);
            }
        }

        let mut cache = FrameCache::new();
        let mut visited: FxHashSet<DrawableKey> = FxHashSet::default();

        while let Some(key) = queue.pop_front() {
            visited.insert(key);
            self.visit(scene, &mut cache, key, target)?;

            for succ in graph.out_neighbors(key) {
                if let Some(degree) = in_degree.get_mut(&succ) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(succ);
                    }
                }
            }
        }

        // Cycle members never reach in-degree 0; append them in insertion
        // order so the frame stays complete.
        if visited.len() < order.len() {
            engine_warn!(
                "strata::DrawWalker",
                "occlusion cycle detected: {} drawable(s) appended in insertion order",
                order.len() - visited.len()
            );
            for &key in order {
                if !visited.contains(&key) {
                    visited.insert(key);
                    self.visit(scene, &mut cache, key, target)?;
                }
            }
        }

        Ok(())
    }

    /// Visit one vertex: resolve inherited state, render unless hidden.
    fn visit(
        &self,
        scene: &Scene,
        cache: &mut FrameCache,
        key: DrawableKey,
        target: &mut dyn RenderTarget,
    ) -> Result<()> {
        let state = cache.resolve(scene, key);
        if state.hidden {
            // Hidden drawables still count as visited for ordering purposes.
            return Ok(());
        }
        match scene.entry(key) {
            Some(entry) => entry.drawable().render(&state.transform, target),
            None => Ok(()),
        }
    }
}

impl Default for DrawWalker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
