//! Scene: the draw-order resolution engine's external surface.
//!
//! Owns the drawables (behind stable SlotMap keys), the chunk index, and
//! the draw graph, and keeps the three consistent through every insert,
//! update, and removal. Mutation and traversal are strictly sequenced:
//! callers mutate between frames, then run one `draw` pass.

use slotmap::SlotMap;
use crate::error::Result;
use crate::{engine_debug, engine_err};
use super::chunk_index::ChunkIndex;
use super::draw_graph::DrawGraph;
use super::drawable::{Aabb, Capabilities, Drawable, DrawableKey, RenderTarget, ScreenRect};
use super::occlusion::must_draw_before;
use super::projector::Projector;
use super::walker::DrawWalker;

/// Configuration accepted at Scene construction.
pub struct SceneConfig {
    /// Chunk cell edge length in screen units. Larger cells mean fewer
    /// cells per object but bigger candidate sets.
    pub chunk_size: i32,
    /// Projection defining screen placement and depth semantics
    pub projector: Box<dyn Projector>,
}

/// A drawable plus the state the engine derived for it at registration.
pub(crate) struct DrawableEntry {
    drawable: Box<dyn Drawable>,
    /// Capability snapshot taken at insertion
    caps: Capabilities,
    /// Bounding box as of the last (re-)registration
    bounds: Aabb,
    /// Projected rectangle matching `bounds`
    rect: ScreenRect,
}

impl DrawableEntry {
    pub(crate) fn drawable(&self) -> &dyn Drawable {
        self.drawable.as_ref()
    }

    pub(crate) fn caps(&self) -> Capabilities {
        self.caps
    }

    /// Live parent lookup (back-reference, never ownership)
    pub(crate) fn parent_key(&self) -> Option<DrawableKey> {
        self.drawable.parent()
    }
}

/// The draw-order resolution engine.
pub struct Scene {
    /// Drawables stored behind stable keys
    drawables: SlotMap<DrawableKey, DrawableEntry>,
    /// Keys in insertion order; the stable tie-break for walker seeding
    /// and cycle fallback
    insertion_order: Vec<DrawableKey>,
    /// Screen-space grid restricting candidate discovery to neighbors
    chunk_index: ChunkIndex,
    /// The "draws before" partial order
    graph: DrawGraph,
    projector: Box<dyn Projector>,
    walker: DrawWalker,
}

impl Scene {
    /// Create an empty scene.
    ///
    /// Fails with `InvalidConfig` if the chunk size is not strictly
    /// positive; the index cannot be rebuilt with a different granularity
    /// later.
    pub fn new(config: SceneConfig) -> Result<Self> {
        if config.chunk_size <= 0 {
            return Err(engine_err!(
                "strata::Scene",
                InvalidConfig,
                "chunk size must be strictly positive, got {}",
                config.chunk_size
            ));
        }

        engine_debug!(
            "strata::Scene",
            "Scene created (chunk size {})",
            config.chunk_size
        );

        Ok(Self {
            drawables: SlotMap::with_key(),
            insertion_order: Vec::new(),
            chunk_index: ChunkIndex::new(config.chunk_size),
            graph: DrawGraph::new(),
            projector: config.projector,
            walker: DrawWalker::new(),
        })
    }

    /// Add a drawable to the scene.
    ///
    /// Projects its bounds, registers it in the chunk index, and runs the
    /// occlusion oracle against the spatially local candidate set to
    /// derive draw-order edges. A malformed bounding box is treated as
    /// empty: the drawable still renders, but it occupies no chunks and
    /// constrains nothing.
    pub fn insert(&mut self, drawable: Box<dyn Drawable>) -> DrawableKey {
        let bounds = drawable.bounding_box();
        let rect = self.projector.project(&bounds);
        let caps = drawable.capabilities();

        let key = self.drawables.insert(DrawableEntry {
            drawable,
            caps,
            bounds,
            rect,
        });
        self.insertion_order.push(key);
        self.graph.add_vertex(key);
        self.link(key);
        key
    }

    /// Remove a drawable, leaving no trace in any engine structure.
    ///
    /// Returns false (no-op) if the key is stale or was never inserted.
    pub fn remove(&mut self, key: DrawableKey) -> bool {
        if self.drawables.remove(key).is_none() {
            return false;
        }
        self.graph.remove_vertex(key);
        self.chunk_index.remove(key);
        self.insertion_order.retain(|&k| k != key);
        true
    }

    /// Re-derive chunk occupancy and incident edges after a drawable's
    /// bounding box changed.
    ///
    /// Equivalent to remove-then-reinsert, but the key (and with it every
    /// parent back-reference pointing at this drawable) stays valid.
    /// Returns false if the key is stale.
    pub fn update(&mut self, key: DrawableKey) -> bool {
        let Some(entry) = self.drawables.get_mut(key) else {
            return false;
        };
        let bounds = entry.drawable.bounding_box();
        entry.bounds = bounds;
        entry.rect = self.projector.project(&bounds);

        self.graph.remove_vertex(key);
        self.graph.add_vertex(key);
        self.link(key);
        true
    }

    /// Run one topological draw pass against the given target.
    pub fn draw(&self, target: &mut dyn RenderTarget) -> Result<()> {
        self.walker.walk(self, target)
    }

    /// Register `key` in the chunk index and derive edges against the
    /// candidate set.
    ///
    /// Candidates sharing a chunk but with non-overlapping projected
    /// rectangles are skipped before the oracle runs; a non-overlapping
    /// pair needs no ordering.
    fn link(&mut self, key: DrawableKey) {
        let (bounds, rect) = {
            let entry = &self.drawables[key];
            (entry.bounds, entry.rect)
        };

        let candidates = self.chunk_index.insert(key, &rect);
        let sign = self.projector.sign();

        for candidate in candidates {
            let Some(other) = self.drawables.get(candidate) else {
                continue;
            };
            if !rect.overlaps(&other.rect) {
                continue;
            }
            if must_draw_before(&other.bounds, &bounds, sign) {
                self.graph.add_edge(candidate, key);
            } else if must_draw_before(&bounds, &other.bounds, sign) {
                self.graph.add_edge(key, candidate);
            }
        }
    }

    /// Number of drawables in the scene
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Whether the scene holds no drawables
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Whether a key refers to a live drawable
    pub fn contains(&self, key: DrawableKey) -> bool {
        self.drawables.contains_key(key)
    }

    /// Borrow a drawable by key
    pub fn drawable(&self, key: DrawableKey) -> Option<&dyn Drawable> {
        self.drawables.get(key).map(|entry| entry.drawable.as_ref())
    }

    /// Projected screen rectangle recorded for a drawable
    pub fn projected_rect(&self, key: DrawableKey) -> Option<ScreenRect> {
        self.drawables.get(key).map(|entry| entry.rect)
    }

    /// Remove every drawable from the scene
    pub fn clear(&mut self) {
        self.drawables.clear();
        self.insertion_order.clear();
        self.chunk_index.clear();
        self.graph.clear();
    }

    /// The current draw-order graph
    pub fn graph(&self) -> &DrawGraph {
        &self.graph
    }

    /// The spatial chunk index
    pub fn chunk_index(&self) -> &ChunkIndex {
        &self.chunk_index
    }

    /// Keys in insertion order
    pub(crate) fn insertion_order(&self) -> &[DrawableKey] {
        &self.insertion_order
    }

    pub(crate) fn entry(&self, key: DrawableKey) -> Option<&DrawableEntry> {
        self.drawables.get(key)
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
