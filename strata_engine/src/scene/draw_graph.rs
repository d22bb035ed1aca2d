//! DrawGraph: the "draws before" partial order as a dynamic digraph.
//!
//! Adjacency is stored twice, as in-edge and out-edge sets per vertex, so
//! edge insertion/removal is O(1) and vertex removal is O(degree). The
//! mirror invariant (`u` in `out[v]` iff `v` in `in[u]`) holds after every operation,
//! and every operation is idempotent.

use rustc_hash::{FxHashMap, FxHashSet};
use super::drawable::DrawableKey;

/// Directed graph over drawable keys. An edge `u -> v` means `u` must be
/// drawn strictly before `v`.
pub struct DrawGraph {
    /// Vertex -> set of predecessors (vertices drawn before it)
    edges_in: FxHashMap<DrawableKey, FxHashSet<DrawableKey>>,
    /// Vertex -> set of successors (vertices drawn after it)
    edges_out: FxHashMap<DrawableKey, FxHashSet<DrawableKey>>,
}

impl DrawGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            edges_in: FxHashMap::default(),
            edges_out: FxHashMap::default(),
        }
    }

    /// Ensure `v` exists with (possibly empty) in/out sets. Idempotent.
    pub fn add_vertex(&mut self, v: DrawableKey) {
        self.edges_in.entry(v).or_default();
        self.edges_out.entry(v).or_default();
    }

    /// Whether `v` is known to the graph
    pub fn contains(&self, v: DrawableKey) -> bool {
        self.edges_out.contains_key(&v)
    }

    /// Insert edge `u -> v`. Self-loops are refused; missing endpoints are
    /// created. Inserting an existing edge has no additional effect.
    pub fn add_edge(&mut self, u: DrawableKey, v: DrawableKey) {
        if u == v {
            return;
        }
        self.add_vertex(u);
        self.add_vertex(v);
        if let Some(set) = self.edges_out.get_mut(&u) {
            set.insert(v);
        }
        if let Some(set) = self.edges_in.get_mut(&v) {
            set.insert(u);
        }
    }

    /// Remove edge `u -> v`. No-op if absent.
    pub fn remove_edge(&mut self, u: DrawableKey, v: DrawableKey) {
        if let Some(set) = self.edges_out.get_mut(&u) {
            set.remove(&v);
        }
        if let Some(set) = self.edges_in.get_mut(&v) {
            set.remove(&u);
        }
    }

    /// Remove `v` and every incident edge, rewiring neighbor sets on the
    /// other side. O(degree(v)), idempotent.
    pub fn remove_vertex(&mut self, v: DrawableKey) {
        if let Some(preds) = self.edges_in.remove(&v) {
            for pred in preds {
                if let Some(set) = self.edges_out.get_mut(&pred) {
                    set.remove(&v);
                }
            }
        }
        if let Some(succs) = self.edges_out.remove(&v) {
            for succ in succs {
                if let Some(set) = self.edges_in.get_mut(&succ) {
                    set.remove(&v);
                }
            }
        }
    }

    /// Whether edge `u -> v` exists
    pub fn has_edge(&self, u: DrawableKey, v: DrawableKey) -> bool {
        self.edges_out
            .get(&u)
            .map(|set| set.contains(&v))
            .unwrap_or(false)
    }

    /// Number of predecessors of `v` (0 for unknown vertices)
    pub fn in_degree(&self, v: DrawableKey) -> usize {
        self.edges_in.get(&v).map(|set| set.len()).unwrap_or(0)
    }

    /// Successors of `v`
    pub fn out_neighbors(&self, v: DrawableKey) -> impl Iterator<Item = DrawableKey> + '_ {
        self.edges_out
            .get(&v)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.edges_out.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges_out.values().map(|set| set.len()).sum()
    }

    /// Remove all vertices and edges
    pub fn clear(&mut self) {
        self.edges_in.clear();
        self.edges_out.clear();
    }
}

impl Default for DrawGraph {
    fn default() -> Self {
        Self::new()
    }
}
