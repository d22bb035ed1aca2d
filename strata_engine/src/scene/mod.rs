//! Scene management module
//!
//! Provides the drawable model, projection, occlusion ordering, spatial
//! chunk indexing, the draw-order graph, and the topological draw walker.

mod chunk_index;
mod draw_graph;
mod drawable;
mod occlusion;
mod projector;
mod scene;
mod walker;

// Mock drawable and target for tests (no renderer required)
pub mod mock_drawable;

pub use chunk_index::{ChunkIndex, ChunkRect};
pub use draw_graph::DrawGraph;
pub use drawable::{
    Aabb, Capabilities, Drawable, DrawableKey, RenderTarget, ScreenRect,
};
pub use occlusion::must_draw_before;
pub use projector::{LinearProjector, Projector};
pub use scene::{Scene, SceneConfig};
pub use walker::DrawWalker;
