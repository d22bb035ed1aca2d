/*!
# Strata Engine

Draw-order resolution engine for 2.5D scenes.

Objects live in a 3D world but are drawn as flat 2D images, so correct
layering cannot come from a Z-buffer. This crate derives a "must draw
before" partial order from 3D bounding boxes under a configurable
projection, maintains it incrementally through a spatial chunk index and
a dynamic directed graph, and renders each frame in a topological walk
that also resolves inherited visibility and cumulative 2D transforms
along parent chains.

## Architecture

- **Scene**: owns drawables and keeps index and graph consistent
- **Projector**: maps 3D bounds to screen rectangles, defines depth sign
- **ChunkIndex**: screen-space grid limiting ordering checks to neighbors
- **DrawGraph**: the "draws before" relation as a directed graph
- **DrawWalker**: per-frame topological linearization and rendering
- **AssetContext**: shared, type-keyed asset cache for drawables
*/

// Internal modules
mod asset;
mod error;
mod engine;
pub mod log;
pub mod scene;

// Main strata namespace module
pub mod strata {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Shared asset cache
    pub use crate::asset::AssetContext;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
