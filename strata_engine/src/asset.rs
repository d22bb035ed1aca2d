//! Asset context: an explicit, caller-owned cache for decoded assets.
//!
//! Drawables typically share decoded resources (sprite sheets, animation
//! definitions, voxel palettes). Those caches are process-wide in spirit but
//! are modeled here as a plain value the application creates and passes to
//! whatever loads drawables. Tearing the context down drops every cached
//! asset; nothing leaks between contexts or between tests.

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// A typed, name-keyed cache of decoded assets.
///
/// Entries are keyed by `(type, name)` so the same name can hold, say, both
/// an image and an animation definition. Values are shared via `Arc`, so a
/// cached asset stays alive as long as any drawable still holds it, even
/// after the context itself is dropped.
pub struct AssetContext {
    entries: FxHashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>,
}

impl AssetContext {
    /// Create an empty asset context
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Get a cached asset by name, or decode and cache it via `init`.
    ///
    /// `init` runs only on a cache miss.
    pub fn get_or_insert_with<T, F>(&mut self, name: &str, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let key = (TypeId::of::<T>(), name.to_string());
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| Arc::new(init()));
        Arc::clone(entry)
            .downcast::<T>()
            .expect("asset context invariant violated: entry type does not match key")
    }

    /// Look up a cached asset without inserting
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        let key = (TypeId::of::<T>(), name.to_string());
        self.entries
            .get(&key)
            .and_then(|entry| Arc::clone(entry).downcast::<T>().ok())
    }

    /// Drop a cached asset. Returns true if an entry was removed.
    ///
    /// Outstanding `Arc` handles keep the asset itself alive.
    pub fn remove<T: Send + Sync + 'static>(&mut self, name: &str) -> bool {
        let key = (TypeId::of::<T>(), name.to_string());
        self.entries.remove(&key).is_some()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for AssetContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "asset_tests.rs"]
mod tests;
