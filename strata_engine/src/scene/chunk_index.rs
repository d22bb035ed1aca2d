//! ChunkIndex: a uniform screen-space grid for candidate discovery.
//!
//! Partitions projected screen space into fixed-size square cells and maps
//! each cell to the drawables whose projected rectangles overlap it. On
//! insertion it hands back the set of neighbors already occupying the
//! touched cells, which is exactly the candidate set the graph-update step
//! tests with the occlusion oracle. Cost is proportional to touched cells
//! plus candidates, never total scene size.
//!
//! A reverse map records the chunk rectangle each drawable occupies, so
//! removal touches only those cells. The two maps are updated together;
//! a drawable is in the cells the reverse map claims, and in no others.

use rustc_hash::{FxHashMap, FxHashSet};
use glam::IVec2;
use super::drawable::{DrawableKey, ScreenRect};

/// Inclusive rectangle of chunk coordinates occupied by one drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRect {
    /// Lowest occupied chunk coordinate (inclusive)
    pub min: IVec2,
    /// Highest occupied chunk coordinate (inclusive)
    pub max: IVec2,
}

/// Uniform grid over projected screen space.
///
/// The chunk size is fixed for the index's lifetime; changing granularity
/// means building a fresh index and re-inserting the scene.
pub struct ChunkIndex {
    /// Cell edge length in screen units (strictly positive)
    chunk_size: i32,
    /// Cell -> drawables overlapping it. Empty cells are dropped eagerly
    /// so the map stays compact for sparse scenes.
    chunks: FxHashMap<(i32, i32), Vec<DrawableKey>>,
    /// Reverse map: drawable -> occupied chunk rectangle
    occupied: FxHashMap<DrawableKey, ChunkRect>,
}

impl ChunkIndex {
    /// Create an empty index with the given cell size.
    ///
    /// Callers validate positivity; `Scene::new` rejects a zero chunk size
    /// before this runs.
    pub fn new(chunk_size: i32) -> Self {
        debug_assert!(chunk_size > 0, "chunk size must be strictly positive");
        Self {
            chunk_size,
            chunks: FxHashMap::default(),
            occupied: FxHashMap::default(),
        }
    }

    /// Chunk rectangle covered by a screen rectangle.
    ///
    /// `max` is exclusive in screen space, so the last covered cell is the
    /// one containing `max - 1` (fencepost-adjusted inclusive bound).
    /// Euclidean division keeps the mapping correct at negative coordinates.
    fn chunk_rect(&self, rect: &ScreenRect) -> ChunkRect {
        ChunkRect {
            min: IVec2::new(
                rect.min.x.div_euclid(self.chunk_size),
                rect.min.y.div_euclid(self.chunk_size),
            ),
            max: IVec2::new(
                (rect.max.x - 1).div_euclid(self.chunk_size),
                (rect.max.y - 1).div_euclid(self.chunk_size),
            ),
        }
    }

    /// Register a drawable's projected rectangle and collect candidates.
    ///
    /// Returns every other drawable already present in a touched cell,
    /// deduplicated. An empty rectangle occupies no cells and yields no
    /// candidates. Re-inserting a registered key first clears its old
    /// occupancy, so a double insert re-derives a consistent state.
    pub fn insert(&mut self, key: DrawableKey, rect: &ScreenRect) -> Vec<DrawableKey> {
        if self.occupied.contains_key(&key) {
            self.remove(key);
        }

        if rect.is_empty() {
            return Vec::new();
        }

        let chunk_rect = self.chunk_rect(rect);
        let mut seen: FxHashSet<DrawableKey> = FxHashSet::default();
        let mut candidates = Vec::new();

        for cx in chunk_rect.min.x..=chunk_rect.max.x {
            for cy in chunk_rect.min.y..=chunk_rect.max.y {
                let cell = self.chunks.entry((cx, cy)).or_default();
                for &neighbor in cell.iter() {
                    if seen.insert(neighbor) {
                        candidates.push(neighbor);
                    }
                }
                cell.push(key);
            }
        }

        self.occupied.insert(key, chunk_rect);
        candidates
    }

    /// Remove a drawable from every cell it occupies.
    ///
    /// No-op if the key was never inserted.
    pub fn remove(&mut self, key: DrawableKey) {
        let Some(chunk_rect) = self.occupied.remove(&key) else {
            return;
        };

        for cx in chunk_rect.min.x..=chunk_rect.max.x {
            for cy in chunk_rect.min.y..=chunk_rect.max.y {
                if let Some(cell) = self.chunks.get_mut(&(cx, cy)) {
                    if let Some(pos) = cell.iter().position(|&k| k == key) {
                        cell.swap_remove(pos);
                    }
                    if cell.is_empty() {
                        self.chunks.remove(&(cx, cy));
                    }
                }
            }
        }
    }

    /// Chunk rectangle currently recorded for a drawable
    pub fn occupied_rect(&self, key: DrawableKey) -> Option<ChunkRect> {
        self.occupied.get(&key).copied()
    }

    /// Configured cell size
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of registered drawables
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    /// Whether no drawables are registered
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.chunks.len()
    }

    /// Remove every drawable from the index
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.occupied.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_keys(n: usize) -> Vec<DrawableKey> {
        let mut sm = SlotMap::<DrawableKey, ()>::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    fn make_rect(min: (i32, i32), max: (i32, i32)) -> ScreenRect {
        ScreenRect::new(IVec2::from(min), IVec2::from(max))
    }

    #[test]
    fn test_insert_returns_overlapping_neighbors() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(3);

        assert!(index.insert(keys[0], &make_rect((0, 0), (10, 10))).is_empty());

        // Same cell: key 0 is a candidate for key 1
        let candidates = index.insert(keys[1], &make_rect((5, 5), (12, 12)));
        assert_eq!(candidates, vec![keys[0]]);

        // Far away cell: no candidates
        let candidates = index.insert(keys[2], &make_rect((200, 200), (210, 210)));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_candidates_are_deduplicated() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(2);

        // Spans a 3x3 block of cells
        index.insert(keys[0], &make_rect((0, 0), (48, 48)));

        // Also spans several of those cells; key 0 must appear exactly once
        let candidates = index.insert(keys[1], &make_rect((10, 10), (40, 40)));
        assert_eq!(candidates, vec![keys[0]]);
    }

    #[test]
    fn test_fencepost_rect_on_cell_boundary() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(1);

        // [0, 16) covers exactly cell 0, not cell 1
        index.insert(keys[0], &make_rect((0, 0), (16, 16)));
        let rect = index.occupied_rect(keys[0]).unwrap();
        assert_eq!(rect.min, IVec2::new(0, 0));
        assert_eq!(rect.max, IVec2::new(0, 0));
        assert_eq!(index.cell_count(), 1);
    }

    #[test]
    fn test_negative_coordinates_floor_correctly() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(1);

        index.insert(keys[0], &make_rect((-20, -1), (-4, 15)));
        let rect = index.occupied_rect(keys[0]).unwrap();
        // -20 / 16 floors to -2, -5 floors to -1
        assert_eq!(rect.min, IVec2::new(-2, -1));
        assert_eq!(rect.max, IVec2::new(-1, 0));
    }

    #[test]
    fn test_empty_rect_occupies_no_cells() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(2);

        let candidates = index.insert(keys[0], &ScreenRect::EMPTY);
        assert!(candidates.is_empty());
        assert!(index.occupied_rect(keys[0]).is_none());
        assert_eq!(index.cell_count(), 0);

        // An empty rect is invisible to later insertions too
        let candidates = index.insert(keys[1], &make_rect((0, 0), (10, 10)));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_remove_clears_all_cells() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(2);

        index.insert(keys[0], &make_rect((0, 0), (40, 40)));
        assert!(index.cell_count() > 1);

        index.remove(keys[0]);
        assert_eq!(index.cell_count(), 0);
        assert!(index.is_empty());

        // A later insert sees no stale candidate
        let candidates = index.insert(keys[1], &make_rect((5, 5), (12, 12)));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_remove_never_inserted_is_noop() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(1);
        index.remove(keys[0]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_reinsert_replaces_old_occupancy() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(2);

        index.insert(keys[0], &make_rect((0, 0), (10, 10)));
        index.insert(keys[1], &make_rect((0, 0), (10, 10)));

        // Move key 0 far away; it must leave its old cell entirely
        index.insert(keys[0], &make_rect((100, 100), (110, 110)));
        assert_eq!(index.len(), 2);

        let rect = index.occupied_rect(keys[0]).unwrap();
        assert_eq!(rect.min, IVec2::new(6, 6));

        // key 1's cell no longer contains key 0
        index.remove(keys[1]);
        assert_eq!(index.cell_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut index = ChunkIndex::new(16);
        let keys = make_keys(3);
        for (i, &key) in keys.iter().enumerate() {
            let base = i as i32 * 30;
            index.insert(key, &make_rect((base, base), (base + 10, base + 10)));
        }

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.cell_count(), 0);
    }
}
