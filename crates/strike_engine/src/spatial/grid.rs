//! Uniform bucket grid over the XZ plane
//!
//! Replaces O(n²) all-pairs proximity checks with near-linear bucket scans
//! for roughly uniform entity distributions. The grid is rebuilt from
//! scratch every tick and queried read-only while systems run.
//!
//! Queries return a **superset** of the entities truly within the requested
//! Euclidean radius: the scan covers the full Chebyshev block of cells, so
//! callers making exact proximity decisions must apply their own distance
//! check. False positives are expected; a false negative would be a bug.

use std::collections::HashMap;

use crate::ecs::EntityId;

/// Fixed-cell spatial hash over the XZ plane
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    buckets: HashMap<(i32, i32), Vec<EntityId>>,
}

impl SpatialGrid {
    /// Create a grid with the given cell size (must be positive)
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "grid cell size must be positive");
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            buckets: HashMap::new(),
        }
    }

    /// Cell size this grid was configured with
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn key(&self, x: f32, z: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (z / self.cell_size).floor() as i32,
        )
    }

    /// Empty all buckets; called once per tick before the rebuild
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Add an entity reference at the given planar position
    pub fn insert(&mut self, id: EntityId, x: f32, z: f32) {
        let key = self.key(x, z);
        self.buckets.entry(key).or_default().push(id);
    }

    /// All entities in cells within `ceil(radius/cell)` Chebyshev distance
    /// of the query point's cell — a superset of the true Euclidean result
    pub fn query(&self, x: f32, z: f32, radius: f32) -> Vec<EntityId> {
        let cell_radius = (radius / self.cell_size).ceil() as i32;
        let (cx, cz) = self.key(x, z);
        let mut out = Vec::new();
        for dx in -cell_radius..=cell_radius {
            for dz in -cell_radius..=cell_radius {
                if let Some(bucket) = self.buckets.get(&(cx + dx, cz + dz)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out
    }

    /// Entities sharing the exact cell containing `(x, z)`; no expansion
    pub fn query_cell(&self, x: f32, z: f32) -> &[EntityId] {
        self.buckets
            .get(&self.key(x, z))
            .map_or(&[], Vec::as_slice)
    }

    /// Number of non-empty buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn id(index: u32) -> EntityId {
        EntityId {
            index,
            generation: 0,
        }
    }

    #[test]
    fn test_same_cell_query() {
        let mut grid = SpatialGrid::new(4.0);
        grid.insert(id(1), 0.5, 0.5);
        grid.insert(id(2), 3.9, 3.9);
        grid.insert(id(3), 4.1, 0.0); // neighbouring cell

        let same = grid.query_cell(1.0, 1.0);
        assert_eq!(same.len(), 2);
        assert!(grid.query_cell(100.0, 100.0).is_empty());
    }

    #[test]
    fn test_negative_coordinates_bucket_correctly() {
        let mut grid = SpatialGrid::new(4.0);
        grid.insert(id(1), -0.5, -0.5);
        grid.insert(id(2), 0.5, 0.5);
        // floor(-0.5/4) == -1, floor(0.5/4) == 0: different cells
        assert_eq!(grid.query_cell(-0.5, -0.5).len(), 1);
        assert_eq!(grid.query_cell(0.5, 0.5).len(), 1);
    }

    #[test]
    fn test_clear_empties_buckets() {
        let mut grid = SpatialGrid::new(4.0);
        grid.insert(id(1), 0.0, 0.0);
        grid.clear();
        assert_eq!(grid.bucket_count(), 0);
        assert!(grid.query(0.0, 0.0, 10.0).is_empty());
    }

    #[test]
    fn test_query_is_superset_of_euclidean_result() {
        // Randomized brute-force cross-check of the superset guarantee.
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = SpatialGrid::new(3.0);
        let mut placements = Vec::new();
        for index in 0..300u32 {
            let x = rng.gen_range(-50.0..50.0);
            let z = rng.gen_range(-50.0..50.0);
            grid.insert(id(index), x, z);
            placements.push((id(index), x, z));
        }

        for _ in 0..25 {
            let qx: f32 = rng.gen_range(-50.0..50.0);
            let qz: f32 = rng.gen_range(-50.0..50.0);
            let radius = rng.gen_range(1.0..15.0);

            let candidates = grid.query(qx, qz, radius);
            for (entity, x, z) in &placements {
                let dx = x - qx;
                let dz = z - qz;
                if (dx * dx + dz * dz).sqrt() <= radius {
                    assert!(
                        candidates.contains(entity),
                        "entity at ({x},{z}) within {radius} of ({qx},{qz}) missing from query"
                    );
                }
            }
        }
    }

    #[test]
    fn test_query_scans_block_not_everything() {
        let mut grid = SpatialGrid::new(4.0);
        for index in 0..100u32 {
            // Spread entities along a long line so distant buckets exist.
            grid.insert(id(index), index as f32 * 10.0, 0.0);
        }
        let near = grid.query(0.0, 0.0, 5.0);
        assert!(near.len() < 10, "block scan should not return the whole set");
    }
}
