//! Spatial partitioning structures for proximity queries

pub mod grid;

pub use grid::SpatialGrid;
