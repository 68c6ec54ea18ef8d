//! Spatial indexing for pointer hit testing.
//!
//! This module provides an R-tree index over a computed layout, so the
//! renderer can map a click or hover position back to a node.

mod rtree;

pub use rtree::SpatialIndex;
