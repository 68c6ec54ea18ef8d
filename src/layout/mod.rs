//! Layout algorithms for tree visualizations.
//!
//! This module computes drawable geometry for one algorithm snapshot: node
//! centers, reserved spans and parent→child segments. The external renderer
//! animates between the geometry of consecutive steps.

pub mod accessor;
pub mod config;
pub mod edges;
pub mod tree;

pub use accessor::{ChildAccessor, ChildSlot, SnapshotChildren};
pub use config::LayoutConfig;
pub use tree::{Layout, LayoutDiagnostics, LayoutNode, TreeLayout};

/// Coordinate value for "not part of the tree" in flat position buffers.
pub const SENTINEL: f32 = 3.402_823e+38;
