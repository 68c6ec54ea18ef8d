//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) queries over laid-out node centers:
//! - Node under a point
//! - Nearest node
//! - Rectangle intersection (rubber-band selection)

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::layout::Layout;

/// A node center with its index in [`Layout::nodes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// Index into the layout's node list.
    pub index: usize,
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl NodePoint {
    /// Create a new NodePoint.
    pub fn new(index: usize, x: f32, y: f32) -> Self {
        Self { index, x, y }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        (self.x - point[0]).abs() < f32::EPSILON && (self.y - point[1]).abs() < f32::EPSILON
    }
}

/// Spatial index over one layout's node centers.
///
/// Like the layout itself, the index is rebuilt for every snapshot.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Bulk load the node centers of a layout.
    pub fn from_layout(layout: &Layout) -> Self {
        let points = layout
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| NodePoint::new(index, node.x, node.y))
            .collect();

        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// The node whose center is nearest to `(x, y)`, if within `radius`.
    ///
    /// Pass half the node diameter to hit-test drawn circles.
    pub fn node_at(&self, x: f32, y: f32, radius: f32) -> Option<usize> {
        let radius_sq = radius * radius;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= radius_sq)
            .map(|point| point.index)
    }

    /// The node whose center is nearest to `(x, y)`.
    pub fn nearest(&self, x: f32, y: f32) -> Option<usize> {
        self.tree.nearest_neighbor(&[x, y]).map(|point| point.index)
    }

    /// All nodes whose centers lie within a rectangle, in ascending index order.
    pub fn in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<usize> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        let mut indices: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|point| point.index)
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
