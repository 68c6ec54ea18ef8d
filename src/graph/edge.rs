//! Edge type and related structures.
//!
//! Edges are never stored: the layout derives one per parent→child
//! relationship on every pass. Each edge has:
//! - The source and target node IDs
//! - Start and end points (node centers)
//! - An optional highlight color and stroke weight

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new Point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A drawable parent→child line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Parent node.
    pub source: NodeId,
    /// Child node.
    pub target: NodeId,
    /// Parent center.
    pub from: Point,
    /// Child center.
    pub to: Point,
    /// Highlight color. `None` means the renderer's default stroke.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Highlight stroke weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

/// Parent→child relationships marked for emphasis, with the color to use.
///
/// Typically the edge the algorithm is currently traversing, or the path
/// found so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSet {
    /// Stroke color for every highlighted edge.
    pub color: String,
    /// Optional stroke weight for every highlighted edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    /// `[parent, child]` pairs.
    #[serde(default)]
    pub edges: Vec<(NodeId, NodeId)>,
}

impl HighlightSet {
    /// Create an empty set with the given color.
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            weight: None,
            edges: Vec::new(),
        }
    }

    /// Set the stroke weight.
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Add a parent→child pair.
    pub fn with_edge(mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Self {
        self.edges.push((parent.into(), child.into()));
        self
    }

    /// Build a lookup over the pairs for repeated membership tests.
    pub fn lookup(&self) -> HighlightLookup<'_> {
        HighlightLookup {
            set: self,
            pairs: self
                .edges
                .iter()
                .map(|(p, c)| (p.as_str(), c.as_str()))
                .collect(),
        }
    }
}

/// Borrowed membership index over a [`HighlightSet`].
pub struct HighlightLookup<'a> {
    set: &'a HighlightSet,
    pairs: HashSet<(&'a str, &'a str)>,
}

impl HighlightLookup<'_> {
    /// Whether `parent → child` is highlighted.
    pub fn contains(&self, parent: &NodeId, child: &NodeId) -> bool {
        self.pairs.contains(&(parent.as_str(), child.as_str()))
    }

    /// Highlight color for the pair, if highlighted.
    pub fn color_for(&self, parent: &NodeId, child: &NodeId) -> Option<&str> {
        self.contains(parent, child).then_some(self.set.color.as_str())
    }

    /// Stroke weight for the pair, if highlighted and weighted.
    pub fn weight_for(&self, parent: &NodeId, child: &NodeId) -> Option<f32> {
        if self.contains(parent, child) {
            self.set.weight
        } else {
            None
        }
    }
}
