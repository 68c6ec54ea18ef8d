//! Child accessors.
//!
//! The layout is one n-ary algorithm. How a node's children are found is
//! delegated to a [`ChildAccessor`], so binary trees, recursion trees and
//! caller-defined shapes share the same width and coordinate passes.

use super::config::LayoutConfig;
use crate::graph::{Children, Node, NodeGraph};

/// One horizontal slot under a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSlot {
    /// A resolved child, by position in the snapshot's node list.
    Node(usize),
    /// Empty space one leaf wide.
    Gap,
}

/// Capability to enumerate a node's child slots, left to right.
///
/// Implementations must only return positions obtained from
/// [`NodeGraph::resolve`]. Unresolvable references are left out.
pub trait ChildAccessor {
    /// Child slots of `node`, left to right.
    fn child_slots(&self, node: &Node, graph: &NodeGraph<'_>) -> Vec<ChildSlot>;
}

impl<F> ChildAccessor for F
where
    F: Fn(&Node, &NodeGraph<'_>) -> Vec<ChildSlot>,
{
    fn child_slots(&self, node: &Node, graph: &NodeGraph<'_>) -> Vec<ChildSlot> {
        self(node, graph)
    }
}

/// Reads children from [`Node::children`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotChildren {
    /// Keep a gap for the missing side of single-child binary nodes.
    pub reserve_binary_slots: bool,
}

impl SnapshotChildren {
    /// Accessor matching a layout configuration.
    pub fn for_config(config: &LayoutConfig) -> Self {
        Self {
            reserve_binary_slots: config.reserve_binary_slots,
        }
    }
}

impl ChildAccessor for SnapshotChildren {
    fn child_slots(&self, node: &Node, graph: &NodeGraph<'_>) -> Vec<ChildSlot> {
        match &node.children {
            Children::Empty => Vec::new(),
            Children::List(ids) => ids
                .iter()
                .filter_map(|id| graph.resolve(id))
                .map(ChildSlot::Node)
                .collect(),
            Children::Binary { left, right } => {
                let left = left.as_ref().and_then(|id| graph.resolve(id));
                let right = right.as_ref().and_then(|id| graph.resolve(id));
                match (left, right) {
                    (Some(l), Some(r)) => vec![ChildSlot::Node(l), ChildSlot::Node(r)],
                    (Some(l), None) if self.reserve_binary_slots => {
                        vec![ChildSlot::Node(l), ChildSlot::Gap]
                    }
                    (None, Some(r)) if self.reserve_binary_slots => {
                        vec![ChildSlot::Gap, ChildSlot::Node(r)]
                    }
                    (Some(only), None) | (None, Some(only)) => vec![ChildSlot::Node(only)],
                    (None, None) => Vec::new(),
                }
            }
        }
    }
}
