//! Edge derivation.
//!
//! Walks a coordinate-assigned arena and emits one segment per parent→child
//! relationship, grouped by parent with parents in pre-order. Edges named by
//! the caller's highlight set are tagged with its color and weight; the rest
//! are left for the renderer's default stroke. The list is rebuilt on every
//! pass.

use super::tree::LayoutNode;
use crate::graph::{Edge, HighlightSet, Point};

/// Derive edges for a laid-out arena.
pub fn derive_edges(nodes: &[LayoutNode], highlights: Option<&HighlightSet>) -> Vec<Edge> {
    let lookup = highlights.map(HighlightSet::lookup);
    let mut edges = Vec::with_capacity(nodes.len().saturating_sub(1));

    for parent in nodes {
        for &child_index in &parent.children {
            let child = &nodes[child_index];
            let (color, weight) = match &lookup {
                Some(lookup) => (
                    lookup.color_for(&parent.id, &child.id).map(str::to_owned),
                    lookup.weight_for(&parent.id, &child.id),
                ),
                None => (None, None),
            };

            edges.push(Edge {
                source: parent.id.clone(),
                target: child.id.clone(),
                from: Point::new(parent.x, parent.y),
                to: Point::new(child.x, child.y),
                color,
                weight,
            });
        }
    }

    edges
}
