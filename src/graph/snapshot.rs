//! One step of an algorithm execution, as supplied by the stepper.

use serde::{Deserialize, Serialize};

use super::edge::HighlightSet;
use super::node::{Node, NodeId};

/// The complete node state for one algorithm step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Flat node list, in the order the stepper produced it.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Designated root. `None` picks the first node nobody references.
    #[serde(default, alias = "root", skip_serializing_if = "Option::is_none")]
    pub root_id: Option<NodeId>,
    /// Edges to emphasize in this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<HighlightSet>,
}

impl Snapshot {
    /// Create a snapshot with an explicit root.
    pub fn new(nodes: Vec<Node>, root_id: impl Into<NodeId>) -> Self {
        Self {
            nodes,
            root_id: Some(root_id.into()),
            highlights: None,
        }
    }

    /// Create a snapshot whose root is detected from the node list.
    pub fn unrooted(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            root_id: None,
            highlights: None,
        }
    }

    /// Attach highlighted edges.
    pub fn with_highlights(mut self, highlights: HighlightSet) -> Self {
        self.highlights = Some(highlights);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_json() {
        let snapshot: Snapshot = serde_json::from_str(
            r##"{
                "nodes": [
                    {"id": 1, "value": 1, "children": [2, 3]},
                    {"id": 2, "value": 2},
                    {"id": 3, "value": 3}
                ],
                "rootId": 1,
                "highlights": {"color": "#22c55e", "edges": [[1, 3]]}
            }"##,
        )
        .unwrap();

        assert_eq!(snapshot.nodes.len(), 3);
        assert_eq!(snapshot.root_id, Some(NodeId::from("1")));
        assert_eq!(snapshot.highlights.map(|h| h.edges.len()), Some(1));
    }

    #[test]
    fn test_snapshot_root_alias_and_defaults() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"root": "a"}"#).unwrap();
        assert!(snapshot.nodes.is_empty());
        assert_eq!(snapshot.root_id, Some(NodeId::from("a")));
        assert!(snapshot.highlights.is_none());

        let snapshot: Snapshot = serde_json::from_str(r#"{"nodes": [], "rootId": null}"#).unwrap();
        assert_eq!(snapshot.root_id, None);
    }
}
