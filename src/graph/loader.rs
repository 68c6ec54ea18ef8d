//! Node graph loader.
//!
//! Indexes a snapshot's flat node list by identifier and resolves the root.
//! Loading is a pure transform: an empty list or an unresolvable root yields
//! [`NoData`], which the layout driver turns into "nothing to draw".

use std::collections::{HashMap, HashSet};

use super::node::{Node, NodeId};
use super::snapshot::Snapshot;
use crate::error::NoData;

/// Identifier index over a borrowed node list.
#[derive(Debug)]
pub struct NodeGraph<'a> {
    nodes: &'a [Node],
    index: HashMap<&'a str, usize>,
    root: usize,
}

impl<'a> NodeGraph<'a> {
    /// Index a snapshot.
    pub fn from_snapshot(snapshot: &'a Snapshot) -> Result<Self, NoData> {
        Self::load(&snapshot.nodes, snapshot.root_id.as_ref())
    }

    /// Index `nodes` and resolve `root_id`.
    ///
    /// When the same id appears twice, the first occurrence wins. Without a
    /// `root_id`, the first node that no other node lists as a child becomes
    /// the root.
    pub fn load(nodes: &'a [Node], root_id: Option<&NodeId>) -> Result<Self, NoData> {
        if nodes.is_empty() {
            return Err(NoData::EmptySnapshot);
        }

        let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.contains_key(node.id.as_str()) {
                log::debug!("ignoring duplicate {} at position {i}", node.id);
                continue;
            }
            index.insert(node.id.as_str(), i);
        }

        let root = match root_id {
            Some(id) => *index
                .get(id.as_str())
                .ok_or_else(|| NoData::UnresolvedRoot(id.clone()))?,
            None => Self::detect_root(nodes, &index).ok_or(NoData::NoRoot)?,
        };

        Ok(Self { nodes, index, root })
    }

    /// First node, in input order, that is nobody's child.
    fn detect_root(nodes: &[Node], index: &HashMap<&str, usize>) -> Option<usize> {
        let referenced: HashSet<&str> = nodes
            .iter()
            .flat_map(|node| node.children.ids())
            .map(NodeId::as_str)
            .collect();

        nodes.iter().enumerate().find_map(|(i, node)| {
            let first_occurrence = index.get(node.id.as_str()) == Some(&i);
            (first_occurrence && !referenced.contains(node.id.as_str())).then_some(i)
        })
    }

    /// Position of the root in the node list.
    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }

    /// The root node.
    #[inline]
    pub fn root_node(&self) -> &'a Node {
        &self.nodes[self.root]
    }

    /// Position of the node with this id, if present.
    #[inline]
    pub fn resolve(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id.as_str()).copied()
    }

    /// Look a node up by id.
    pub fn get(&self, id: &str) -> Option<&'a Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// The node at a position returned by [`resolve`](Self::resolve).
    #[inline]
    pub fn node(&self, position: usize) -> &'a Node {
        &self.nodes[position]
    }

    /// All nodes, in input order (duplicates included).
    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always false: loading rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Every `(parent, child)` pair whose child id is not in the snapshot.
    pub fn dangling_references(&self) -> Vec<(NodeId, NodeId)> {
        let mut dangling = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if self.index.get(node.id.as_str()) != Some(&i) {
                continue;
            }
            for child in node.children.ids() {
                if !self.index.contains_key(child.as_str()) {
                    dangling.push((node.id.clone(), child.clone()));
                }
            }
        }
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<Node> {
        vec![
            Node::new("a", "A").with_children(["b"]),
            Node::new("b", "B").with_children(["c"]),
            Node::new("c", "C"),
        ]
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let err = NodeGraph::load(&[], Some(&"a".into())).unwrap_err();
        assert_eq!(err, NoData::EmptySnapshot);
    }

    #[test]
    fn test_unresolved_root_is_no_data() {
        let nodes = chain();
        let err = NodeGraph::load(&nodes, Some(&"zzz".into())).unwrap_err();
        assert_eq!(err, NoData::UnresolvedRoot("zzz".into()));
    }

    #[test]
    fn test_explicit_root() {
        let nodes = chain();
        let graph = NodeGraph::load(&nodes, Some(&"b".into())).unwrap();
        assert_eq!(graph.root(), 1);
        assert_eq!(graph.root_node().value, "B");
        assert_eq!(graph.len(), 3);
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_detected_root_skips_referenced_nodes() {
        let mut nodes = chain();
        nodes.rotate_left(1); // b, c, a
        let graph = NodeGraph::load(&nodes, None).unwrap();
        assert_eq!(graph.root_node().id, NodeId::from("a"));
    }

    #[test]
    fn test_pure_cycle_has_no_root() {
        let nodes = vec![
            Node::new("a", "A").with_children(["b"]),
            Node::new("b", "B").with_children(["a"]),
        ];
        assert_eq!(NodeGraph::load(&nodes, None).unwrap_err(), NoData::NoRoot);
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let nodes = vec![Node::new("a", "first"), Node::new("a", "second")];
        let graph = NodeGraph::load(&nodes, Some(&"a".into())).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("a").map(|n| n.value.as_str()), Some("first"));
    }

    #[test]
    fn test_resolve_and_dangling() {
        let nodes = vec![
            Node::new("root", "R").with_children(["x", "ghost"]),
            Node::new("x", "X").with_binary(None, Some("gone".into())),
        ];
        let graph = NodeGraph::load(&nodes, Some(&"root".into())).unwrap();
        assert_eq!(graph.resolve(&"x".into()), Some(1));
        assert_eq!(graph.resolve(&"ghost".into()), None);
        assert_eq!(
            graph.dangling_references(),
            vec![
                (NodeId::from("root"), NodeId::from("ghost")),
                (NodeId::from("x"), NodeId::from("gone")),
            ]
        );
    }
}
