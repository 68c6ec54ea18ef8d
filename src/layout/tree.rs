//! Top-down tree layout for binary and recursion trees.
//!
//! A simplified tidy-tree: every subtree reserves a horizontal span wide
//! enough for all of its children side by side, and each node is centered
//! over its own span. There is no contour packing across non-sibling
//! subtrees, so layouts are wider than Reingold-Tilford but trivially
//! overlap-free and stable from one animation frame to the next.
//!
//! # Algorithm Overview
//!
//! 1. **Build (pre-order DFS):** Resolve child slots through a
//!    [`ChildAccessor`] into a flat arena. Parents always precede their
//!    children. Back-edges into the current path (cycles) and repeated
//!    children (shared subtrees) are truncated and reported.
//! 2. **Widths (post-order):** Walk the arena backwards so children are
//!    final before their parent: `width = max(min_span, sum(child widths))`.
//! 3. **Coordinates (pre-order):** Root at `left_offset + width / 2`; each
//!    child's span starts where its left sibling's ended, beginning at the
//!    parent's left edge. `y` depends only on depth.
//! 4. **Edges:** One segment per parent→child pair, see [`super::edges`].

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::accessor::{ChildAccessor, ChildSlot, SnapshotChildren};
use super::config::LayoutConfig;
use super::edges::derive_edges;
use super::SENTINEL;
use crate::error::ConfigError;
use crate::graph::{Decorations, Edge, Node, NodeGraph, NodeId, NodeStatus, Snapshot};

/// A snapshot node with its computed geometry.
///
/// Valid for one layout pass only. `parent` and `children` index into the
/// owning [`Layout::nodes`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    /// Stable identifier from the snapshot.
    pub id: NodeId,
    /// Display value.
    pub value: String,
    /// Status tag.
    pub status: NodeStatus,
    /// Decorations, passed through.
    #[serde(flatten)]
    pub decorations: Decorations,
    /// Center X.
    pub x: f32,
    /// Center Y.
    pub y: f32,
    /// Horizontal span reserved for this node and its descendants.
    pub width: f32,
    /// Depth in the tree (root = 0).
    pub depth: u32,
    /// Parent layout index (None for root).
    pub parent: Option<usize>,
    /// Children layout indices, left to right.
    pub children: Vec<usize>,
}

impl LayoutNode {
    fn from_node(node: &Node, depth: u32, parent: Option<usize>) -> Self {
        Self {
            id: node.id.clone(),
            value: node.value.clone(),
            status: node.status,
            decorations: node.decorations.clone(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            depth,
            parent,
            children: Vec::new(),
        }
    }

    /// Left edge of the reserved span.
    #[inline]
    pub fn span_left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    /// Right edge of the reserved span.
    #[inline]
    pub fn span_right(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Problems found in a snapshot while laying it out.
///
/// None of these abort the layout; each affected branch is simply left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDiagnostics {
    /// `(node, ancestor)` pairs where a child reference pointed back into the
    /// node's own ancestry.
    pub cycles: Vec<(NodeId, NodeId)>,
    /// `(node, child)` pairs where the child was already placed under
    /// another parent.
    pub shared: Vec<(NodeId, NodeId)>,
    /// `(node, child)` pairs whose child id is not in the snapshot.
    pub dangling: Vec<(NodeId, NodeId)>,
    /// Number of snapshot nodes not reachable from the root.
    pub unreachable: usize,
}

impl LayoutDiagnostics {
    /// Whether a cycle was detected and truncated.
    pub fn has_cycle(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Whether the snapshot was a well-formed tree covering every node.
    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty()
            && self.shared.is_empty()
            && self.dangling.is_empty()
            && self.unreachable == 0
    }
}

/// Drawable geometry for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Laid-out nodes in pre-order; index 0 is the root.
    pub nodes: Vec<LayoutNode>,
    /// Parent→child segments, grouped by parent.
    pub edges: Vec<Edge>,
    /// Drawing width: left offset plus the root's span.
    pub width: f32,
    /// Drawing height: deepest level plus one node and the bottom margin.
    pub height: f32,
    /// Truncations and omissions.
    pub diagnostics: LayoutDiagnostics,
}

impl Layout {
    /// The root node.
    #[inline]
    pub fn root(&self) -> &LayoutNode {
        &self.nodes[0]
    }

    /// Look a node up by id.
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id.as_str() == id)
    }

    /// Depth of the deepest node.
    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Interleaved `[x0, y0, x1, y1, ...]` in the order of `nodes`.
    ///
    /// Nodes that were not laid out get [`SENTINEL`] for both coordinates.
    pub fn interleaved_positions(&self, nodes: &[Node]) -> Vec<f32> {
        let by_id: HashMap<&str, &LayoutNode> = self
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();

        let mut positions = Vec::with_capacity(nodes.len() * 2);
        for node in nodes {
            match by_id.get(node.id.as_str()) {
                Some(laid_out) => {
                    positions.push(laid_out.x);
                    positions.push(laid_out.y);
                }
                None => {
                    positions.push(SENTINEL);
                    positions.push(SENTINEL);
                }
            }
        }
        positions
    }
}

/// Horizontal slot under a parent, resolved to the arena.
#[derive(Debug, Clone, Copy)]
enum Span {
    Child(usize),
    Gap,
}

/// Pre-order arena construction with cycle and sharing guards.
struct TreeBuilder<'g, 'a, A: ?Sized> {
    graph: &'g NodeGraph<'a>,
    accessor: &'g A,
    nodes: Vec<LayoutNode>,
    spans: Vec<Vec<Span>>,
    /// Snapshot positions already placed.
    visited: HashSet<usize>,
    /// Snapshot positions on the current root path.
    on_path: HashSet<usize>,
    diagnostics: LayoutDiagnostics,
}

/// A node whose child slots are still being walked.
struct Pending {
    position: usize,
    index: usize,
    depth: u32,
    slots: std::vec::IntoIter<ChildSlot>,
    spans: Vec<Span>,
    children: Vec<usize>,
}

impl<A: ChildAccessor + ?Sized> TreeBuilder<'_, '_, A> {
    /// Depth-first build from `root`, driven by an explicit stack so that
    /// degenerate chains cannot exhaust the call stack.
    fn build(&mut self, root: usize) {
        let graph = self.graph;
        let mut stack = vec![self.open(root, None, 0)];

        while let Some(top) = stack.last_mut() {
            let Some(slot) = top.slots.next() else {
                if let Some(done) = stack.pop() {
                    self.close(done);
                }
                continue;
            };

            let node = graph.node(top.position);
            let child = match slot {
                ChildSlot::Gap => {
                    top.spans.push(Span::Gap);
                    continue;
                }
                ChildSlot::Node(child) if child < graph.nodes().len() => child,
                ChildSlot::Node(child) => {
                    log::trace!("{} has out-of-range child position {child}", node.id);
                    continue;
                }
            };

            let child_id = &graph.node(child).id;
            if self.on_path.contains(&child) {
                log::warn!("cycle: {} points back to ancestor {}", node.id, child_id);
                self.diagnostics
                    .cycles
                    .push((node.id.clone(), child_id.clone()));
                continue;
            }
            if self.visited.contains(&child) {
                log::warn!("{} is already placed; skipping it under {}", child_id, node.id);
                self.diagnostics
                    .shared
                    .push((node.id.clone(), child_id.clone()));
                continue;
            }

            let pending = self.open(child, Some(top.index), top.depth + 1);
            top.spans.push(Span::Child(pending.index));
            top.children.push(pending.index);
            stack.push(pending);
        }
    }

    /// Place a node in the arena and mark it as on the current path.
    fn open(&mut self, position: usize, parent: Option<usize>, depth: u32) -> Pending {
        let graph = self.graph;
        let node = graph.node(position);
        let index = self.nodes.len();

        self.visited.insert(position);
        self.on_path.insert(position);
        self.nodes.push(LayoutNode::from_node(node, depth, parent));
        self.spans.push(Vec::new());

        Pending {
            position,
            index,
            depth,
            slots: self.accessor.child_slots(node, graph).into_iter(),
            spans: Vec::new(),
            children: Vec::new(),
        }
    }

    fn close(&mut self, done: Pending) {
        self.on_path.remove(&done.position);
        self.nodes[done.index].children = done.children;
        self.spans[done.index] = done.spans;
    }
}

/// The tree layout engine.
///
/// Stateless apart from its configuration: every call to
/// [`compute`](Self::compute) is a full recomputation, and identical
/// snapshots produce bit-identical layouts.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    config: LayoutConfig,
}

impl TreeLayout {
    /// Create a tree layout with the given configuration.
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a tree layout with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out a snapshot, reading children from each node.
    ///
    /// Returns `None` when the snapshot is empty or its root does not
    /// resolve.
    pub fn compute(&self, snapshot: &Snapshot) -> Option<Layout> {
        self.compute_with(snapshot, &SnapshotChildren::for_config(&self.config))
    }

    /// Lay out a snapshot with a custom child accessor.
    pub fn compute_with<A>(&self, snapshot: &Snapshot, accessor: &A) -> Option<Layout>
    where
        A: ChildAccessor + ?Sized,
    {
        let graph = match NodeGraph::from_snapshot(snapshot) {
            Ok(graph) => graph,
            Err(reason) => {
                log::debug!("nothing to lay out: {reason}");
                return None;
            }
        };

        let dangling = graph.dangling_references();
        for (parent, child) in &dangling {
            log::trace!("{parent} references missing {child}; treating it as absent");
        }

        let mut builder = TreeBuilder {
            graph: &graph,
            accessor,
            nodes: Vec::with_capacity(graph.len()),
            spans: Vec::with_capacity(graph.len()),
            visited: HashSet::with_capacity(graph.len()),
            on_path: HashSet::new(),
            diagnostics: LayoutDiagnostics {
                dangling,
                ..Default::default()
            },
        };
        builder.build(graph.root());

        let TreeBuilder {
            mut nodes,
            spans,
            mut diagnostics,
            ..
        } = builder;
        diagnostics.unreachable = graph.len().saturating_sub(nodes.len());

        self.assign_widths(&mut nodes, &spans);
        self.assign_coordinates(&mut nodes, &spans);

        let edges = derive_edges(&nodes, snapshot.highlights.as_ref());

        let max_depth = nodes.iter().map(|node| node.depth).max().unwrap_or(0);
        let width = self.config.left_offset + nodes[0].width;
        let height = max_depth as f32 * self.config.level_height
            + self.config.node_diameter
            + self.config.bottom_margin;

        log::debug!(
            "laid out {} of {} nodes, {} edges, {width}x{height}",
            nodes.len(),
            graph.len(),
            edges.len()
        );

        Some(Layout {
            nodes,
            edges,
            width,
            height,
            diagnostics,
        })
    }

    /// Bottom-up span computation.
    ///
    /// The arena is in pre-order, so walking it backwards visits every child
    /// before its parent.
    fn assign_widths(&self, nodes: &mut [LayoutNode], spans: &[Vec<Span>]) {
        let min_span = self.config.min_span();
        for index in (0..nodes.len()).rev() {
            let children_width: f32 = spans[index]
                .iter()
                .map(|span| match *span {
                    Span::Child(child) => nodes[child].width,
                    Span::Gap => min_span,
                })
                .sum();
            nodes[index].width = children_width.max(min_span);
        }
    }

    /// Top-down coordinate assignment.
    fn assign_coordinates(&self, nodes: &mut [LayoutNode], spans: &[Vec<Span>]) {
        let min_span = self.config.min_span();
        let Some(root) = nodes.first_mut() else {
            return;
        };
        root.x = self.config.left_offset + root.width / 2.0;
        root.y = self.level_y(0);

        for index in 0..nodes.len() {
            let mut left = nodes[index].span_left();
            for span in &spans[index] {
                left += match *span {
                    Span::Child(child) => {
                        let y = self.level_y(nodes[child].depth);
                        let child = &mut nodes[child];
                        child.x = left + child.width / 2.0;
                        child.y = y;
                        child.width
                    }
                    Span::Gap => min_span,
                };
            }
        }
    }

    #[inline]
    fn level_y(&self, depth: u32) -> f32 {
        depth as f32 * self.config.level_height + self.config.top_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::HighlightSet;

    const EPS: f32 = 1e-4;

    fn leaf(id: &str) -> Node {
        Node::new(id, id)
    }

    fn parent(id: &str, children: &[&str]) -> Node {
        Node::new(id, id).with_children(children.iter().copied())
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        const DEPTH: usize = 100_000;
        let nodes = (0..DEPTH)
            .map(|i| {
                let node = Node::new(format!("n{i}"), i.to_string());
                if i + 1 < DEPTH {
                    node.with_children([format!("n{}", i + 1)])
                } else {
                    node
                }
            })
            .collect();

        let layout = TreeLayout::with_defaults()
            .compute(&Snapshot::new(nodes, "n0"))
            .unwrap();

        assert_eq!(layout.nodes.len(), DEPTH);
        assert_eq!(layout.edges.len(), DEPTH - 1);
        assert_eq!(layout.max_depth(), (DEPTH - 1) as u32);
        assert!(layout.diagnostics.is_clean());
        let last = &layout.nodes[DEPTH - 1];
        assert_eq!(last.x, layout.root().x);
        assert_eq!(last.parent, Some(DEPTH - 2));
    }

    #[test]
    fn test_single_root() {
        let layout = TreeLayout::with_defaults();
        let result = layout.compute(&Snapshot::new(vec![leaf("r")], "r")).unwrap();

        assert_eq!(result.nodes.len(), 1);
        assert!(result.edges.is_empty());
        let root = result.root();
        assert_eq!(root.width, 60.0);
        assert_eq!((root.x, root.y), (root.width / 2.0, 40.0));
        assert_eq!(result.width, 60.0);
        // depth 0: diameter + bottom margin
        assert_eq!(result.height, 60.0);
        assert!(result.diagnostics.is_clean());
    }

    #[test]
    fn test_root_with_two_leaves() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(vec![parent("r", &["a", "b"]), leaf("a"), leaf("b")], "r");
        let result = layout.compute(&snapshot).unwrap();

        let (r, a, b) = (
            result.node("r").unwrap(),
            result.node("a").unwrap(),
            result.node("b").unwrap(),
        );
        assert!((r.x - (a.x + b.x) / 2.0).abs() < EPS);
        assert_eq!(a.width, 60.0);
        assert_eq!(b.width, 60.0);
        assert_eq!(result.width, 120.0);
        assert_eq!((a.x, b.x), (30.0, 90.0));
        assert_eq!(a.y, 120.0);
        assert_eq!(result.edges.len(), 2);
        assert_eq!(result.height, 80.0 + 40.0 + 20.0);
    }

    #[test]
    fn test_chain_shares_x() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(
            vec![parent("r", &["c"]), parent("c", &["g"]), leaf("g")],
            "r",
        );
        let result = layout.compute(&snapshot).unwrap();

        let xs: Vec<f32> = result.nodes.iter().map(|n| n.x).collect();
        let ys: Vec<f32> = result.nodes.iter().map(|n| n.y).collect();
        assert_eq!(xs, vec![30.0, 30.0, 30.0]);
        assert_eq!(ys, vec![40.0, 120.0, 200.0]);
    }

    #[test]
    fn test_dangling_child_is_omitted() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(vec![parent("r", &["a", "ghost"]), leaf("a")], "r");
        let result = layout.compute(&snapshot).unwrap();

        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.root().width, 60.0);
        assert_eq!(result.root().x, result.node("a").unwrap().x);
        assert_eq!(
            result.diagnostics.dangling,
            vec![(NodeId::from("r"), NodeId::from("ghost"))]
        );
        assert!(!result.diagnostics.has_cycle());
    }

    #[test]
    fn test_empty_and_unresolved_root() {
        let layout = TreeLayout::with_defaults();
        assert!(layout.compute(&Snapshot::default()).is_none());
        assert!(layout.compute(&Snapshot::new(vec![leaf("a")], "b")).is_none());
    }

    #[test]
    fn test_detected_root() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::unrooted(vec![leaf("a"), parent("r", &["a"])]);
        let result = layout.compute(&snapshot).unwrap();
        assert_eq!(result.root().id, NodeId::from("r"));
        assert_eq!(result.nodes.len(), 2);
    }

    #[test]
    fn test_cycle_is_truncated() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(
            vec![parent("a", &["b"]), parent("b", &["c"]), parent("c", &["a"])],
            "a",
        );
        let result = layout.compute(&snapshot).unwrap();

        assert_eq!(result.nodes.len(), 3);
        assert_eq!(result.edges.len(), 2);
        assert!(result.diagnostics.has_cycle());
        assert_eq!(
            result.diagnostics.cycles,
            vec![(NodeId::from("c"), NodeId::from("a"))]
        );
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(vec![parent("a", &["a"])], "a");
        let result = layout.compute(&snapshot).unwrap();
        assert_eq!(result.nodes.len(), 1);
        assert!(result.diagnostics.has_cycle());
    }

    #[test]
    fn test_shared_child_is_placed_once() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(
            vec![parent("r", &["a", "b"]), parent("a", &["s"]), parent("b", &["s"]), leaf("s")],
            "r",
        );
        let result = layout.compute(&snapshot).unwrap();

        assert_eq!(result.nodes.len(), 4);
        assert_eq!(result.node("s").unwrap().parent, Some(1));
        assert_eq!(
            result.diagnostics.shared,
            vec![(NodeId::from("b"), NodeId::from("s"))]
        );
        assert!(!result.diagnostics.has_cycle());
    }

    #[test]
    fn test_unreachable_nodes_are_counted() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(vec![leaf("r"), leaf("island"), leaf("other")], "r");
        let result = layout.compute(&snapshot).unwrap();
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.diagnostics.unreachable, 2);
        assert!(!result.diagnostics.is_clean());
    }

    #[test]
    fn test_binary_tree_uses_child_widths() {
        let layout = TreeLayout::with_defaults();
        // 8 -> (3 -> (1, 6), 10)
        let snapshot = Snapshot::new(
            vec![
                Node::new("8", "8").with_binary(Some("3".into()), Some("10".into())),
                Node::new("3", "3").with_binary(Some("1".into()), Some("6".into())),
                leaf("10"),
                leaf("1"),
                leaf("6"),
            ],
            "8",
        );
        let result = layout.compute(&snapshot).unwrap();

        let three = result.node("3").unwrap();
        let ten = result.node("10").unwrap();
        assert_eq!(three.width, 120.0);
        assert_eq!(ten.width, 60.0);
        assert_eq!(result.root().width, 180.0);
        assert_eq!(three.x, 60.0);
        assert_eq!(ten.x, 150.0);
        assert!(three.span_right() <= ten.span_left() + EPS);
    }

    #[test]
    fn test_lone_binary_child() {
        let snapshot = Snapshot::new(
            vec![
                Node::new("p", "p").with_binary(None, Some("r".into())),
                leaf("r"),
            ],
            "p",
        );

        let plain = TreeLayout::with_defaults().compute(&snapshot).unwrap();
        assert_eq!(plain.root().x, plain.node("r").unwrap().x);

        let reserved = TreeLayout::new(LayoutConfig {
            reserve_binary_slots: true,
            ..Default::default()
        })
        .unwrap()
        .compute(&snapshot)
        .unwrap();
        assert_eq!(reserved.root().width, 120.0);
        assert_eq!(reserved.root().x, 60.0);
        assert_eq!(reserved.node("r").unwrap().x, 90.0);
        assert_eq!(reserved.root().children, vec![1]);
    }

    #[test]
    fn test_left_offset_and_margins() {
        let layout = TreeLayout::new(LayoutConfig {
            node_diameter: 30.0,
            gap: 10.0,
            level_height: 50.0,
            top_margin: 25.0,
            bottom_margin: 5.0,
            left_offset: 100.0,
            reserve_binary_slots: false,
        })
        .unwrap();
        let snapshot = Snapshot::new(vec![parent("r", &["a", "b"]), leaf("a"), leaf("b")], "r");
        let result = layout.compute(&snapshot).unwrap();

        assert_eq!(result.root().x, 140.0);
        assert_eq!(result.root().y, 25.0);
        assert_eq!(result.node("a").unwrap().x, 120.0);
        assert_eq!(result.node("b").unwrap().y, 75.0);
        assert_eq!(result.width, 180.0);
        assert_eq!(result.height, 50.0 + 30.0 + 5.0);
    }

    #[test]
    fn test_highlighted_edges() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(vec![parent("r", &["a", "b"]), leaf("a"), leaf("b")], "r")
            .with_highlights(HighlightSet::new("orange").with_edge("r", "b"));
        let result = layout.compute(&snapshot).unwrap();

        let to_a = &result.edges[0];
        let to_b = &result.edges[1];
        assert_eq!(to_a.target, NodeId::from("a"));
        assert_eq!(to_a.color, None);
        assert_eq!(to_b.color.as_deref(), Some("orange"));
        assert_eq!((to_b.from.x, to_b.from.y), (60.0, 40.0));
        assert_eq!((to_b.to.x, to_b.to.y), (90.0, 120.0));
    }

    #[test]
    fn test_deterministic() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(
            vec![
                parent("r", &["a", "b", "c"]),
                parent("a", &["d", "e"]),
                leaf("b"),
                parent("c", &["f"]),
                leaf("d"),
                leaf("e"),
                leaf("f"),
            ],
            "r",
        );
        let first = layout.compute(&snapshot).unwrap();
        let second = layout.compute(&snapshot).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.width.to_bits(), b.width.to_bits());
        }
    }

    #[test]
    fn test_status_and_decorations_pass_through() {
        let layout = TreeLayout::with_defaults();
        let root = Node::new("r", "root")
            .with_status(NodeStatus::Found)
            .with_decorations(Decorations {
                height: Some(1),
                balance_factor: Some(0),
                result: None,
            });
        let result = layout.compute(&Snapshot::new(vec![root], "r")).unwrap();
        assert_eq!(result.root().status, NodeStatus::Found);
        assert_eq!(result.root().decorations.height, Some(1));
        assert_eq!(result.root().value, "root");
    }

    #[test]
    fn test_custom_accessor() {
        // Lay out only the first child of every list node.
        fn first_only(node: &Node, graph: &NodeGraph<'_>) -> Vec<ChildSlot> {
            node.children
                .ids()
                .first()
                .and_then(|id| graph.resolve(id))
                .map(ChildSlot::Node)
                .into_iter()
                .collect()
        }

        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(vec![parent("r", &["a", "b"]), leaf("a"), leaf("b")], "r");
        let result = layout.compute_with(&snapshot, &first_only).unwrap();
        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.diagnostics.unreachable, 1);
    }

    #[test]
    fn test_interleaved_positions() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(vec![leaf("a"), parent("r", &["a"]), leaf("z")], "r");
        let result = layout.compute(&snapshot).unwrap();
        let positions = result.interleaved_positions(&snapshot.nodes);
        assert_eq!(positions.len(), 6);
        assert_eq!(&positions[..4], &[30.0, 120.0, 30.0, 40.0]);
        assert_eq!(positions[4], SENTINEL);
        assert_eq!(positions[5], SENTINEL);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = TreeLayout::new(LayoutConfig {
            level_height: 0.0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "levelHeight", .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let layout = TreeLayout::with_defaults();
        let snapshot = Snapshot::new(vec![parent("r", &["a"]), leaf("a")], "r");
        let json = serde_json::to_value(layout.compute(&snapshot).unwrap()).unwrap();

        assert_eq!(json["nodes"][0]["id"], "r");
        assert_eq!(json["nodes"][0]["status"], "unvisited");
        assert_eq!(json["nodes"][1]["parent"], 0);
        assert_eq!(json["edges"][0]["source"], "r");
        assert_eq!(json["width"], 60.0);
        assert!(json["diagnostics"]["cycles"].as_array().unwrap().is_empty());
    }
}
