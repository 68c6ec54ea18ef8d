//! Frame-to-frame layout driver.
//!
//! The layout engine is stateless; a [`LayoutSession`] sits on top of it at
//! the caller's cadence (one [`update`](LayoutSession::update) per algorithm
//! step) and remembers just enough of the previous frame to animate the
//! difference: ids that appear start [`Phase::Entering`], ids that vanish
//! linger as ghosts in [`Phase::Exiting`] at their last position.
//!
//! A new snapshot always supersedes the previous step's transitions: they
//! are finished immediately, which is the state-machine equivalent of
//! clearing pending timers.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use super::transition::{Phase, Transition, TransitionTimings};
use crate::graph::{NodeId, Snapshot};
use crate::layout::{Layout, LayoutNode, TreeLayout};

/// Visual state of one node in the current frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFrame {
    /// Node identifier.
    pub id: NodeId,
    /// Current phase.
    pub phase: Phase,
    /// Progress through the phase, in [0.0, 1.0].
    pub progress: f32,
    /// Whether the node only survives as an exiting ghost.
    pub ghost: bool,
}

/// Everything the renderer needs to draw the current frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Geometry of the latest snapshot, if it had anything to draw.
    pub layout: Option<Layout>,
    /// Phase of every live node (layout order) followed by every ghost.
    pub nodes: Vec<NodeFrame>,
    /// Nodes removed by the latest snapshot, at their previous position.
    pub ghosts: Vec<LayoutNode>,
}

/// Stateful driver turning a stream of snapshots into animated frames.
#[derive(Debug, Clone)]
pub struct LayoutSession {
    engine: TreeLayout,
    timings: TransitionTimings,
    layout: Option<Layout>,
    ghosts: Vec<LayoutNode>,
    transitions: HashMap<NodeId, Transition>,
}

impl LayoutSession {
    /// Create a session around a layout engine.
    pub fn new(engine: TreeLayout, timings: TransitionTimings) -> Self {
        Self {
            engine,
            timings,
            layout: None,
            ghosts: Vec::new(),
            transitions: HashMap::new(),
        }
    }

    /// Create a session with default geometry and timings.
    pub fn with_defaults() -> Self {
        Self::new(TreeLayout::with_defaults(), TransitionTimings::default())
    }

    /// Lay out the next algorithm step and schedule its transitions.
    pub fn update(&mut self, snapshot: &Snapshot) -> Option<&Layout> {
        self.supersede();

        let next = self.engine.compute(snapshot);
        let mut transitions = HashMap::with_capacity(self.transitions.len());
        let mut entering = 0usize;

        if let Some(next) = &next {
            for node in &next.nodes {
                let transition = match self.transitions.get(&node.id) {
                    Some(&settled) => settled,
                    None => {
                        entering += 1;
                        Transition::entering(self.timings)
                    }
                };
                transitions.insert(node.id.clone(), transition);
            }
        }

        if let Some(previous) = self.layout.take() {
            for mut node in previous.nodes {
                if transitions.contains_key(&node.id) {
                    continue;
                }
                let mut transition = Transition::settled(self.timings);
                transition.exit();
                transitions.insert(node.id.clone(), transition);
                // Arena indices refer to the previous frame.
                node.parent = None;
                node.children.clear();
                self.ghosts.push(node);
            }
        }

        log::debug!(
            "step: {entering} entering, {} exiting",
            self.ghosts.len()
        );

        self.transitions = transitions;
        self.layout = next;
        self.layout.as_ref()
    }

    /// Advance every transition by `dt`.
    ///
    /// Returns whether anything is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        for transition in self.transitions.values_mut() {
            transition.tick(dt);
        }
        self.drop_finished();
        self.is_animating()
    }

    /// Whether any node is entering or exiting.
    pub fn is_animating(&self) -> bool {
        self.transitions.values().any(|t| t.phase().is_animating())
    }

    /// Phase of a node, `Idle` if unknown.
    pub fn phase_of(&self, id: &NodeId) -> Phase {
        self.transitions
            .get(id)
            .map_or(Phase::Idle, Transition::phase)
    }

    /// Geometry of the latest snapshot.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Nodes still exiting.
    pub fn ghosts(&self) -> &[LayoutNode] {
        &self.ghosts
    }

    /// Snapshot of the current visual state.
    pub fn frame(&self) -> Frame {
        let live = self.layout.iter().flat_map(|layout| layout.nodes.iter());
        let nodes = live
            .map(|node| (node, false))
            .chain(self.ghosts.iter().map(|node| (node, true)))
            .map(|(node, ghost)| {
                let transition = self.transitions.get(&node.id);
                NodeFrame {
                    id: node.id.clone(),
                    phase: transition.map_or(Phase::Idle, Transition::phase),
                    progress: transition.map_or(0.0, Transition::progress),
                    ghost,
                }
            })
            .collect();

        Frame {
            layout: self.layout.clone(),
            nodes,
            ghosts: self.ghosts.clone(),
        }
    }

    /// Forget all frames and transitions.
    pub fn reset(&mut self) {
        self.layout = None;
        self.ghosts.clear();
        self.transitions.clear();
    }

    fn supersede(&mut self) {
        for transition in self.transitions.values_mut() {
            transition.finish();
        }
        self.drop_finished();
    }

    fn drop_finished(&mut self) {
        self.transitions.retain(|_, t| t.phase() != Phase::Idle);
        let transitions = &self.transitions;
        self.ghosts
            .retain(|ghost| transitions.contains_key(&ghost.id));
    }
}
