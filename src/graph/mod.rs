//! Snapshot data structures and loading.
//!
//! This module provides the input side of the layout engine: the node and
//! edge types exchanged with the algorithm stepper, the [`Snapshot`] that
//! bundles one step of an execution, and the [`NodeGraph`] loader that
//! indexes a snapshot by identifier.

mod edge;
mod loader;
mod node;
mod snapshot;

pub use edge::{Edge, HighlightLookup, HighlightSet, Point};
pub use loader::NodeGraph;
pub use node::{Children, Decorations, Node, NodeId, NodeStatus};
pub use snapshot::Snapshot;
