//! Algoviz Tree - WASM Module
//!
//! This module computes the geometry of tree-shaped algorithm visualizations
//! (binary search trees, AVL trees, recursion trees, call stacks) from
//! per-step snapshots. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: Snapshot types and the id-indexed node graph
//! - `layout`: Width/coordinate passes and edge derivation
//! - `spatial`: R-tree spatial indexing for hit testing
//! - `animation`: Enter/exit transitions between consecutive steps
//! - `logging`: `log` backend for the browser console
//! - `error`: Error types for the JavaScript boundary

use std::time::Duration;

use js_sys::Float32Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod error;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod spatial;

use animation::{LayoutSession, TransitionTimings};
use error::Result;
use graph::Snapshot;
use layout::{LayoutConfig, TreeLayout, SENTINEL};
use spatial::SpatialIndex;

/// Initialize the WASM module.
///
/// Installs the panic hook and routes `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(logging::DEFAULT_LEVEL);
}

/// Change the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> std::result::Result<(), JsValue> {
    logging::set_level(level)?;
    Ok(())
}

/// Compute the layout of one snapshot with an optional config object.
///
/// Returns `null` when there is nothing to draw.
#[wasm_bindgen(js_name = computeLayout)]
pub fn compute_layout(snapshot: JsValue, config: JsValue) -> std::result::Result<JsValue, JsValue> {
    TreeLayoutEngine::new(config)?.compute_layout(snapshot)
}

/// Stateless layout engine.
///
/// Holds nothing but the validated configuration, so one instance can serve
/// every step of a visualization.
#[wasm_bindgen]
pub struct TreeLayoutEngine {
    layout: TreeLayout,
}

#[wasm_bindgen]
impl TreeLayoutEngine {
    /// Create an engine from a (possibly partial) config object.
    ///
    /// `undefined` or `null` selects the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<TreeLayoutEngine, JsValue> {
        Ok(Self {
            layout: layout_from_js(config)?,
        })
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay out a snapshot.
    ///
    /// Returns `{ nodes, edges, width, height, diagnostics }`, or `null` when
    /// the snapshot is empty or its root does not resolve.
    #[wasm_bindgen(js_name = computeLayout)]
    pub fn compute_layout(&self, snapshot: JsValue) -> std::result::Result<JsValue, JsValue> {
        let snapshot = snapshot_from_js(snapshot)?;
        match self.layout.compute(&snapshot) {
            Some(layout) => Ok(to_js(&layout)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Lay out a snapshot and return only the node centers.
    ///
    /// Returns a Float32Array `[x0, y0, x1, y1, ...]` in the snapshot's node
    /// order. Nodes that were not laid out get the sentinel `3.402823e38`.
    #[wasm_bindgen(js_name = computePositions)]
    pub fn compute_positions(&self, snapshot: JsValue) -> std::result::Result<Float32Array, JsValue> {
        let snapshot = snapshot_from_js(snapshot)?;
        let positions = positions(&self.layout, &snapshot);
        Ok(Float32Array::from(&positions[..]))
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the laid-out node drawn under a point.
    ///
    /// Returns the index into the layout's `nodes`, or `undefined` if the
    /// point is outside every node circle.
    #[wasm_bindgen(js_name = hitTest)]
    pub fn hit_test(&self, snapshot: JsValue, x: f32, y: f32) -> std::result::Result<Option<u32>, JsValue> {
        let snapshot = snapshot_from_js(snapshot)?;
        Ok(hit_test(&self.layout, &snapshot, x, y))
    }

    /// Find the laid-out node nearest to a point.
    ///
    /// Returns the index into the layout's `nodes`, or `undefined` if there
    /// is nothing to draw.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, snapshot: JsValue, x: f32, y: f32) -> std::result::Result<Option<u32>, JsValue> {
        let snapshot = snapshot_from_js(snapshot)?;
        Ok(spatial_index(&self.layout, &snapshot)
            .and_then(|index| index.nearest(x, y))
            .map(|index| index as u32))
    }

    /// Find all laid-out nodes whose centers lie within a rectangle.
    ///
    /// Returns a Uint32Array of layout indices in ascending order.
    #[wasm_bindgen(js_name = findNodesInRect)]
    pub fn find_nodes_in_rect(
        &self,
        snapshot: JsValue,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    ) -> std::result::Result<Vec<u32>, JsValue> {
        let snapshot = snapshot_from_js(snapshot)?;
        Ok(nodes_in_rect(&self.layout, &snapshot, [min_x, min_y, max_x, max_y]))
    }
}

/// Layout engine with enter/exit transitions between steps.
#[wasm_bindgen]
pub struct TreeLayoutSession {
    session: LayoutSession,
}

#[wasm_bindgen]
impl TreeLayoutSession {
    /// Create a session from optional config and timings objects.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, timings: JsValue) -> std::result::Result<TreeLayoutSession, JsValue> {
        let layout = layout_from_js(config)?;
        let timings: TransitionTimings = if timings.is_undefined() || timings.is_null() {
            TransitionTimings::default()
        } else {
            serde_wasm_bindgen::from_value(timings).map_err(error::Error::from)?
        };
        Ok(Self {
            session: LayoutSession::new(layout, timings),
        })
    }

    /// Lay out the next step. Returns the layout, or `null`.
    pub fn update(&mut self, snapshot: JsValue) -> std::result::Result<JsValue, JsValue> {
        let snapshot = snapshot_from_js(snapshot)?;
        match self.session.update(&snapshot) {
            Some(layout) => Ok(to_js(layout)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Advance all transitions by `ms` milliseconds.
    ///
    /// Returns whether anything is still animating.
    pub fn tick(&mut self, ms: f64) -> bool {
        self.session.tick(millis(ms))
    }

    /// Whether any node is entering or exiting.
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.session.is_animating()
    }

    /// Current frame: `{ layout, nodes: [{ id, phase, progress, ghost }], ghosts }`.
    pub fn frame(&self) -> std::result::Result<JsValue, JsValue> {
        Ok(to_js(&self.session.frame())?)
    }

    /// Forget all previous steps.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

fn layout_from_js(config: JsValue) -> Result<TreeLayout> {
    let config: LayoutConfig = if config.is_undefined() || config.is_null() {
        LayoutConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    Ok(TreeLayout::new(config)?)
}

fn snapshot_from_js(snapshot: JsValue) -> Result<Snapshot> {
    Ok(serde_wasm_bindgen::from_value(snapshot)?)
}

/// Plain JS objects throughout; flattened fields would otherwise become `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

fn positions(layout: &TreeLayout, snapshot: &Snapshot) -> Vec<f32> {
    match layout.compute(snapshot) {
        Some(computed) => computed.interleaved_positions(&snapshot.nodes),
        None => vec![SENTINEL; snapshot.nodes.len() * 2],
    }
}

fn spatial_index(layout: &TreeLayout, snapshot: &Snapshot) -> Option<SpatialIndex> {
    layout
        .compute(snapshot)
        .map(|computed| SpatialIndex::from_layout(&computed))
}

fn hit_test(layout: &TreeLayout, snapshot: &Snapshot, x: f32, y: f32) -> Option<u32> {
    let radius = layout.config().node_diameter / 2.0;
    spatial_index(layout, snapshot)?
        .node_at(x, y, radius)
        .map(|index| index as u32)
}

fn nodes_in_rect(layout: &TreeLayout, snapshot: &Snapshot, rect: [f32; 4]) -> Vec<u32> {
    let [min_x, min_y, max_x, max_y] = rect;
    spatial_index(layout, snapshot)
        .map(|index| index.in_rect(min_x, min_y, max_x, max_y))
        .unwrap_or_default()
        .into_iter()
        .map(|index| index as u32)
        .collect()
}

/// Milliseconds from JavaScript as a duration; negative and NaN count as zero.
fn millis(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}
