//! Error types for the tree layout engine.
//!
//! Layout computation itself never fails: malformed snapshots degrade to a
//! partial tree or to "nothing to draw". The types here describe why nothing
//! was drawn ([`NoData`]), why a configuration was rejected ([`ConfigError`]),
//! and what went wrong at the JavaScript boundary ([`Error`]).

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::graph::NodeId;

/// A specialized `Result` type for operations at the JavaScript boundary.
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a snapshot produced no layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoData {
    /// The snapshot has no nodes at all.
    #[error("snapshot contains no nodes")]
    EmptySnapshot,

    /// The designated root id is not present in the node list.
    #[error("root {0} is not present in the snapshot")]
    UnresolvedRoot(NodeId),

    /// No root was designated and every node is somebody's child.
    #[error("snapshot has no root candidate")]
    NoRoot,
}

/// An invalid [`LayoutConfig`](crate::layout::LayoutConfig) value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The field is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    /// The field must be strictly greater than zero.
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// The field must be zero or greater.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

/// Errors surfaced to JavaScript callers.
#[derive(Error, Debug)]
pub enum Error {
    /// The snapshot, config or timings object could not be converted.
    #[error("Invalid input: {0}")]
    Input(#[from] serde_wasm_bindgen::Error),

    /// The layout configuration failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An unrecognized log level name.
    #[error("Unknown log level: {0}")]
    LogLevel(String),
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
