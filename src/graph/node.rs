//! Node type and related structures.
//!
//! Nodes are the vertices of one algorithm snapshot. Each node has:
//! - A stable identifier (the same across animation frames)
//! - A display value
//! - Child references, either an ordered list or a left/right pair
//! - A status tag from a closed set
//! - Optional decorations (height, balance factor, result value)
//!
//! Snapshots arrive from JavaScript, where ids and values are freely mixed
//! between strings and numbers, so both deserialize leniently into text.

use std::borrow::Borrow;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Stable node identifier.
///
/// Identifies a node across frames. `1` and `"1"` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    #[inline]
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextVisitor).map(NodeId)
    }
}

/// Visit status of a node, as tagged by the algorithm stepper.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Currently being processed.
    Active = 1,
    /// Reached at least once.
    Visited = 2,
    /// Fully processed (returned, in the case of recursion trees).
    Completed = 3,
    /// Cut off by the algorithm (branch and bound, memo hit).
    Pruned = 4,
    /// The search target.
    Found = 5,
    /// Not reached yet. Unknown tags also land here.
    #[default]
    #[serde(other)]
    Unvisited = 0,
}

impl From<u8> for NodeStatus {
    fn from(v: u8) -> Self {
        match v {
            1 => Self::Active,
            2 => Self::Visited,
            3 => Self::Completed,
            4 => Self::Pruned,
            5 => Self::Found,
            _ => Self::Unvisited,
        }
    }
}

/// Child references of a node.
///
/// Recursion trees list their children in call order; binary trees name a
/// left and a right slot. Both are laid out by the same n-ary algorithm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Children {
    /// Ordered list of child ids.
    List(Vec<NodeId>),
    /// Binary tree slots.
    Binary {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left: Option<NodeId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right: Option<NodeId>,
    },
    /// No children.
    #[default]
    Empty,
}

impl Children {
    /// Child ids in drawing order (left before right for binary nodes).
    pub fn ids(&self) -> Vec<&NodeId> {
        match self {
            Self::List(ids) => ids.iter().collect(),
            Self::Binary { left, right } => left.iter().chain(right.iter()).collect(),
            Self::Empty => Vec::new(),
        }
    }

    /// Whether no child is referenced.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(ids) => ids.is_empty(),
            Self::Binary { left, right } => left.is_none() && right.is_none(),
            Self::Empty => true,
        }
    }
}

/// Decorative annotations drawn next to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorations {
    /// Subtree height (AVL trees).
    #[serde(
        default,
        deserialize_with = "optional_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<i32>,
    /// Balance factor (AVL trees).
    #[serde(
        default,
        deserialize_with = "optional_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance_factor: Option<i32>,
    /// Returned value (recursion trees).
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<String>,
}

/// One node of an algorithm snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Stable identifier.
    pub id: NodeId,
    /// Display value or label.
    #[serde(default, deserialize_with = "text")]
    pub value: String,
    /// Child references.
    #[serde(default)]
    pub children: Children,
    /// Status tag.
    #[serde(default)]
    pub status: NodeStatus,
    /// Decorations, flattened into the node object.
    #[serde(flatten)]
    pub decorations: Decorations,
}

impl Node {
    /// Create a childless, unvisited node.
    pub fn new(id: impl Into<NodeId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            children: Children::Empty,
            status: NodeStatus::Unvisited,
            decorations: Decorations::default(),
        }
    }

    /// Set an ordered child list.
    pub fn with_children<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        self.children = Children::List(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Set binary child slots.
    pub fn with_binary(mut self, left: Option<NodeId>, right: Option<NodeId>) -> Self {
        self.children = Children::Binary { left, right };
        self
    }

    /// Set the status tag.
    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the decorations.
    pub fn with_decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }
}

/// Accepts strings, numbers and booleans as text.
struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        // JS numbers are doubles; 3.0 must read as "3".
        if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
            Ok((v as i64).to_string())
        } else {
            Ok(v.to_string())
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }
}

/// Accepts integers, and doubles that hold an integer.
struct IntVisitor;

impl<'de> Visitor<'de> for IntVisitor {
    type Value = i32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
        i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
        i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
        if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
            Ok(v as i32)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

struct Text(String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextVisitor).map(Text)
    }
}

struct Int(i32);

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IntVisitor).map(Int)
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(TextVisitor)
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Text>::deserialize(deserializer)?.map(|t| t.0))
}

fn optional_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(Option::<Int>::deserialize(deserializer)?.map(|i| i.0))
}
