//! Layout configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Geometry parameters for the tree layout.
///
/// Every field has a default, so JavaScript callers can pass a partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Diameter of a drawn node.
    pub node_diameter: f32,
    /// Horizontal gap between neighboring leaf nodes.
    pub gap: f32,
    /// Vertical distance between tree levels.
    pub level_height: f32,
    /// Y of the root center.
    pub top_margin: f32,
    /// Space below the deepest level.
    pub bottom_margin: f32,
    /// X where the root's span starts.
    pub left_offset: f32,
    /// Reserve a leaf-width gap for the missing side of a binary node with a
    /// single child, so lone right children are drawn to the right.
    pub reserve_binary_slots: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_diameter: 40.0,
            gap: 20.0,
            level_height: 80.0,
            top_margin: 40.0,
            bottom_margin: 20.0,
            left_offset: 0.0,
            reserve_binary_slots: false,
        }
    }
}

impl LayoutConfig {
    /// Horizontal span reserved for a single node: diameter plus gap.
    #[inline]
    pub fn min_span(&self) -> f32 {
        self.node_diameter + self.gap
    }

    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("nodeDiameter", self.node_diameter),
            ("gap", self.gap),
            ("levelHeight", self.level_height),
            ("topMargin", self.top_margin),
            ("bottomMargin", self.bottom_margin),
            ("leftOffset", self.left_offset),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in [
            ("nodeDiameter", self.node_diameter),
            ("levelHeight", self.level_height),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("gap", self.gap),
            ("topMargin", self.top_margin),
            ("bottomMargin", self.bottom_margin),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }
}
