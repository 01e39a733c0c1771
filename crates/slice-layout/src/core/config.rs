//! Layout and collision configuration
//!
//! Both structs deserialize from the editor's camelCase option objects with
//! every field optional.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LayoutError;

/// Which positioning strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    BalancedTree,
    Horizontal,
    GridRows,
    /// Fixed three-column grid; also what unknown names resolve to
    #[default]
    #[serde(other)]
    Grid,
}

impl LayoutType {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutType::BalancedTree => "balanced-tree",
            LayoutType::Horizontal => "horizontal",
            LayoutType::GridRows => "grid-rows",
            LayoutType::Grid => "grid",
        }
    }

    /// Parse a strategy name; unknown names map to [`LayoutType::Grid`]
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "balanced-tree" => LayoutType::BalancedTree,
            "horizontal" => LayoutType::Horizontal,
            "grid-rows" => LayoutType::GridRows,
            _ => LayoutType::Grid,
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for bulk layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub node_width: f64,
    pub node_height: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub prevent_overlap: bool,
    /// Rendering hint for edge drawing; layout passes it through
    pub edge_shorten_factor: f64,
    pub min_node_distance: f64,
    pub compact_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layout_type: LayoutType::Grid,
            node_width: 180.0,
            node_height: 120.0,
            horizontal_spacing: 250.0, // between root trees, orphans and columns
            vertical_spacing: 180.0,   // between levels
            margin_x: 400.0,
            margin_y: 100.0,
            prevent_overlap: true,
            edge_shorten_factor: 0.95,
            min_node_distance: 10.0,
            compact_factor: 0.8, // horizontal strategy only
        }
    }
}

impl LayoutConfig {
    /// Defaults with the given strategy
    pub fn new(layout_type: LayoutType) -> Self {
        Self {
            layout_type,
            ..Self::default()
        }
    }

    pub fn balanced_tree() -> Self {
        Self::new(LayoutType::BalancedTree)
    }

    pub fn horizontal() -> Self {
        Self::new(LayoutType::Horizontal)
    }

    pub fn grid_rows() -> Self {
        Self::new(LayoutType::GridRows)
    }

    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    pub fn with_spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    pub fn with_margins(mut self, x: f64, y: f64) -> Self {
        self.margin_x = x;
        self.margin_y = y;
        self
    }

    pub fn with_prevent_overlap(mut self, prevent_overlap: bool) -> Self {
        self.prevent_overlap = prevent_overlap;
        self
    }

    pub fn with_min_node_distance(mut self, distance: f64) -> Self {
        self.min_node_distance = distance;
        self
    }

    pub fn with_compact_factor(mut self, factor: f64) -> Self {
        self.compact_factor = factor;
        self
    }

    /// Larger side of the uniform node box
    pub fn node_extent(&self) -> f64 {
        self.node_width.max(self.node_height)
    }

    /// Check the caller contract: sizes and spacings finite and non-negative,
    /// margins finite
    pub fn validate(&self) -> Result<(), LayoutError> {
        let non_negative = [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
            ("horizontalSpacing", self.horizontal_spacing),
            ("verticalSpacing", self.vertical_spacing),
            ("minNodeDistance", self.min_node_distance),
            ("compactFactor", self.compact_factor),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::invalid_config(field, value));
            }
        }

        for (field, value) in [("marginX", self.margin_x), ("marginY", self.margin_y)] {
            if !value.is_finite() {
                return Err(LayoutError::invalid_config(field, value));
            }
        }

        Ok(())
    }
}

/// Options for placing a single inserted node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollisionConfig {
    pub min_spacing: f64,
    pub spiral_step: f64,
    pub max_attempts: usize,
    /// Attempts per spiral ring before the radius grows
    pub ring_interval: usize,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            min_spacing: 50.0,
            spiral_step: 60.0,
            max_attempts: 50,
            ring_interval: 8,
        }
    }
}

impl CollisionConfig {
    pub fn with_min_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.layout_type, LayoutType::Grid);
        assert_eq!(config.node_width, 180.0);
        assert_eq!(config.node_height, 120.0);
        assert_eq!(config.horizontal_spacing, 250.0);
        assert_eq!(config.vertical_spacing, 180.0);
        assert_eq!(config.margin_x, 400.0);
        assert_eq!(config.margin_y, 100.0);
        assert!(config.prevent_overlap);
        assert_eq!(config.edge_shorten_factor, 0.95);
        assert_eq!(config.min_node_distance, 10.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"type":"balanced-tree","marginX":250}"#).unwrap();
        assert_eq!(config.layout_type, LayoutType::BalancedTree);
        assert_eq!(config.margin_x, 250.0);
        assert_eq!(config.margin_y, 100.0);
    }

    #[test]
    fn test_unknown_type_is_grid() {
        let config: LayoutConfig = serde_json::from_str(r#"{"type":"radial"}"#).unwrap();
        assert_eq!(config.layout_type, LayoutType::Grid);
        assert_eq!(LayoutType::from_name("radial"), LayoutType::Grid);
        assert_eq!(LayoutType::from_name("Grid-Rows"), LayoutType::GridRows);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(LayoutConfig::horizontal()).unwrap();
        assert_eq!(json["type"], "horizontal");
        assert_eq!(json["nodeWidth"], 180.0);
        assert_eq!(json["preventOverlap"], true);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(LayoutConfig::default().validate().is_ok());

        let err = LayoutConfig::default()
            .with_node_size(-1.0, 120.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidConfig {
                field: "nodeWidth",
                ..
            }
        ));

        assert!(LayoutConfig::default()
            .with_spacing(250.0, f64::NAN)
            .validate()
            .is_err());
        assert!(LayoutConfig::default()
            .with_margins(f64::INFINITY, 0.0)
            .validate()
            .is_err());
        // negative margins shift the layout, they are allowed
        assert!(LayoutConfig::default()
            .with_margins(-100.0, -50.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_collision_defaults() {
        let config = CollisionConfig::default();
        assert_eq!(config.min_spacing, 50.0);
        assert_eq!(config.spiral_step, 60.0);
        assert_eq!(config.max_attempts, 50);
        assert_eq!(config.ring_interval, 8);
    }
}
