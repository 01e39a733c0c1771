//! Core type definitions for slice topology graphs
//!
//! This module contains the fundamental types every layout stage works on:
//! the fixed hierarchy of node kinds, positions and sizes, and the node and
//! edge records supplied by the editing surface.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Hierarchy kind of a slice node
///
/// The kinds form a strict parent/child chain; the declaration order is the
/// hierarchy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Network,
    CellArea,
    Rrp,
    #[serde(alias = "rrpmember")]
    RrpMember,
    SNssai,
    Dnn,
    #[serde(alias = "qosflow")]
    QosFlow,
    #[serde(alias = "fiveqi", alias = "5qi")]
    FiveQi,
}

impl NodeKind {
    /// All kinds in hierarchy order
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Network,
        NodeKind::CellArea,
        NodeKind::Rrp,
        NodeKind::RrpMember,
        NodeKind::SNssai,
        NodeKind::Dnn,
        NodeKind::QosFlow,
        NodeKind::FiveQi,
    ];

    /// Depth of this kind in the fixed hierarchy (network = 0)
    pub fn depth(&self) -> usize {
        *self as usize
    }

    /// Rendered footprint of a node of this kind
    ///
    /// The bulk strategies use the uniform box from the layout config; this
    /// is only consulted when checking a single insert against the canvas.
    pub fn dimensions(&self) -> Size {
        match self {
            NodeKind::Network => Size::new(200.0, 140.0),
            NodeKind::CellArea => Size::new(150.0, 120.0),
            NodeKind::Rrp => Size::new(180.0, 180.0),
            _ => Size::new(180.0, 120.0),
        }
    }

    /// Parse a kind name, accepting the legacy spellings
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "network" => Some(NodeKind::Network),
            "cell-area" => Some(NodeKind::CellArea),
            "rrp" => Some(NodeKind::Rrp),
            "rrp-member" | "rrpmember" => Some(NodeKind::RrpMember),
            "s-nssai" => Some(NodeKind::SNssai),
            "dnn" => Some(NodeKind::Dnn),
            "qos-flow" | "qosflow" => Some(NodeKind::QosFlow),
            "five-qi" | "fiveqi" | "5qi" => Some(NodeKind::FiveQi),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Network => write!(f, "network"),
            NodeKind::CellArea => write!(f, "cell-area"),
            NodeKind::Rrp => write!(f, "rrp"),
            NodeKind::RrpMember => write!(f, "rrp-member"),
            NodeKind::SNssai => write!(f, "s-nssai"),
            NodeKind::Dnn => write!(f, "dnn"),
            NodeKind::QosFlow => write!(f, "qos-flow"),
            NodeKind::FiveQi => write!(f, "five-qi"),
        }
    }
}

/// Top-left corner of a node on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if neither coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a node's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The larger of width and height
    pub fn extent(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// A slice node as handed over by the editing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier within a graph
    pub id: String,
    /// Hierarchy kind
    pub kind: NodeKind,
    /// Canvas position, filled in by layout
    #[serde(default)]
    pub position: Position,
    /// Logical parent (a back-reference, not ownership)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Kind-specific payload, opaque to layout
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl Node {
    /// Create a node at the origin
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::default(),
            parent_id: None,
            attributes: Map::new(),
        }
    }

    /// Create a node that names its logical parent
    pub fn with_parent(id: impl Into<String>, kind: NodeKind, parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ..Self::new(id, kind)
        }
    }

    /// Set a payload attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Copy of this node moved to `position`
    pub fn placed_at(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

/// A directed connection `source -> target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
        }
    }

    /// Create an edge carrying the editor's edge id
    pub fn with_id(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(source, target)
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
