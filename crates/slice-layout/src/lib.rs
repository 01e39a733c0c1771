//! slice-layout - auto-layout for 5G network-slice topology diagrams
//!
//! Takes the nodes and edges of a slice diagram (Network → Cell-Area → RRP
//! → RRP-Member → S-NSSAI → DNN → QoS-Flow → 5QI) and computes
//! hierarchy-respecting, non-overlapping canvas positions.
//!
//! # Quick Start
//!
//! ```rust
//! use slice_layout::prelude::*;
//!
//! let nodes = vec![
//!     Node::new("network-1", NodeKind::Network),
//!     Node::new("cell-area-1", NodeKind::CellArea),
//!     Node::new("rrp-1", NodeKind::Rrp),
//! ];
//! let edges = vec![
//!     Edge::new("network-1", "cell-area-1"),
//!     Edge::new("cell-area-1", "rrp-1"),
//! ];
//! let config = LayoutConfig::balanced_tree()
//!     .with_spacing(250.0, 150.0)
//!     .with_margins(250.0, 50.0);
//!
//! let placed = arrange(&nodes, &edges, &config).unwrap();
//! assert_eq!(placed[2].position, Position::new(250.0, 350.0));
//! ```
//!
//! # Inserting a single node
//!
//! ```rust
//! use slice_layout::prelude::*;
//!
//! let existing = vec![Node::new("dnn-1", NodeKind::Dnn)];
//! let spot = find_free_position(
//!     Position::new(0.0, 0.0),
//!     NodeKind::Dnn.dimensions(),
//!     &existing,
//!     &CollisionConfig::default(),
//! );
//! assert_ne!(spot, Position::new(0.0, 0.0));
//! ```

pub mod core;
pub mod engine;
pub mod strategies;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use anyhow::Context;

pub use crate::core::*;
pub use crate::engine::{
    arrange, arrange_detailed, find_free_position, fit_to_viewport, Arrangement, Hierarchy,
    LayoutOutcome,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CollisionConfig, Edge, LayoutConfig, LayoutError, LayoutStrategy, LayoutType, Node,
        NodeKind, Position, SliceGraph, Size,
    };
    pub use crate::engine::{
        arrange, arrange_detailed, find_free_position, fit_to_viewport, Arrangement,
        LayoutOutcome,
    };
}

/// Arrange a JSON graph document
///
/// # Arguments
/// * `graph_json` - a `{ "nodes": [...], "edges": [...] }` document
/// * `config_json` - layout options in the editor's camelCase form; an
///   empty string means all defaults
///
/// # Returns
/// The same document with positions filled in.
///
/// # Example
/// ```rust
/// let graph = r#"{"nodes":[{"id":"network-1","kind":"network"}],"edges":[]}"#;
/// let out = slice_layout::arrange_json(graph, r#"{"type":"balanced-tree"}"#).unwrap();
/// assert!(out.contains(r#""x":400.0"#));
/// ```
pub fn arrange_json(graph_json: &str, config_json: &str) -> anyhow::Result<String> {
    let (graph, arrangement) = arrange_json_detailed(graph_json, config_json)?;
    let arranged = SliceGraph::new(arrangement.nodes, graph.edges);
    arranged.to_json().context("Failed to serialize arranged graph")
}

/// Parse both documents and run [`arrange_detailed`]
pub(crate) fn arrange_json_detailed(
    graph_json: &str,
    config_json: &str,
) -> anyhow::Result<(SliceGraph, Arrangement)> {
    let graph = SliceGraph::from_json(graph_json).context("Failed to parse graph JSON")?;
    let config = parse_config(config_json)?;
    let arrangement = arrange_detailed(&graph.nodes, &graph.edges, &config)?;
    Ok((graph, arrangement))
}

fn parse_config(config_json: &str) -> anyhow::Result<LayoutConfig> {
    if config_json.trim().is_empty() {
        return Ok(LayoutConfig::default());
    }
    serde_json::from_str(config_json).context("Failed to parse layout config JSON")
}
