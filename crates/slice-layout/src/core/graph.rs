//! Serializable graph snapshot
//!
//! `SliceGraph` is the `{ nodes, edges }` document the editor persists and
//! reloads. Layout never requires a valid graph; [`SliceGraph::validate`]
//! exists for storage code that wants to refuse broken documents.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Edge, LayoutError, Node, NodeKind};

/// A problem found by [`SliceGraph::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    DuplicateNodeId(String),
    DanglingEdge { edge: Edge, missing: String },
    SelfLoop(Edge),
    MultipleNetworks(Vec<String>),
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphIssue::DuplicateNodeId(id) => write!(f, "duplicate node id '{}'", id),
            GraphIssue::DanglingEdge { edge, missing } => {
                write!(f, "edge {} references missing node '{}'", edge, missing)
            }
            GraphIssue::SelfLoop(edge) => write!(f, "self-loop {}", edge),
            GraphIssue::MultipleNetworks(ids) => {
                write!(f, "more than one network node: {}", ids.join(", "))
            }
        }
    }
}

/// Nodes and edges of one slice diagram
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SliceGraph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl SliceGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Report structural problems, in node then edge order
    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                issues.push(GraphIssue::DuplicateNodeId(node.id.clone()));
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint.as_str()) {
                    issues.push(GraphIssue::DanglingEdge {
                        edge: edge.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
            if edge.is_self_loop() {
                issues.push(GraphIssue::SelfLoop(edge.clone()));
            }
        }

        let networks: Vec<String> = self
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Network)
            .map(|n| n.id.clone())
            .collect();
        if networks.len() > 1 {
            issues.push(GraphIssue::MultipleNetworks(networks));
        }

        issues
    }

    /// Fail with [`LayoutError::InvalidGraph`] when `validate` finds anything
    pub fn ensure_valid(&self) -> Result<(), LayoutError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(LayoutError::invalid_graph(
                issues.iter().map(ToString::to_string).collect(),
            ))
        }
    }
}
