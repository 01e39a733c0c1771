//! Parent/child maps derived from the edge list

use std::collections::{HashMap, HashSet};

use tracing::{debug, span, trace, warn, Level};

use crate::core::{Edge, Node};

/// Adjacency view of one graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    /// Children per source, in edge input order, without duplicates
    pub children_of: HashMap<String, Vec<String>>,
    /// First source seen for each target
    pub parent_of: HashMap<String, String>,
    /// Nodes no kept edge points at, in node input order
    pub roots: Vec<String>,
    /// Edges with an endpoint that is not a node id
    pub dropped_edges: Vec<Edge>,
}

impl Relationships {
    pub fn children(&self, id: &str) -> &[String] {
        self.children_of.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, id: &str) -> Option<&str> {
        self.parent_of.get(id).map(String::as_str)
    }

    pub fn is_root(&self, id: &str) -> bool {
        self.roots.iter().any(|r| r == id)
    }
}

/// Build the relationship map
///
/// Edges referencing unknown nodes are dropped first. When every node is
/// the target of some edge the first input node becomes the only root, so
/// a non-empty graph always has at least one.
pub fn build_relationships(nodes: &[Node], edges: &[Edge]) -> Relationships {
    let span = span!(
        Level::DEBUG,
        "build_relationships",
        node_count = nodes.len(),
        edge_count = edges.len()
    );
    let _enter = span.enter();

    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut relationships = Relationships::default();
    let mut targeted: HashSet<&str> = HashSet::new();

    for edge in edges {
        if !ids.contains(edge.source.as_str()) || !ids.contains(edge.target.as_str()) {
            warn!(from = %edge.source, to = %edge.target, "Dropping edge with unknown endpoint");
            relationships.dropped_edges.push(edge.clone());
            continue;
        }

        targeted.insert(edge.target.as_str());

        let children = relationships
            .children_of
            .entry(edge.source.clone())
            .or_default();
        if !children.contains(&edge.target) {
            children.push(edge.target.clone());
        }

        relationships
            .parent_of
            .entry(edge.target.clone())
            .or_insert_with(|| edge.source.clone());

        trace!(from = %edge.source, to = %edge.target, "Kept edge");
    }

    relationships.roots = nodes
        .iter()
        .filter(|n| !targeted.contains(n.id.as_str()))
        .map(|n| n.id.clone())
        .collect();

    if relationships.roots.is_empty() {
        if let Some(first) = nodes.first() {
            debug!(root = %first.id, "No root found, using first node");
            relationships.roots.push(first.id.clone());
        }
    }

    debug!(
        roots = relationships.roots.len(),
        dropped = relationships.dropped_edges.len(),
        "Relationships built"
    );

    relationships
}
