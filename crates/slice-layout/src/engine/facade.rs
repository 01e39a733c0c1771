//! Layout facade
//!
//! The single entry point the editor calls. It validates the config,
//! analyses the hierarchy, runs the selected strategy and checks the
//! result. A failing strategy never surfaces as an error: its output is
//! replaced by the fallback grid and the substitution is reported in the
//! [`LayoutOutcome`].

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, span, warn, Level};

use super::Hierarchy;
use crate::core::{Edge, LayoutConfig, LayoutError, LayoutInput, LayoutType, Node};
use crate::strategies::{fallback_grid, strategy_for};

/// Which strategy produced the positions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum LayoutOutcome {
    /// The requested strategy succeeded
    Arranged {
        #[serde(rename = "type")]
        layout_type: LayoutType,
    },
    /// The requested strategy failed and the fallback grid was used
    Fallback {
        requested: LayoutType,
        reason: String,
    },
}

impl LayoutOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, LayoutOutcome::Fallback { .. })
    }
}

impl fmt::Display for LayoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutOutcome::Arranged { layout_type } => write!(f, "arranged with {}", layout_type),
            LayoutOutcome::Fallback { requested, reason } => {
                write!(f, "{} failed, used fallback grid: {}", requested, reason)
            }
        }
    }
}

/// Positioned nodes plus what happened on the way
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrangement {
    pub nodes: Vec<Node>,
    pub outcome: LayoutOutcome,
    /// Input edges with an endpoint that is not a node
    pub dropped_edges: Vec<Edge>,
}

/// Compute positions for `nodes`
///
/// Returns fresh nodes in input order; the inputs are not touched. The only
/// error is an invalid config.
///
/// # Example
/// ```
/// use slice_layout::{arrange, Edge, LayoutConfig, Node, NodeKind};
///
/// let nodes = vec![
///     Node::new("network-1", NodeKind::Network),
///     Node::new("cell-area-1", NodeKind::CellArea),
/// ];
/// let edges = vec![Edge::new("network-1", "cell-area-1")];
///
/// let placed = arrange(&nodes, &edges, &LayoutConfig::balanced_tree()).unwrap();
/// assert_eq!(placed[0].position.x, placed[1].position.x);
/// assert!(placed[1].position.y > placed[0].position.y);
/// ```
pub fn arrange(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> Result<Vec<Node>, LayoutError> {
    arrange_detailed(nodes, edges, config).map(|arrangement| arrangement.nodes)
}

/// Like [`arrange`], but also reports fallback use and dropped edges
pub fn arrange_detailed(
    nodes: &[Node],
    edges: &[Edge],
    config: &LayoutConfig,
) -> Result<Arrangement, LayoutError> {
    let span = span!(
        Level::INFO,
        "arrange",
        node_count = nodes.len(),
        edge_count = edges.len(),
        strategy = config.layout_type.name()
    );
    let _enter = span.enter();

    config.validate()?;

    let hierarchy = Hierarchy::analyze(nodes, edges);
    let dropped_edges = hierarchy.relationships.dropped_edges.clone();
    if !dropped_edges.is_empty() {
        warn!(count = dropped_edges.len(), "Ignoring edges with unknown endpoints");
    }

    let requested = config.layout_type;
    if nodes.is_empty() {
        debug!("Nothing to arrange");
        return Ok(Arrangement {
            nodes: Vec::new(),
            outcome: LayoutOutcome::Arranged {
                layout_type: requested,
            },
            dropped_edges,
        });
    }

    let strategy = strategy_for(requested);
    let input = LayoutInput {
        nodes,
        edges,
        config,
        hierarchy: &hierarchy,
    };

    let result = strategy
        .arrange(&input)
        .and_then(|placed| verify(nodes, &placed).map(|()| placed));

    let arrangement = match result {
        Ok(placed) => {
            info!(strategy = strategy.name(), "Layout complete");
            Arrangement {
                nodes: placed,
                outcome: LayoutOutcome::Arranged {
                    layout_type: requested,
                },
                dropped_edges,
            }
        }
        Err(err) => {
            warn!(strategy = strategy.name(), error = %err, "Layout failed, using fallback grid");
            Arrangement {
                nodes: fallback_grid(nodes),
                outcome: LayoutOutcome::Fallback {
                    requested,
                    reason: err.to_string(),
                },
                dropped_edges,
            }
        }
    };

    Ok(arrangement)
}

/// Check a strategy's output against its input
///
/// Same length, same ids and kinds in the same order, finite positions.
pub fn verify(input: &[Node], output: &[Node]) -> Result<(), LayoutError> {
    if input.len() != output.len() {
        return Err(LayoutError::verification(format!(
            "expected {} nodes, got {}",
            input.len(),
            output.len()
        )));
    }

    for (index, (before, after)) in input.iter().zip(output).enumerate() {
        if before.id != after.id {
            return Err(LayoutError::verification(format!(
                "node {} changed id from '{}' to '{}'",
                index, before.id, after.id
            )));
        }
        if before.kind != after.kind {
            return Err(LayoutError::verification(format!(
                "node '{}' changed kind from {} to {}",
                before.id, before.kind, after.kind
            )));
        }
        if !after.position.is_finite() {
            return Err(LayoutError::verification(format!(
                "node '{}' has non-finite position {}",
                after.id, after.position
            )));
        }
    }

    Ok(())
}
