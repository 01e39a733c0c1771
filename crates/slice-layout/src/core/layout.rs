//! Strategy seam for positioning
//!
//! Every layout type is one implementation of [`LayoutStrategy`]. The facade
//! analyses the hierarchy once and hands the same [`LayoutInput`] to
//! whichever strategy the config selects.

use super::{Edge, LayoutConfig, LayoutError, LayoutType, Node};
use crate::engine::Hierarchy;

/// Everything a strategy may read
///
/// Strategies borrow the caller's nodes and never mutate them; they return
/// freshly positioned copies.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
    pub config: &'a LayoutConfig,
    /// Relationships, levels, weights and sibling order of `nodes`
    pub hierarchy: &'a Hierarchy,
}

/// Core trait for positioning strategies
///
/// An implementation must return one node per input node, in input order,
/// with the same ids and kinds and finite positions. The facade verifies
/// this and substitutes the fallback grid when it does not hold.
///
/// # Example
/// ```
/// use slice_layout::core::{LayoutConfig, LayoutInput, LayoutStrategy, Node, NodeKind};
/// use slice_layout::engine::Hierarchy;
/// use slice_layout::strategies::FallbackGrid;
///
/// let nodes = vec![Node::new("network-1", NodeKind::Network)];
/// let config = LayoutConfig::default();
/// let hierarchy = Hierarchy::analyze(&nodes, &[]);
/// let input = LayoutInput { nodes: &nodes, edges: &[], config: &config, hierarchy: &hierarchy };
///
/// let placed = FallbackGrid.arrange(&input).unwrap();
/// assert_eq!(placed[0].position.x, 100.0);
/// ```
pub trait LayoutStrategy: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &'static str;

    /// The config value that selects this strategy
    fn layout_type(&self) -> LayoutType;

    /// Position every node of the input
    fn arrange(&self, input: &LayoutInput<'_>) -> Result<Vec<Node>, LayoutError>;
}
