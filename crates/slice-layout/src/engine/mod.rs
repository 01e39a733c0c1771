//! Layout pipeline stages
//!
//! Relationships, levels, weights and sibling order are computed once per
//! call and bundled as a [`Hierarchy`]; the facade feeds that to the
//! selected strategy.

pub mod collision;
pub mod facade;
pub mod levels;
pub mod ordering;
pub mod relationships;
pub mod viewport;
pub mod weights;

pub use collision::{find_free_position, separate_levels, would_overlap, Axis};
pub use facade::{arrange, arrange_detailed, Arrangement, LayoutOutcome};
pub use levels::{assign_levels, LevelAssignment};
pub use ordering::{cross_count, sort_within_levels};
pub use relationships::{build_relationships, Relationships};
pub use viewport::fit_to_viewport;
pub use weights::{calculate_weights, SubtreeWeights};

use crate::core::{Edge, Node};

/// Everything derived from the edge structure of one graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    pub relationships: Relationships,
    pub levels: LevelAssignment,
    pub weights: SubtreeWeights,
    /// `levels.nodes_at_level` after sibling sorting
    pub ordered_levels: Vec<Vec<String>>,
}

impl Hierarchy {
    /// Run the four analysis stages in order
    pub fn analyze(nodes: &[Node], edges: &[Edge]) -> Self {
        let relationships = build_relationships(nodes, edges);
        let levels = assign_levels(nodes, &relationships);
        let weights = calculate_weights(nodes, &relationships);
        let ordered_levels = sort_within_levels(&levels, &relationships, &weights);

        Self {
            relationships,
            levels,
            weights,
            ordered_levels,
        }
    }

    /// Level of `id`, if some root reaches it
    pub fn level(&self, id: &str) -> Option<usize> {
        self.levels.level(id)
    }

    /// Crossings between adjacent levels in the sorted order
    pub fn crossings(&self) -> usize {
        cross_count(&self.ordered_levels, &self.relationships)
    }
}
