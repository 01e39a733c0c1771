//! Positioning strategies
//!
//! One [`LayoutStrategy`] per [`LayoutType`]. The hierarchy-driven ones
//! (balanced tree and horizontal) share the orphan rules below.

pub mod balanced_tree;
pub mod fallback;
pub mod grid_rows;
pub mod horizontal;

pub use balanced_tree::BalancedTree;
pub use fallback::{fallback_grid, FallbackGrid};
pub use grid_rows::GridRows;
pub use horizontal::Horizontal;

use std::collections::{BTreeMap, HashSet};

use crate::core::{LayoutStrategy, LayoutType, Node};
use crate::engine::Hierarchy;

/// The strategy selected by `layout_type`
pub fn strategy_for(layout_type: LayoutType) -> &'static dyn LayoutStrategy {
    match layout_type {
        LayoutType::BalancedTree => &BalancedTree,
        LayoutType::Horizontal => &Horizontal,
        LayoutType::GridRows => &GridRows,
        LayoutType::Grid => &FallbackGrid,
    }
}

/// Where nodes without a level go
///
/// An orphan whose parent (first edge source, or its own `parent_id`) has a
/// level sits one level below it. Otherwise its kind depth decides,
/// measured from the shallowest root kind.
#[derive(Debug)]
pub(crate) struct OrphanLevels<'a> {
    hierarchy: &'a Hierarchy,
    root_depth: usize,
}

impl<'a> OrphanLevels<'a> {
    pub(crate) fn new(nodes: &[Node], hierarchy: &'a Hierarchy) -> Self {
        let roots: HashSet<&str> = hierarchy
            .relationships
            .roots
            .iter()
            .map(String::as_str)
            .collect();
        let root_depth = nodes
            .iter()
            .filter(|n| roots.contains(n.id.as_str()))
            .map(|n| n.kind.depth())
            .min()
            .unwrap_or(0);

        Self {
            hierarchy,
            root_depth,
        }
    }

    /// Level of a leveled node, or the would-be level of an orphan
    pub(crate) fn level(&self, node: &Node) -> usize {
        if let Some(level) = self.hierarchy.level(&node.id) {
            return level;
        }

        let parent_level = self
            .hierarchy
            .relationships
            .parent(&node.id)
            .and_then(|p| self.hierarchy.level(p))
            .or_else(|| {
                node.parent_id
                    .as_deref()
                    .and_then(|p| self.hierarchy.level(p))
            });

        match parent_level {
            Some(level) => level + 1,
            None => node.kind.depth().saturating_sub(self.root_depth),
        }
    }

    pub(crate) fn is_orphan(&self, node: &Node) -> bool {
        self.hierarchy.level(&node.id).is_none()
    }
}

/// Output indices grouped by level, levels ascending
pub(crate) fn level_groups(nodes: &[Node], orphans: &OrphanLevels<'_>) -> Vec<Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, node) in nodes.iter().enumerate() {
        groups.entry(orphans.level(node)).or_default().push(index);
    }
    groups.into_values().collect()
}
