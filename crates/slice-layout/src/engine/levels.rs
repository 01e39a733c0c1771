//! Depth-first level assignment

use std::collections::{HashMap, HashSet};

use tracing::{debug, span, trace, Level};

use super::Relationships;
use crate::core::Node;

/// Level of every reachable node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelAssignment {
    pub level_of: HashMap<String, usize>,
    /// Ids per level in discovery order; index is the level
    pub nodes_at_level: Vec<Vec<String>>,
    /// Parent through which the traversal first reached each non-root node
    pub tree_parent: HashMap<String, String>,
}

impl LevelAssignment {
    pub fn level(&self, id: &str) -> Option<usize> {
        self.level_of.get(id).copied()
    }

    pub fn tree_parent(&self, id: &str) -> Option<&str> {
        self.tree_parent.get(id).map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.nodes_at_level.len()
    }

    pub fn is_leveled(&self, id: &str) -> bool {
        self.level_of.contains_key(id)
    }
}

/// Assign levels from each root in root order
///
/// Roots get level 0 and every edge adds one. A single visited set is
/// shared by all roots, so a node reachable from several roots keeps the
/// level of the first traversal that reached it. Nodes no root reaches get
/// no level.
pub fn assign_levels(nodes: &[Node], relationships: &Relationships) -> LevelAssignment {
    let span = span!(
        Level::DEBUG,
        "assign_levels",
        node_count = nodes.len(),
        root_count = relationships.roots.len()
    );
    let _enter = span.enter();

    let mut assignment = LevelAssignment::default();
    let mut visited: HashSet<&str> = HashSet::new();

    for root in &relationships.roots {
        // (id, level, parent); children pushed in reverse so they pop in order
        let mut stack: Vec<(&str, usize, Option<&str>)> = vec![(root.as_str(), 0, None)];

        while let Some((id, level, parent)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }

            trace!(node = id, level, "Assigned level");
            assignment.level_of.insert(id.to_string(), level);
            if assignment.nodes_at_level.len() <= level {
                assignment.nodes_at_level.resize_with(level + 1, Vec::new);
            }
            assignment.nodes_at_level[level].push(id.to_string());
            if let Some(parent) = parent {
                assignment
                    .tree_parent
                    .insert(id.to_string(), parent.to_string());
            }

            for child in relationships.children(id).iter().rev() {
                if !visited.contains(child.as_str()) {
                    stack.push((child.as_str(), level + 1, Some(id)));
                }
            }
        }
    }

    debug!(
        levels = assignment.depth(),
        leveled = assignment.level_of.len(),
        unleveled = nodes.len().saturating_sub(assignment.level_of.len()),
        "Levels assigned"
    );

    assignment
}
