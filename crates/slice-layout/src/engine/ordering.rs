//! Sibling ordering within levels
//!
//! Children are grouped under their parent's final position, heavier
//! subtrees first, which keeps edges between adjacent levels from
//! crossing for tree-shaped input.

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::{debug, span, trace, Level};

use super::{LevelAssignment, Relationships, SubtreeWeights};

/// Sort every level top-down
///
/// Keys, in priority order:
/// 1. index of the node's tree parent within the already sorted level above
///    (nodes without one sort first)
/// 2. subtree weight, descending
/// 3. node id
///
/// The order is total, so the result does not depend on discovery order.
pub fn sort_within_levels(
    levels: &LevelAssignment,
    relationships: &Relationships,
    weights: &SubtreeWeights,
) -> Vec<Vec<String>> {
    let span = span!(
        Level::DEBUG,
        "sort_within_levels",
        level_count = levels.depth()
    );
    let _enter = span.enter();

    let mut sorted: Vec<Vec<String>> = Vec::with_capacity(levels.depth());

    for (level, ids) in levels.nodes_at_level.iter().enumerate() {
        let parent_index: HashMap<&str, usize> = match level.checked_sub(1) {
            Some(above) => sorted[above]
                .iter()
                .enumerate()
                .map(|(i, id)| (id.as_str(), i))
                .collect(),
            None => HashMap::new(),
        };

        let mut row = ids.clone();
        row.sort_by_cached_key(|id| {
            let parent = levels
                .tree_parent(id)
                .and_then(|p| parent_index.get(p).copied());
            (parent, Reverse(weights.weight(id)), id.clone())
        });

        trace!(level, order = ?row, "Sorted level");
        sorted.push(row);
    }

    debug!(
        crossings = cross_count(&sorted, relationships),
        "Levels sorted"
    );

    sorted
}

/// Count edge crossings between all adjacent levels.
///
/// Edges (a1→b1) and (a2→b2) with a1, a2 on level L and b1, b2 on level L+1
/// cross when the order of the sources disagrees with the order of the
/// targets. Edges that skip a level are ignored.
pub fn cross_count(levels: &[Vec<String>], relationships: &Relationships) -> usize {
    let mut total = 0;
    for i in 0..levels.len().saturating_sub(1) {
        total += two_level_cross_count(&levels[i], &levels[i + 1], relationships);
    }
    total
}

fn two_level_cross_count(north: &[String], south: &[String], relationships: &Relationships) -> usize {
    let south_pos: HashMap<&str, usize> = south
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for (np, n) in north.iter().enumerate() {
        for child in relationships.children(n) {
            if let Some(&sp) = south_pos.get(child.as_str()) {
                edges.push((np, sp));
            }
        }
    }

    // O(E²) is fine for per-level edge counts of an editor diagram
    let mut crossings = 0;
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            let (n1, s1) = edges[i];
            let (n2, s2) = edges[j];
            if (n1 < n2 && s1 > s2) || (n1 > n2 && s1 < s2) {
                crossings += 1;
            }
        }
    }
    crossings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Edge, Node, NodeKind};
    use crate::engine::{assign_levels, build_relationships, calculate_weights};

    fn sorted_for(ids: &[&str], edges: &[(&str, &str)]) -> (Vec<Vec<String>>, Relationships) {
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(*id, NodeKind::Dnn)).collect();
        let edges: Vec<Edge> = edges.iter().map(|(s, t)| Edge::new(*s, *t)).collect();
        let rel = build_relationships(&nodes, &edges);
        let levels = assign_levels(&nodes, &rel);
        let weights = calculate_weights(&nodes, &rel);
        (sort_within_levels(&levels, &rel, &weights), rel)
    }

    fn rel_for(edges: &[(&str, &str)]) -> Relationships {
        let mut ids: Vec<&str> = Vec::new();
        for (s, t) in edges {
            for id in [*s, *t] {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(*id, NodeKind::Dnn)).collect();
        let edges: Vec<Edge> = edges.iter().map(|(s, t)| Edge::new(*s, *t)).collect();
        build_relationships(&nodes, &edges)
    }

    fn levels(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    // =========================================================================
    // Cross count
    // =========================================================================

    #[test]
    fn test_cross_count_no_crossings() {
        let rel = rel_for(&[("A", "C"), ("B", "D")]);
        assert_eq!(cross_count(&levels(&[&["A", "B"], &["C", "D"]]), &rel), 0);
    }

    #[test]
    fn test_cross_count_one_crossing() {
        let rel = rel_for(&[("A", "D"), ("B", "C")]);
        assert_eq!(cross_count(&levels(&[&["A", "B"], &["C", "D"]]), &rel), 1);
    }

    #[test]
    fn test_cross_count_multi_level() {
        let rel = rel_for(&[("A", "D"), ("B", "C"), ("C", "F"), ("D", "E")]);
        let rows = levels(&[&["A", "B"], &["C", "D"], &["E", "F"]]);
        assert_eq!(cross_count(&rows, &rel), 2);
    }

    #[test]
    fn test_cross_count_empty() {
        let rel = Relationships::default();
        assert_eq!(cross_count(&[], &rel), 0);
        assert_eq!(cross_count(&levels(&[&["A"]]), &rel), 0);
    }

    // =========================================================================
    // Sibling order
    // =========================================================================

    #[test]
    fn test_heavier_sibling_first() {
        // r -> light, r -> heavy -> {x, y}
        let (sorted, _) = sorted_for(
            &["r", "light", "heavy", "x", "y"],
            &[("r", "light"), ("r", "heavy"), ("heavy", "x"), ("heavy", "y")],
        );
        assert_eq!(sorted[1], vec!["heavy", "light"]);
    }

    #[test]
    fn test_equal_weight_sorted_by_id() {
        let (sorted, _) = sorted_for(&["r", "c2", "c1"], &[("r", "c2"), ("r", "c1")]);
        assert_eq!(sorted[1], vec!["c1", "c2"]);
    }

    #[test]
    fn test_children_follow_parent_order() {
        // p1 is heavier and sorts first; its child must then precede p2's
        // child even though p2's child has the larger weight
        let (sorted, rel) = sorted_for(
            &["r", "p1", "p2", "a", "b", "b1", "b2", "p1x", "p1y"],
            &[
                ("r", "p2"),
                ("r", "p1"),
                ("p1", "a"),
                ("p1", "p1x"),
                ("p1", "p1y"),
                ("p2", "b"),
                ("b", "b1"),
                ("b", "b2"),
            ],
        );
        assert_eq!(sorted[1], vec!["p1", "p2"]);
        assert_eq!(sorted[2], vec!["a", "p1x", "p1y", "b"]);
        assert_eq!(cross_count(&sorted, &rel), 0);
    }

    #[test]
    fn test_roots_sort_by_weight_then_id() {
        let (sorted, _) = sorted_for(
            &["z", "y", "x", "x1"],
            &[("x", "x1")],
        );
        assert_eq!(sorted[0], vec!["x", "y", "z"]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let edges = [("r", "b"), ("r", "a"), ("a", "c"), ("b", "d")];
        let (first, _) = sorted_for(&["r", "a", "b", "c", "d"], &edges);
        let (second, _) = sorted_for(&["r", "b", "a", "d", "c"], &edges);
        assert_eq!(first, second);
    }
}
