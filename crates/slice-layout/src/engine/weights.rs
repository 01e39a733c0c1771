//! Subtree weights used to order siblings

use std::collections::{HashMap, HashSet};

use tracing::{debug, span, Level};

use super::Relationships;
use crate::core::Node;

/// `weight(n) = 1 + sum of weight(children)`; leaves weigh 1
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtreeWeights {
    pub weight_of: HashMap<String, usize>,
}

impl SubtreeWeights {
    /// Weight of `id`, 1 for unknown ids
    pub fn weight(&self, id: &str) -> usize {
        self.weight_of.get(id).copied().unwrap_or(1)
    }
}

/// Compute the weight of every node
///
/// Post-order with memoization. A child that is still on the traversal
/// stack closes a cycle and contributes nothing.
pub fn calculate_weights(nodes: &[Node], relationships: &Relationships) -> SubtreeWeights {
    let span = span!(Level::DEBUG, "calculate_weights", node_count = nodes.len());
    let _enter = span.enter();

    let mut weights: HashMap<String, usize> = HashMap::new();
    let mut on_stack: HashSet<&str> = HashSet::new();

    for node in nodes {
        if weights.contains_key(&node.id) {
            continue;
        }

        // (id, index of the next child to visit)
        let mut stack: Vec<(&str, usize)> = vec![(node.id.as_str(), 0)];
        on_stack.insert(node.id.as_str());

        while let Some(&(id, next)) = stack.last() {
            let children = relationships.children(id);
            match children.get(next) {
                Some(child) => {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    let child = child.as_str();
                    if !weights.contains_key(child) && !on_stack.contains(child) {
                        on_stack.insert(child);
                        stack.push((child, 0));
                    }
                }
                None => {
                    let weight = 1 + children
                        .iter()
                        .filter(|c| !on_stack.contains(c.as_str()))
                        .filter_map(|c| weights.get(c))
                        .sum::<usize>();
                    weights.insert(id.to_string(), weight);
                    on_stack.remove(id);
                    stack.pop();
                }
            }
        }
    }

    debug!(
        heaviest = weights.values().copied().max().unwrap_or(0),
        "Weights calculated"
    );

    SubtreeWeights { weight_of: weights }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Edge, NodeKind};
    use crate::engine::build_relationships;

    fn weights_for(ids: &[&str], edges: &[(&str, &str)]) -> SubtreeWeights {
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(*id, NodeKind::Dnn)).collect();
        let edges: Vec<Edge> = edges.iter().map(|(s, t)| Edge::new(*s, *t)).collect();
        let rel = build_relationships(&nodes, &edges);
        calculate_weights(&nodes, &rel)
    }

    #[test]
    fn test_leaf_weighs_one() {
        let weights = weights_for(&["a"], &[]);
        assert_eq!(weights.weight("a"), 1);
    }

    #[test]
    fn test_subtree_sum() {
        // a -> b -> {c, d}, a -> e
        let weights = weights_for(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("b", "d"), ("a", "e")],
        );
        assert_eq!(weights.weight("a"), 5);
        assert_eq!(weights.weight("b"), 3);
        assert_eq!(weights.weight("e"), 1);
    }

    #[test]
    fn test_two_cycle_terminates() {
        let weights = weights_for(&["a", "b"], &[("a", "b"), ("b", "a")]);
        // b's back-edge to a contributes nothing
        assert_eq!(weights.weight("b"), 1);
        assert_eq!(weights.weight("a"), 2);
    }

    #[test]
    fn test_self_loop_terminates() {
        let weights = weights_for(&["a"], &[("a", "a")]);
        assert_eq!(weights.weight("a"), 1);
    }

    #[test]
    fn test_every_node_has_positive_weight() {
        let weights = weights_for(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("d", "b")],
        );
        for id in ["a", "b", "c", "d"] {
            assert!(weights.weight(id) >= 1);
        }
    }
}
