//! Left-to-right columns, one per level

use std::collections::HashMap;

use tracing::{debug, span, Level};

use super::{level_groups, OrphanLevels};
use crate::core::{LayoutError, LayoutInput, LayoutStrategy, LayoutType, Node, Position};
use crate::engine::{separate_levels, Axis};

/// Horizontal strategy
///
/// Column x is `marginX + level * (nodeWidth + horizontalSpacing)`. A
/// column's nodes are stacked in sorted order with pitch
/// `nodeHeight + verticalSpacing * compactFactor`, and the mean y of the
/// column is `marginY`. Orphans go below the lowest node of their column.
#[derive(Debug, Clone, Copy, Default)]
pub struct Horizontal;

impl LayoutStrategy for Horizontal {
    fn name(&self) -> &'static str {
        "horizontal"
    }

    fn layout_type(&self) -> LayoutType {
        LayoutType::Horizontal
    }

    fn arrange(&self, input: &LayoutInput<'_>) -> Result<Vec<Node>, LayoutError> {
        let span = span!(
            Level::DEBUG,
            "position_horizontal",
            node_count = input.nodes.len()
        );
        let _enter = span.enter();

        let config = input.config;
        let hierarchy = input.hierarchy;
        let orphans = OrphanLevels::new(input.nodes, hierarchy);

        let column_x =
            |level: usize| config.margin_x + level as f64 * (config.node_width + config.horizontal_spacing);
        let pitch = config.node_height + config.vertical_spacing * config.compact_factor;

        let mut positions: HashMap<&str, Position> = HashMap::new();
        // Lowest y used per column, for orphans
        let mut used_y_positions: HashMap<usize, f64> = HashMap::new();

        for (level, ids) in hierarchy.ordered_levels.iter().enumerate() {
            let count = ids.len() as f64;
            let total_height = count * config.node_height
                + (count - 1.0).max(0.0) * config.vertical_spacing * config.compact_factor;
            let start_y = config.margin_y - total_height / 2.0 + config.node_height / 2.0;

            for (i, id) in ids.iter().enumerate() {
                let y = start_y + i as f64 * pitch;
                positions.insert(id.as_str(), Position::new(column_x(level), y));
                used_y_positions
                    .entry(level)
                    .and_modify(|lowest| *lowest = lowest.max(y))
                    .or_insert(y);
            }
            debug!(level, count = ids.len(), start_y, "Placed column");
        }

        for node in input.nodes.iter().filter(|n| orphans.is_orphan(n)) {
            if positions.contains_key(node.id.as_str()) {
                continue;
            }
            let level = orphans.level(node);
            let y = match used_y_positions.get(&level) {
                Some(lowest) => lowest + pitch,
                None => config.margin_y,
            };
            used_y_positions.insert(level, y);
            debug!(node = %node.id, level, y, "Placed orphan");
            positions.insert(node.id.as_str(), Position::new(column_x(level), y));
        }

        let mut placed = input
            .nodes
            .iter()
            .map(|node| {
                positions
                    .get(node.id.as_str())
                    .map(|&position| node.placed_at(position))
                    .ok_or_else(|| {
                        LayoutError::strategy(self.name(), format!("node '{}' was not placed", node.id))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if config.prevent_overlap {
            let groups = level_groups(&placed, &orphans);
            separate_levels(
                &mut placed,
                &groups,
                Axis::Vertical,
                config.node_extent() + config.min_node_distance,
            );
        }

        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Edge, LayoutConfig, NodeKind};
    use crate::engine::Hierarchy;

    fn run(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> Vec<Node> {
        let hierarchy = Hierarchy::analyze(nodes, edges);
        let input = LayoutInput {
            nodes,
            edges,
            config,
            hierarchy: &hierarchy,
        };
        Horizontal.arrange(&input).unwrap()
    }

    #[test]
    fn test_columns_by_level() {
        let nodes = vec![
            Node::new("network-1", NodeKind::Network),
            Node::new("cell-area-1", NodeKind::CellArea),
            Node::new("rrp-1", NodeKind::Rrp),
        ];
        let edges = vec![
            Edge::new("network-1", "cell-area-1"),
            Edge::new("cell-area-1", "rrp-1"),
        ];
        let config = LayoutConfig::horizontal();
        let placed = run(&nodes, &edges, &config);

        for (level, node) in placed.iter().enumerate() {
            assert_eq!(node.position.x, 400.0 + level as f64 * 430.0);
            // a single-node column sits on the margin
            assert_eq!(node.position.y, 100.0);
        }
    }

    #[test]
    fn test_column_mean_is_margin() {
        let nodes = vec![
            Node::new("r", NodeKind::CellArea),
            Node::new("a", NodeKind::Rrp),
            Node::new("b", NodeKind::Rrp),
            Node::new("c", NodeKind::Rrp),
        ];
        let edges = vec![Edge::new("r", "a"), Edge::new("r", "b"), Edge::new("r", "c")];
        let config = LayoutConfig::horizontal();
        let placed = run(&nodes, &edges, &config);

        let ys: Vec<f64> = placed[1..].iter().map(|n| n.position.y).collect();
        let mean = ys.iter().sum::<f64>() / 3.0;
        assert!((mean - config.margin_y).abs() < 1e-9);
        assert!((ys[1] - ys[0] - (120.0 + 180.0 * 0.8)).abs() < 1e-9);
    }

    #[test]
    fn test_orphan_below_column() {
        let nodes = vec![
            Node::new("network-1", NodeKind::Network),
            Node::new("cell-area-1", NodeKind::CellArea),
            Node::with_parent("cell-area-2", NodeKind::CellArea, "network-1"),
        ];
        // cell-area-2 is only reachable through a dangling edge
        let edges = vec![
            Edge::new("network-1", "cell-area-1"),
            Edge::new("ghost", "cell-area-2"),
            Edge::new("cell-area-2", "cell-area-2"),
        ];
        let config = LayoutConfig::horizontal();
        let placed = run(&nodes, &edges, &config);

        assert_eq!(placed[2].position.x, placed[1].position.x);
        assert!((placed[2].position.y - (placed[1].position.y + 264.0)).abs() < 1e-9);
    }
}
