//! One row per node kind
//!
//! Ignores edges entirely: the row is the kind's hierarchy depth, and
//! nodes keep input order within their row. Rows shorter than the longest
//! are centred under it.

use tracing::{debug, span, Level};

use crate::core::{LayoutError, LayoutInput, LayoutStrategy, LayoutType, Node, NodeKind, Position};
use crate::engine::{separate_levels, Axis};

#[derive(Debug, Clone, Copy, Default)]
pub struct GridRows;

impl LayoutStrategy for GridRows {
    fn name(&self) -> &'static str {
        "grid-rows"
    }

    fn layout_type(&self) -> LayoutType {
        LayoutType::GridRows
    }

    fn arrange(&self, input: &LayoutInput<'_>) -> Result<Vec<Node>, LayoutError> {
        let span = span!(Level::DEBUG, "position_grid_rows", node_count = input.nodes.len());
        let _enter = span.enter();

        let config = input.config;
        let pitch = config.node_width + config.horizontal_spacing;
        let row_pitch = config.node_height + config.vertical_spacing;

        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); NodeKind::ALL.len()];
        for (index, node) in input.nodes.iter().enumerate() {
            rows[node.kind.depth()].push(index);
        }
        let longest = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut placed: Vec<Node> = input.nodes.to_vec();
        for (row, indices) in rows.iter().enumerate() {
            if indices.is_empty() {
                continue;
            }
            let offset = (longest - indices.len()) as f64 * pitch / 2.0;
            let y = config.margin_y + row as f64 * row_pitch;
            for (column, &index) in indices.iter().enumerate() {
                let x = config.margin_x + offset + column as f64 * pitch;
                placed[index].position = Position::new(x, y);
            }
            debug!(row, count = indices.len(), offset, "Placed row");
        }

        if config.prevent_overlap {
            separate_levels(
                &mut placed,
                &rows,
                Axis::Horizontal,
                config.node_extent() + config.min_node_distance,
            );
        }

        Ok(placed)
    }
}
