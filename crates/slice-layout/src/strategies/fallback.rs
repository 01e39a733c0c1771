//! Fixed three-column grid
//!
//! Used for the `grid` type and whenever another strategy fails. It reads
//! nothing but input order, so it cannot fail itself.

use tracing::{span, Level};

use crate::core::{LayoutError, LayoutInput, LayoutStrategy, LayoutType, Node, Position};

const ORIGIN: f64 = 100.0;
const COLUMNS: usize = 3;
const COLUMN_PITCH: f64 = 250.0;
const ROW_PITCH: f64 = 200.0;

/// Place nodes on the fixed grid in input order
pub fn fallback_grid(nodes: &[Node]) -> Vec<Node> {
    let span = span!(Level::DEBUG, "position_fallback_grid", node_count = nodes.len());
    let _enter = span.enter();

    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let x = ORIGIN + (i % COLUMNS) as f64 * COLUMN_PITCH;
            let y = ORIGIN + (i / COLUMNS) as f64 * ROW_PITCH;
            node.placed_at(Position::new(x, y))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGrid;

impl LayoutStrategy for FallbackGrid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn layout_type(&self) -> LayoutType {
        LayoutType::Grid
    }

    fn arrange(&self, input: &LayoutInput<'_>) -> Result<Vec<Node>, LayoutError> {
        Ok(fallback_grid(input.nodes))
    }
}
