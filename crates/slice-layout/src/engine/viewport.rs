//! Shift a laid-out diagram back into view

use tracing::debug;

use crate::core::{Node, Position};

/// Translate `nodes` so none lies left of or above `padding`
///
/// Only translates, never scales, and only ever moves nodes into view: an
/// axis whose minimum already sits at or past the padding is not shifted.
pub fn fit_to_viewport(nodes: &[Node], padding: f64) -> Vec<Node> {
    let Some(min_x) = nodes.iter().map(|n| n.position.x).reduce(f64::min) else {
        return Vec::new();
    };
    let min_y = nodes
        .iter()
        .map(|n| n.position.y)
        .fold(f64::INFINITY, f64::min);

    if min_x >= padding && min_y >= padding {
        return nodes.to_vec();
    }

    let dx = (padding - min_x).max(0.0);
    let dy = (padding - min_y).max(0.0);
    debug!(dx, dy, "Shifting nodes into viewport");

    nodes
        .iter()
        .map(|n| n.placed_at(Position::new(n.position.x + dx, n.position.y + dy)))
        .collect()
}
