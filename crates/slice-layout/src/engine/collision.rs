//! Collision handling
//!
//! Two independent tools live here: a spiral search that finds a free spot
//! for one interactively inserted node, and the same-level overlap pass the
//! bulk strategies run when `preventOverlap` is set.
//!
//! Overlap is judged by centre distance against the largest side of either
//! box, so the test is conservative and rotation independent.

use std::f64::consts::FRAC_PI_2;

use tracing::{debug, span, trace, warn, Level};

use crate::core::{CollisionConfig, Node, Position, Size};

/// Direction along which the overlap pass pushes nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Rows: push to the right
    Horizontal,
    /// Columns: push downwards
    Vertical,
}

impl Axis {
    fn coordinate(&self, position: &Position) -> f64 {
        match self {
            Axis::Horizontal => position.x,
            Axis::Vertical => position.y,
        }
    }

    fn coordinate_mut<'a>(&self, position: &'a mut Position) -> &'a mut f64 {
        match self {
            Axis::Horizontal => &mut position.x,
            Axis::Vertical => &mut position.y,
        }
    }
}

/// Whether two boxes at `a` and `b` come closer than their largest side
/// plus `min_spacing`
pub fn would_overlap(a: Position, a_size: Size, b: Position, b_size: Size, min_spacing: f64) -> bool {
    let min_distance = a_size.extent().max(b_size.extent()) + min_spacing;
    a.distance_to(b) < min_distance
}

/// Find a position near `desired` where a node of `size` overlaps nothing
///
/// Tries `desired` first, then walks a spiral around it: each attempt turns
/// a quarter circle and the radius grows by `spiral_step` every
/// `ring_interval` attempts. The desired point counts as the first of
/// `max_attempts` candidates. When every candidate collides the node goes
/// to the right of the rightmost existing node at the desired height.
pub fn find_free_position(
    desired: Position,
    size: Size,
    existing: &[Node],
    config: &CollisionConfig,
) -> Position {
    let span = span!(
        Level::DEBUG,
        "find_free_position",
        x = desired.x,
        y = desired.y,
        existing = existing.len()
    );
    let _enter = span.enter();

    if existing.is_empty() {
        return desired;
    }

    let is_free = |candidate: Position| {
        !existing.iter().any(|node| {
            would_overlap(
                candidate,
                size,
                node.position,
                node.kind.dimensions(),
                config.min_spacing,
            )
        })
    };

    if is_free(desired) {
        return desired;
    }

    let ring_interval = config.ring_interval.max(1);
    for attempt in 0..config.max_attempts.saturating_sub(1) {
        let angle = attempt as f64 * FRAC_PI_2;
        let radius = config.spiral_step * (1 + attempt / ring_interval) as f64;
        let candidate = Position::new(
            desired.x + radius * angle.cos(),
            desired.y + radius * angle.sin(),
        );
        trace!(attempt, x = candidate.x, y = candidate.y, "Trying spiral position");

        if is_free(candidate) {
            debug!(attempt, x = candidate.x, y = candidate.y, "Found free position");
            return candidate;
        }
    }

    let rightmost = existing
        .iter()
        .map(|n| n.position.x)
        .fold(f64::NEG_INFINITY, f64::max);
    let fallback = Position::new(rightmost + size.width + config.min_spacing, desired.y);
    warn!(
        attempts = config.max_attempts,
        x = fallback.x,
        y = fallback.y,
        "Spiral search exhausted, placing right of rightmost node"
    );
    fallback
}

/// Same-level overlap pass
///
/// For each group of node indices, sort by the coordinate along `axis` and
/// push every node forward until it is at least `min_distance` past its
/// predecessor. Nodes only ever move forward, and the relative order inside
/// a group is preserved.
pub fn separate_levels(nodes: &mut [Node], groups: &[Vec<usize>], axis: Axis, min_distance: f64) {
    let span = span!(
        Level::DEBUG,
        "separate_levels",
        groups = groups.len(),
        min_distance
    );
    let _enter = span.enter();

    let mut moved = 0usize;
    for group in groups {
        let mut order: Vec<usize> = group.iter().copied().filter(|&i| i < nodes.len()).collect();
        order.sort_by(|&a, &b| {
            axis.coordinate(&nodes[a].position)
                .total_cmp(&axis.coordinate(&nodes[b].position))
        });

        let mut previous: Option<f64> = None;
        for index in order {
            let node = &mut nodes[index];
            let current = axis.coordinate(&node.position);
            let placed = match previous {
                Some(previous) if current < previous + min_distance => {
                    let minimum = previous + min_distance;
                    trace!(node = %node.id, from = current, to = minimum, "Pushed node");
                    *axis.coordinate_mut(&mut node.position) = minimum;
                    moved += 1;
                    minimum
                }
                _ => current,
            };
            previous = Some(placed);
        }
    }

    if moved > 0 {
        debug!(moved, "Overlap pass moved nodes");
    }
}
