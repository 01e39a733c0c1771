//! Top-down balanced tree
//!
//! Each level is a row. Subtrees are built bottom-up with per-row contours:
//! siblings are packed left to right as tightly as the pitch allows and the
//! parent is centred over them (its x is the mean of its children's x).
//! Root trees are then packed the same way with a wider pitch, and the
//! row of roots is centred on `marginX`.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, span, trace, Level};

use super::{level_groups, OrphanLevels};
use crate::core::{LayoutConfig, LayoutError, LayoutInput, LayoutStrategy, LayoutType, Node, Position};
use crate::engine::{separate_levels, Axis, Hierarchy};

/// Balanced tree strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedTree;

/// Leftmost and rightmost x per row of a subtree, relative to its root
#[derive(Debug, Clone)]
struct Contour {
    left: VecDeque<f64>,
    right: VecDeque<f64>,
}

impl Contour {
    fn leaf() -> Self {
        Self {
            left: VecDeque::from([0.0]),
            right: VecDeque::from([0.0]),
        }
    }

    /// Smallest shift of `other` that keeps each shared row `pitch` clear
    fn separation(&self, other: &Contour, pitch: f64) -> f64 {
        self.right
            .iter()
            .zip(other.left.iter())
            .map(|(right, left)| right - left + pitch)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn merge(&mut self, other: &Contour, shift: f64) {
        for (row, (left, right)) in other.left.iter().zip(other.right.iter()).enumerate() {
            if row < self.left.len() {
                self.left[row] = self.left[row].min(left + shift);
                self.right[row] = self.right[row].max(right + shift);
            } else {
                self.left.push_back(left + shift);
                self.right.push_back(right + shift);
            }
        }
    }

    fn shift(&mut self, dx: f64) {
        self.left.iter_mut().for_each(|x| *x += dx);
        self.right.iter_mut().for_each(|x| *x += dx);
    }

    /// Put a parent row at x = 0 on top
    fn push_parent(&mut self) {
        self.left.push_front(0.0);
        self.right.push_front(0.0);
    }
}

/// Centre-to-centre distance between siblings
fn sibling_pitch(config: &LayoutConfig) -> f64 {
    if config.prevent_overlap {
        config.node_extent() + config.min_node_distance
    } else {
        config.node_width + config.min_node_distance
    }
}

/// Children along the spanning forest, in sorted order
fn tree_children(hierarchy: &Hierarchy) -> HashMap<&str, Vec<&str>> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for level in hierarchy.ordered_levels.iter().skip(1) {
        for id in level {
            if let Some(parent) = hierarchy.levels.tree_parent(id) {
                children.entry(parent).or_default().push(id.as_str());
            }
        }
    }
    children
}

/// x of every leveled node
fn place_forest(hierarchy: &Hierarchy, config: &LayoutConfig) -> HashMap<String, f64> {
    let pitch = sibling_pitch(config);
    let root_pitch = pitch.max(config.node_width + config.horizontal_spacing);
    let children_of = tree_children(hierarchy);

    // Bottom-up: offset of each node from its tree parent, and subtree contours
    let mut offsets: HashMap<&str, f64> = HashMap::new();
    let mut contours: HashMap<&str, Contour> = HashMap::new();

    for level in hierarchy.ordered_levels.iter().rev() {
        for id in level {
            let id = id.as_str();
            let Some(children) = children_of.get(id) else {
                contours.insert(id, Contour::leaf());
                continue;
            };

            let mut combined: Option<Contour> = None;
            let mut shifts: Vec<(&str, f64)> = Vec::with_capacity(children.len());
            for &child in children {
                let contour = contours.remove(child).unwrap_or_else(Contour::leaf);
                let shift = match combined.as_mut() {
                    None => {
                        combined = Some(contour);
                        0.0
                    }
                    Some(acc) => {
                        let shift = acc.separation(&contour, pitch);
                        acc.merge(&contour, shift);
                        shift
                    }
                };
                shifts.push((child, shift));
            }

            let mean = shifts.iter().map(|(_, s)| s).sum::<f64>() / shifts.len() as f64;
            for (child, shift) in shifts {
                offsets.insert(child, shift - mean);
            }

            let mut contour = combined.unwrap_or_else(Contour::leaf);
            contour.shift(-mean);
            contour.push_parent();
            trace!(node = id, children = children.len(), rows = contour.left.len(), "Packed subtree");
            contours.insert(id, contour);
        }
    }

    // Roots left to right around 0, then the whole forest centred on marginX
    let mut root_xs: Vec<(&str, f64)> = Vec::new();
    let mut forest: Option<Contour> = None;
    if let Some(roots) = hierarchy.ordered_levels.first() {
        for root in roots {
            let contour = contours.remove(root.as_str()).unwrap_or_else(Contour::leaf);
            let x = match forest.as_mut() {
                None => {
                    forest = Some(contour);
                    0.0
                }
                Some(acc) => {
                    let x = acc.separation(&contour, root_pitch);
                    acc.merge(&contour, x);
                    x
                }
            };
            root_xs.push((root.as_str(), x));
        }
    }

    let mut x_of: HashMap<String, f64> = HashMap::new();
    if !root_xs.is_empty() {
        let mean = root_xs.iter().map(|(_, x)| x).sum::<f64>() / root_xs.len() as f64;
        for (root, x) in root_xs {
            let x = x - mean + config.margin_x;
            debug!(root, x, "Placed root tree");
            x_of.insert(root.to_string(), x);
        }
    }

    for level in hierarchy.ordered_levels.iter().skip(1) {
        for id in level {
            let parent_x = hierarchy
                .levels
                .tree_parent(id)
                .and_then(|p| x_of.get(p).copied());
            if let Some(parent_x) = parent_x {
                let offset = offsets.get(id.as_str()).copied().unwrap_or(0.0);
                x_of.insert(id.clone(), parent_x + offset);
            }
        }
    }

    x_of
}

impl LayoutStrategy for BalancedTree {
    fn name(&self) -> &'static str {
        "balanced-tree"
    }

    fn layout_type(&self) -> LayoutType {
        LayoutType::BalancedTree
    }

    fn arrange(&self, input: &LayoutInput<'_>) -> Result<Vec<Node>, LayoutError> {
        let span = span!(
            Level::DEBUG,
            "position_balanced_tree",
            node_count = input.nodes.len(),
            level_count = input.hierarchy.ordered_levels.len()
        );
        let _enter = span.enter();

        let config = input.config;
        let hierarchy = input.hierarchy;
        let orphans = OrphanLevels::new(input.nodes, hierarchy);
        let row_y = |level: usize| config.margin_y + level as f64 * config.vertical_spacing;

        let x_of = place_forest(hierarchy, config);

        // Rightmost x used per level, for orphans
        let mut used_x_positions: HashMap<usize, f64> = HashMap::new();
        for (level, ids) in hierarchy.ordered_levels.iter().enumerate() {
            if let Some(max) = ids
                .iter()
                .filter_map(|id| x_of.get(id).copied())
                .reduce(f64::max)
            {
                used_x_positions.insert(level, max);
            }
        }

        let mut orphan_positions: HashMap<&str, Position> = HashMap::new();
        for node in input.nodes.iter().filter(|n| orphans.is_orphan(n)) {
            if orphan_positions.contains_key(node.id.as_str()) {
                continue;
            }
            let level = orphans.level(node);
            let x = match used_x_positions.get(&level) {
                Some(used) => used + config.node_width + config.horizontal_spacing,
                None => config.margin_x,
            };
            used_x_positions.insert(level, x);
            debug!(node = %node.id, level, x, "Placed orphan");
            orphan_positions.insert(node.id.as_str(), Position::new(x, row_y(level)));
        }

        let mut placed = Vec::with_capacity(input.nodes.len());
        for node in input.nodes {
            let position = match hierarchy.level(&node.id) {
                Some(level) => x_of
                    .get(&node.id)
                    .map(|&x| Position::new(x, row_y(level))),
                None => orphan_positions.get(node.id.as_str()).copied(),
            }
            .ok_or_else(|| {
                LayoutError::strategy(self.name(), format!("node '{}' was not placed", node.id))
            })?;

            let mut node = node.placed_at(position);
            if node.parent_id.is_none() {
                node.parent_id = hierarchy.levels.tree_parent(&node.id).map(str::to_string);
            }
            placed.push(node);
        }

        if config.prevent_overlap {
            let groups = level_groups(&placed, &orphans);
            separate_levels(
                &mut placed,
                &groups,
                Axis::Horizontal,
                config.node_extent() + config.min_node_distance,
            );
        }

        Ok(placed)
    }
}
