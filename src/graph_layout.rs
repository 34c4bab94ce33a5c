use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;

use crate::graph_ast::*;

/// Spacing between layers and between siblings within a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Distance between consecutive depths along the primary axis.
    pub layer_gap: usize,
    /// Sibling spacing along x when laying out top-down.
    pub td_sibling_gap: usize,
    /// Sibling spacing along y when laying out left-right.
    pub lr_sibling_gap: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layer_gap: 200,
            td_sibling_gap: 200,
            lr_sibling_gap: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphLayout {
    /// In placement order: depth first, then node id.
    pub positions: IndexMap<NodeId, Position>,
}

impl GraphLayout {
    pub fn position(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }
}

pub fn compute(graph: &Graph) -> GraphLayout {
    compute_with(graph, &LayoutConfig::default())
}

pub fn compute_with(graph: &Graph, config: &LayoutConfig) -> GraphLayout {
    let depths = assign_depths(graph);

    let mut order: Vec<&str> = graph.nodes.iter().map(String::as_str).collect();
    order.sort_by(|a, b| depths[a].cmp(&depths[b]).then_with(|| a.cmp(b)));

    let mut placed_per_depth: HashMap<usize, usize> = HashMap::new();
    let mut positions = IndexMap::with_capacity(order.len());

    for id in order {
        let depth = depths[id];
        let slot = placed_per_depth.entry(depth).or_insert(0);
        let offset = *slot;
        *slot += 1;

        let position = if graph.direction.is_left_right() {
            Position {
                x: depth * config.layer_gap,
                y: offset * config.lr_sibling_gap,
            }
        } else {
            Position {
                x: offset * config.td_sibling_gap,
                y: depth * config.layer_gap,
            }
        };
        positions.insert(id.to_string(), position);
    }

    tracing::debug!(nodes = positions.len(), "computed layout");
    GraphLayout { positions }
}

/// Kahn-style layering: a node's depth is fixed when its last incoming edge is
/// consumed. Nodes on or behind a cycle never reach in-degree zero and stay at 0.
pub fn assign_depths(graph: &Graph) -> HashMap<&str, usize> {
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut in_degree: HashMap<&str, usize> =
        graph.nodes.iter().map(|id| (id.as_str(), 0)).collect();

    for edge in &graph.edges {
        successors
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
        if let Some(count) = in_degree.get_mut(edge.to.as_str()) {
            *count += 1;
        }
    }

    let mut depths: HashMap<&str, usize> =
        graph.nodes.iter().map(|id| (id.as_str(), 0)).collect();
    let mut frontier: VecDeque<&str> = graph
        .nodes
        .iter()
        .map(String::as_str)
        .filter(|id| in_degree[id] == 0)
        .collect();
    let mut resolved = 0;

    while let Some(current) = frontier.pop_front() {
        resolved += 1;
        let depth = depths[current];
        let Some(children) = successors.get(current) else {
            continue;
        };
        for &child in children {
            let Some(count) = in_degree.get_mut(child) else {
                continue;
            };
            *count -= 1;
            if *count == 0 {
                depths.insert(child, depth + 1);
                frontier.push_back(child);
            }
        }
    }

    if resolved < graph.nodes.len() {
        tracing::warn!(
            unresolved = graph.nodes.len() - resolved,
            "cycle detected, unresolved nodes placed in the first layer"
        );
    }

    depths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_parser::parse_graph;
    use pretty_assertions::assert_eq;

    fn pos(x: usize, y: usize) -> Position {
        Position { x, y }
    }

    #[test]
    fn depth_linear_chain() {
        let graph = parse_graph("graph TD\n    A --> B\n    B --> C\n");
        let depths = assign_depths(&graph);
        assert_eq!(depths["A"], 0);
        assert_eq!(depths["B"], 1);
        assert_eq!(depths["C"], 2);
    }

    #[test]
    fn depth_fan_in_takes_longest_path() {
        let graph = parse_graph("A --> C\nA --> B\nB --> C");
        let depths = assign_depths(&graph);
        assert_eq!(depths["B"], 1);
        assert_eq!(depths["C"], 2);
    }

    #[test]
    fn depth_parallel_edges_resolve() {
        let graph = parse_graph("A --> B\nA --> B");
        let depths = assign_depths(&graph);
        assert_eq!(depths["B"], 1);
    }

    #[test]
    fn depth_self_loop_stays_at_zero() {
        let graph = parse_graph("A --> B\nB --> B\nB --> C");
        let depths = assign_depths(&graph);
        assert_eq!(depths["A"], 0);
        assert_eq!(depths["B"], 0);
        assert_eq!(depths["C"], 0);
    }

    #[test]
    fn layout_td_chain() {
        let graph = parse_graph("graph TD\nA --> B\nB -- yes --> C");
        let layout = compute(&graph);
        assert_eq!(layout.position("A"), Some(pos(0, 0)));
        assert_eq!(layout.position("B"), Some(pos(0, 200)));
        assert_eq!(layout.position("C"), Some(pos(0, 400)));
    }

    #[test]
    fn layout_td_siblings_sorted_by_id() {
        let graph = parse_graph("A --> C\nA --> B");
        let layout = compute(&graph);
        assert_eq!(layout.position("A"), Some(pos(0, 0)));
        assert_eq!(layout.position("B"), Some(pos(0, 200)));
        assert_eq!(layout.position("C"), Some(pos(200, 200)));
    }

    #[test]
    fn layout_lr_siblings() {
        let graph = parse_graph("graph LR\nA --> B\nA --> C\nD");
        let layout = compute(&graph);
        assert_eq!(layout.position("A"), Some(pos(0, 0)));
        assert_eq!(layout.position("D"), Some(pos(0, 120)));
        assert_eq!(layout.position("B"), Some(pos(200, 0)));
        assert_eq!(layout.position("C"), Some(pos(200, 120)));
    }

    #[test]
    fn layout_unknown_direction_is_top_down() {
        let td = compute(&parse_graph("graph TD\nA --> B\nA --> C"));
        let bt = compute(&parse_graph("graph BT\nA --> B\nA --> C"));
        assert_eq!(td, bt);
    }

    #[test]
    fn layout_cycle_collapses_to_first_layer() {
        let graph = parse_graph("A --> B\nB --> A");
        let layout = compute(&graph);
        assert_eq!(layout.position("A"), Some(pos(0, 0)));
        assert_eq!(layout.position("B"), Some(pos(200, 0)));
    }

    #[test]
    fn layout_placement_order() {
        let graph = parse_graph("Z --> Y\nM");
        let layout = compute(&graph);
        let order: Vec<&str> = layout.positions.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["M", "Z", "Y"]);
    }

    #[test]
    fn layout_empty_graph() {
        let layout = compute(&Graph::default());
        assert!(layout.positions.is_empty());
    }

    #[test]
    fn layout_custom_spacing() {
        let config = LayoutConfig {
            layer_gap: 10,
            td_sibling_gap: 3,
            lr_sibling_gap: 5,
        };
        let layout = compute_with(&parse_graph("A --> B\nA --> C"), &config);
        assert_eq!(layout.position("C"), Some(pos(3, 10)));
    }
}
