use indexmap::IndexSet;

/// Node identifiers are compared verbatim, brackets and inner spaces included.
pub type NodeId = String;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    TopDown,
    LeftRight,
    /// Any other token after `graph`, kept as written (upper-cased).
    /// Laid out like `TopDown`.
    Other(String),
}

impl Direction {
    pub fn from_token(token: &str) -> Self {
        let token = token.to_uppercase();
        match token.as_str() {
            "TD" => Direction::TopDown,
            "LR" => Direction::LeftRight,
            _ => Direction::Other(token),
        }
    }

    pub fn is_left_right(&self) -> bool {
        matches!(self, Direction::LeftRight)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Empty when the edge line had no `-- label` part.
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub direction: Direction,
    /// In order of first appearance.
    pub nodes: IndexSet<NodeId>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn add_node(&mut self, id: &str) {
        if !self.nodes.contains(id) {
            self.nodes.insert(id.to_string());
        }
    }

    /// Registers both endpoints, then appends the edge. Parallel edges are kept.
    pub fn add_edge(&mut self, from: &str, to: &str, label: &str) {
        self.add_node(from);
        self.add_node(to);
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
        });
    }
}
