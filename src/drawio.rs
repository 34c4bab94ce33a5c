use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::graph_ast::Graph;
use crate::graph_layout::{GraphLayout, Position};
use crate::payload;

/// Fixed appearance shared by every vertex and every edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramStyle {
    pub vertex_style: String,
    pub edge_style: String,
    pub node_width: usize,
    pub node_height: usize,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            vertex_style: "rounded=1;whiteSpace=wrap;html=1;".to_string(),
            edge_style:
                "edgeStyle=orthogonalEdgeStyle;rounded=0;orthogonalLoop=1;jettySize=auto;html=1;"
                    .to_string(),
            node_width: 120,
            node_height: 60,
        }
    }
}

/// Index into `DiagramDocument::cells`; doubles as the cell's markup id.
pub type CellId = usize;

pub const ROOT_CELL: CellId = 0;
pub const LAYER_CELL: CellId = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    Root,
    Layer,
    Vertex {
        position: Position,
        width: usize,
        height: usize,
    },
    Edge {
        source: CellId,
        target: CellId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub value: String,
    pub style: String,
    pub parent: Option<CellId>,
    pub kind: CellKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramDocument {
    pub cells: Vec<Cell>,
}

impl Default for DiagramDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramDocument {
    /// A document holding only the root cell and the default layer.
    pub fn new() -> Self {
        let root = Cell {
            value: String::new(),
            style: String::new(),
            parent: None,
            kind: CellKind::Root,
        };
        let layer = Cell {
            value: String::new(),
            style: String::new(),
            parent: Some(ROOT_CELL),
            kind: CellKind::Layer,
        };
        Self {
            cells: vec![root, layer],
        }
    }

    pub fn push(&mut self, cell: Cell) -> CellId {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .filter(|c| matches!(c.kind, CellKind::Vertex { .. }))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .filter(|c| matches!(c.kind, CellKind::Edge { .. }))
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from("<mxfile><diagram><mxGraphModel><root>");
        for (id, cell) in self.cells.iter().enumerate() {
            write_cell(&mut out, id, cell);
        }
        out.push_str("</root></mxGraphModel></diagram></mxfile>");
        out
    }
}

/// Vertex cells come first, in node order, followed by edge cells in edge order.
pub fn build_document(
    graph: &Graph,
    layout: &GraphLayout,
    style: &DiagramStyle,
) -> Result<DiagramDocument> {
    let mut doc = DiagramDocument::new();
    let mut cell_of: HashMap<&str, CellId> = HashMap::with_capacity(graph.nodes.len());

    for node in &graph.nodes {
        let position = layout.position(node).unwrap_or_default();
        let id = doc.push(Cell {
            value: node.clone(),
            style: style.vertex_style.clone(),
            parent: Some(LAYER_CELL),
            kind: CellKind::Vertex {
                position,
                width: style.node_width,
                height: style.node_height,
            },
        });
        cell_of.insert(node.as_str(), id);
    }

    for (index, edge) in graph.edges.iter().enumerate() {
        let endpoint = |node: &str| {
            cell_of
                .get(node)
                .copied()
                .ok_or_else(|| Error::DanglingEndpoint {
                    edge: index,
                    node: node.to_string(),
                })
        };
        let source = endpoint(&edge.from)?;
        let target = endpoint(&edge.to)?;
        doc.push(Cell {
            value: edge.label.clone(),
            style: style.edge_style.clone(),
            parent: Some(LAYER_CELL),
            kind: CellKind::Edge { source, target },
        });
    }

    tracing::debug!(cells = doc.cells.len(), "built diagram document");
    Ok(doc)
}

pub fn serialize(graph: &Graph, layout: &GraphLayout, style: &DiagramStyle) -> Result<String> {
    let markup = build_document(graph, layout, style)?.to_xml();
    payload::encode(&markup)
}

fn write_cell(out: &mut String, id: CellId, cell: &Cell) {
    let id = id.to_string();
    let parent = cell.parent.map(|p| p.to_string());

    match &cell.kind {
        CellKind::Root | CellKind::Layer => {
            let mut attrs = vec![("id", id.as_str())];
            if let Some(parent) = &parent {
                attrs.push(("parent", parent.as_str()));
            }
            write_empty(out, "mxCell", &attrs);
        }
        CellKind::Vertex {
            position,
            width,
            height,
        } => {
            let mut attrs = vec![
                ("id", id.as_str()),
                ("value", cell.value.as_str()),
                ("style", cell.style.as_str()),
            ];
            if let Some(parent) = &parent {
                attrs.push(("parent", parent.as_str()));
            }
            attrs.push(("vertex", "1"));
            write_open(out, "mxCell", &attrs);

            let (x, y) = (position.x.to_string(), position.y.to_string());
            let (w, h) = (width.to_string(), height.to_string());
            write_empty(
                out,
                "mxGeometry",
                &[
                    ("as", "geometry"),
                    ("x", x.as_str()),
                    ("y", y.as_str()),
                    ("width", w.as_str()),
                    ("height", h.as_str()),
                ],
            );
            out.push_str("</mxCell>");
        }
        CellKind::Edge { source, target } => {
            let (source, target) = (source.to_string(), target.to_string());
            let mut attrs = vec![
                ("id", id.as_str()),
                ("value", cell.value.as_str()),
                ("style", cell.style.as_str()),
            ];
            if let Some(parent) = &parent {
                attrs.push(("parent", parent.as_str()));
            }
            attrs.extend([
                ("source", source.as_str()),
                ("target", target.as_str()),
                ("edge", "1"),
            ]);
            write_open(out, "mxCell", &attrs);
            write_empty(
                out,
                "mxGeometry",
                &[("as", "geometry"), ("relative", "1")],
            );
            out.push_str("</mxCell>");
        }
    }
}

fn write_open(out: &mut String, tag: &str, attrs: &[(&str, &str)]) {
    out.push('<');
    out.push_str(tag);
    write_attrs(out, attrs);
    out.push('>');
}

fn write_empty(out: &mut String, tag: &str, attrs: &[(&str, &str)]) {
    out.push('<');
    out.push_str(tag);
    write_attrs(out, attrs);
    out.push_str(" />");
}

fn write_attrs(out: &mut String, attrs: &[(&str, &str)]) {
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#09;"),
            // Not allowed anywhere in XML 1.0, not even as character references.
            '\0'..='\x1f' | '\u{fffe}' | '\u{ffff}' => {
                escaped.push(char::REPLACEMENT_CHARACTER)
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
