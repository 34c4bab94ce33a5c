use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::{rest, take_till, take_until, take_while};

use crate::graph_ast::*;

/// Parses flowchart text into a graph. Never fails: any line that is neither a
/// `graph <DIR>` declaration nor an `-->` edge becomes a standalone node.
pub fn parse_graph(input: &str) -> Graph {
    let mut graph = Graph::default();

    for raw in input.split(is_line_break) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut cursor = line;
        let parsed = graph_line(&mut cursor).unwrap_or(GraphLine::Node(line));
        tracing::trace!(?parsed, "classified line");

        match parsed {
            GraphLine::Direction(token) => {
                graph.direction = Direction::from_token(token);
                if let Direction::Other(other) = &graph.direction {
                    tracing::warn!(direction = %other, "unrecognized direction, laying out top-down");
                }
            }
            GraphLine::Edge { from, label, to } => graph.add_edge(from, to, label),
            GraphLine::Node(id) => graph.add_node(id),
        }
    }

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        direction = ?graph.direction,
        "parsed flowchart"
    );
    graph
}

/// Unicode line boundaries plus the vertical tab, form feed and the
/// file/group/record separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[derive(Debug, PartialEq)]
enum GraphLine<'s> {
    Direction(&'s str),
    Edge {
        from: &'s str,
        label: &'s str,
        to: &'s str,
    },
    Node(&'s str),
}

fn graph_line<'s>(input: &mut &'s str) -> winnow::Result<GraphLine<'s>> {
    alt((
        direction_line.map(GraphLine::Direction),
        edge_line,
        rest.map(GraphLine::Node),
    ))
    .parse_next(input)
}

fn direction_line<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    "graph ".parse_next(input)?;
    take_while(0.., |c: char| c.is_whitespace()).parse_next(input)?;
    take_till(1.., |c: char| c.is_whitespace()).parse_next(input)
}

/// Splits on the first `-->`; the left side may carry a `-- label` part.
fn edge_line<'s>(input: &mut &'s str) -> winnow::Result<GraphLine<'s>> {
    let left = take_until(0.., "-->").parse_next(input)?;
    "-->".parse_next(input)?;
    let to = rest.parse_next(input)?.trim();

    let mut left = left.trim();
    let (from, label) = source_and_label(&mut left)?;

    Ok(GraphLine::Edge {
        from: from.trim(),
        label: label.trim(),
        to,
    })
}

fn source_and_label<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, &'s str)> {
    alt((
        (take_until(0.., "--"), "--", rest).map(|(from, _, label)| (from, label)),
        rest.map(|from| (from, "")),
    ))
    .parse_next(input)
}
