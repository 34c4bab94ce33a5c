pub mod drawio;
pub mod error;
pub mod graph_ast;
pub mod graph_layout;
pub mod graph_parser;
pub mod link;
pub mod payload;

pub use error::{Error, Result};

use drawio::DiagramStyle;
use graph_layout::LayoutConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub layout: LayoutConfig,
    pub style: DiagramStyle,
}

/// Converts flowchart text into an encoded diagram payload for a viewer URL.
pub fn convert(input: &str) -> Result<String> {
    convert_with_options(input, &Options::default())
}

pub fn convert_with_options(input: &str, options: &Options) -> Result<String> {
    let graph = graph_parser::parse_graph(input);
    let layout = graph_layout::compute_with(&graph, &options.layout);
    drawio::serialize(&graph, &layout, &options.style)
}

/// Same pipeline as [`convert_with_options`], stopping before compression.
pub fn to_xml(input: &str, options: &Options) -> Result<String> {
    let graph = graph_parser::parse_graph(input);
    let layout = graph_layout::compute_with(&graph, &options.layout);
    Ok(drawio::build_document(&graph, &layout, &options.style)?.to_xml())
}
