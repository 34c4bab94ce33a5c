use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mermaid_drawio::drawio::DiagramStyle;
use mermaid_drawio::graph_layout::LayoutConfig;
use mermaid_drawio::{Options, link, payload};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Compressed, base64-encoded diagram
    Payload,
    /// Viewer link with the payload in its fragment
    Url,
    /// Uncompressed diagram markup
    Xml,
}

#[derive(Parser)]
#[command(
    name = "mermaid-drawio",
    about = "Convert simple Mermaid flowcharts into draw.io diagrams"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// What to print
    #[arg(long, short = 'f', value_enum, default_value_t = Format::Payload)]
    format: Format,

    /// Viewer base URL used with `--format url`
    #[arg(long, default_value = link::DEFAULT_VIEWER)]
    viewer: String,

    /// Also write the flowchart source to this path (`.mmd` added if no extension)
    #[arg(long)]
    save_source: Option<PathBuf>,

    /// Treat the input as an encoded payload and print its markup
    #[arg(long, conflicts_with_all = ["format", "save_source"])]
    decode: bool,

    /// Distance between layers along the flow direction
    #[arg(long, default_value_t = 200)]
    layer_gap: usize,

    /// Horizontal distance between siblings in top-down layouts
    #[arg(long, default_value_t = 200)]
    td_gap: usize,

    /// Vertical distance between siblings in left-right layouts
    #[arg(long, default_value_t = 120)]
    lr_gap: usize,

    /// Width of every node box
    #[arg(long, default_value_t = 120)]
    node_width: usize,

    /// Height of every node box
    #[arg(long, default_value_t = 60)]
    node_height: usize,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            layout: LayoutConfig {
                layer_gap: self.layer_gap,
                td_sibling_gap: self.td_gap,
                lr_sibling_gap: self.lr_gap,
            },
            style: DiagramStyle {
                node_width: self.node_width,
                node_height: self.node_height,
                ..DiagramStyle::default()
            },
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = match &cli.file {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    if cli.decode {
        match payload::decode(&input) {
            Ok(markup) => println!("{markup}"),
            Err(e) => {
                eprintln!("ERROR: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(path) = &cli.save_source {
        let path = source_path(path);
        if let Err(e) = std::fs::write(&path, &input) {
            eprintln!("ERROR: failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
        tracing::info!(path = %path.display(), "saved flowchart source");
    }

    let options = cli.options();
    let output = match cli.format {
        Format::Payload => mermaid_drawio::convert_with_options(&input, &options),
        Format::Url => mermaid_drawio::convert_with_options(&input, &options)
            .map(|encoded| link::viewer_url(&cli.viewer, &encoded)),
        Format::Xml => mermaid_drawio::to_xml(&input, &options),
    };

    match output {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
}

fn source_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("mmd")
    }
}
