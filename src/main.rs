//! family-chart CLI entry point.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::Level;

use family_chart::{ChartConfig, ChartError, Dataset, SugiyamaSolver, layout_chart, window_chart};

/// Windowed family-tree graph with layered layout, as JSON.
#[derive(Parser, Debug)]
#[command(
    name = "family-chart",
    version = env!("FAMILY_CHART_VERSION"),
    about = "Windowed family-tree graph with layered layout, as JSON"
)]
struct Cli {
    /// Dataset JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Root union id
    #[arg(short = 'r', long = "root")]
    root: String,

    /// Toggle the focus side of this union before windowing (repeatable)
    #[arg(short = 't', long = "toggle")]
    toggle: Vec<String>,

    /// Chart configuration JSON (sizes, layout options, pedigree rules)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the windowed graph without running the layout
    #[arg(long = "graph-only")]
    graph_only: bool,

    /// Pretty-print the JSON output
    #[arg(long = "pretty")]
    pretty: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, ChartError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

async fn run(cli: &Cli) -> Result<String, ChartError> {
    let dataset = match &cli.input {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::from_reader(io::stdin().lock())?,
    };
    let config = match &cli.config {
        Some(path) => ChartConfig::from_path(path)?,
        None => ChartConfig::default(),
    };

    if cli.graph_only {
        let graph = window_chart(&dataset, &cli.root, &cli.toggle, &config)?;
        return to_json(&graph, cli.pretty);
    }
    let positioned = layout_chart(&dataset, &cli.root, &cli.toggle, &config, &SugiyamaSolver).await?;
    to_json(&positioned, cli.pretty)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rendered = match run(&cli).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            eprintln!("error: cannot write '{}': {}", path.display(), e);
            process::exit(1);
        }
    } else {
        println!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}
