use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use delivery_planner::delivery::Delivery;
use delivery_planner::matrix_io::read_matrix_file;
use delivery_planner::observer::TracingObserver;
use delivery_planner::solver::{Planner, SearchOptions};

/// Pick the delivery sequence with the highest total bonus.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Adjacency matrix file; first line lists the location labels
    #[arg(short, long)]
    matrix: PathBuf,

    /// JSON array of {"target", "start_time", "bonus"} records
    #[arg(short = 'D', long)]
    deliveries: PathBuf,

    /// Location the courier starts from
    #[arg(short, long, default_value = "A")]
    origin: String,

    /// Stop after expanding this many search states
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Stop after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Also append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(short, long)]
    debug: bool,
}

/// Log writer for stderr, plus `log_file` when given.
fn log_writer(log_file: Option<&Path>) -> io::Result<BoxMakeWriter> {
    let Some(path) = log_file else {
        return Ok(BoxMakeWriter::new(io::stderr));
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BoxMakeWriter::new(io::stderr.and(Mutex::new(file))))
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let writer = log_writer(cli.log_file.as_deref())
        .with_context(|| format!("opening log file {:?}", cli.log_file))?;
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(cli.log_file.is_none())
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let mut observer = TracingObserver;
    let graph = read_matrix_file(&cli.matrix, &mut observer)?;

    let raw = fs::read_to_string(&cli.deliveries)
        .with_context(|| format!("reading deliveries from {}", cli.deliveries.display()))?;
    let deliveries: Vec<Delivery<String>> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing deliveries from {}", cli.deliveries.display()))?;

    let options = SearchOptions {
        max_expansions: cli.max_expansions,
        time_limit: cli.time_limit_ms.map(Duration::from_millis),
    };

    let planner = Planner::new(&graph, deliveries, cli.origin).with_options(options);
    let outcome = planner.plan(&mut observer);
    info!(
        expanded = outcome.stats.expanded,
        termination = ?outcome.stats.termination,
        "search complete"
    );

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
