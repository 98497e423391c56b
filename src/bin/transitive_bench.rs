//! Benchmark every transitive-size engine on one graph.
//!
//! ```text
//! transitive-bench                          # 1500 nodes, 15000 random edges
//! transitive-bench --nodes 5000 --edges 60000 --runs 5
//! transitive-bench --graph deps.json --engine offset-dfs-u32 --json
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use transitive_size::{generate, run_suite, BenchConfig, EngineKind, Graph};

#[derive(Parser)]
#[command(name = "transitive-bench")]
#[command(about = "Time transitive-size engines and validate them against a reference", long_about = None)]
struct Cli {
    /// Nodes in the generated graph
    #[arg(long, default_value_t = 1_500)]
    nodes: usize,

    /// Child references in the generated graph
    #[arg(long, default_value_t = 15_000)]
    edges: usize,

    /// Seed for the graph generator
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Load a name-keyed JSON graph instead of generating one
    #[arg(long, conflicts_with_all = ["nodes", "edges", "seed"])]
    graph: Option<PathBuf>,

    /// Timed runs per engine
    #[arg(long, default_value_t = transitive_size::bench::DEFAULT_RUNS)]
    runs: usize,

    /// Engine to benchmark (repeatable; default: all)
    #[arg(long = "engine")]
    engines: Vec<EngineKind>,

    /// Engine whose result the others are checked against
    #[arg(long, default_value_t = EngineKind::ArrayVisited)]
    reference: EngineKind,

    /// Print the full report as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log every timed run
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "transitive_size=debug,transitive_bench=debug"
    } else {
        "transitive_size=info,transitive_bench=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_graph(cli: &Cli) -> Result<Graph> {
    match &cli.graph {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse graph JSON in {}", path.display()))
        }
        None => Ok(generate(cli.nodes, cli.edges, cli.seed)),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let graph = load_graph(&cli)?;
    let engines = if cli.engines.is_empty() {
        EngineKind::ALL.to_vec()
    } else {
        cli.engines.clone()
    };
    let config = BenchConfig {
        runs: cli.runs,
        verbose: cli.verbose,
    };

    let report = run_suite(&graph, cli.reference, &engines, &config)
        .context("benchmark suite failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.engines {
            println!("{}", entry.label);
            if !entry.comparison.is_match() {
                print!("{}", entry.comparison);
            }
        }
    }

    Ok(if report.all_match() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
