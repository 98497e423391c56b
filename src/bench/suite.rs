//! Benchmark every engine against a reference on one graph.

use serde::Serialize;

use super::{benchmark, compare, millis, BenchConfig, BenchError, Comparison};
use crate::engine::EngineKind;
use crate::graph::Graph;

/// Timing and validation of one engine.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReport {
    /// Engine name.
    pub engine: &'static str,
    /// Each timed run, in milliseconds.
    pub runs_ms: Vec<f64>,
    /// Lower median of `runs_ms`.
    pub median_ms: f64,
    /// Human-readable `"<engine> p50 = <ms>ms"`.
    pub label: String,
    /// Differences from the reference result.
    pub comparison: Comparison,
}

/// Everything measured by [`run_suite`].
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Nodes in the benchmarked graph.
    pub nodes: usize,
    /// Child references in the benchmarked graph.
    pub edges: usize,
    /// Engine whose result every other engine is compared to.
    pub reference: &'static str,
    /// Timed runs per engine.
    pub runs: usize,
    /// One entry per benchmarked engine, in the requested order.
    pub engines: Vec<EngineReport>,
}

impl SuiteReport {
    /// `true` if every engine reproduced the reference result exactly.
    pub fn all_match(&self) -> bool {
        self.engines.iter().all(|e| e.comparison.is_match())
    }
}

/// Benchmarks `engines` on `graph` and checks each against `reference`.
///
/// Mismatches are logged and recorded in the report; they do not abort the
/// suite. Encoding failures do, since no engine can run on a malformed graph.
pub fn run_suite(
    graph: &Graph,
    reference: EngineKind,
    engines: &[EngineKind],
    config: &BenchConfig,
) -> Result<SuiteReport, BenchError> {
    tracing::info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        reference = reference.name(),
        runs = config.runs,
        "starting suite"
    );

    let mut control = reference.build(graph)?;
    let expected = benchmark(&mut control, config)?.result;
    drop(control);

    let mut reports = Vec::with_capacity(engines.len());
    for &kind in engines {
        let mut engine = kind.build(graph)?;
        let outcome = benchmark(&mut engine, config)?;
        let comparison = compare(&expected, &outcome.result);

        if !comparison.is_match() {
            tracing::warn!(
                engine = outcome.engine,
                mismatches = comparison.mismatches.len(),
                "result differs from {}:\n{comparison}",
                reference.name()
            );
        }

        reports.push(EngineReport {
            engine: outcome.engine,
            runs_ms: outcome.durations.iter().copied().map(millis).collect(),
            median_ms: millis(outcome.median),
            label: outcome.label,
            comparison,
        });
    }

    Ok(SuiteReport {
        nodes: graph.len(),
        edges: graph.edge_count(),
        reference: reference.name(),
        runs: config.runs,
        engines: reports,
    })
}
