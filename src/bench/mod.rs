//! Median-of-N timing harness and cross-engine validation.
//!
//! [`benchmark`] runs an engine's prepare/run cycle a fixed number of times,
//! timing `run` only, and reports the lower median. [`compare`] diffs two
//! result maps; [`run_suite`] does both for a set of engines against a
//! reference engine.
//!
//! Durations are wall-clock and vary between runs. Assert on results, never
//! on timings.

mod compare;
mod suite;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::encode::EncodeError;
use crate::engine::{SizeMap, TransitiveSizes};

pub use compare::{assert_same, compare, Comparison, Mismatch, MismatchError};
pub use suite::{run_suite, EngineReport, SuiteReport};

/// Timed repetitions per engine when not configured otherwise.
pub const DEFAULT_RUNS: usize = 3;

/// Harness settings, passed explicitly to every benchmark call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Timed repetitions per engine. Must be non-zero.
    pub runs: usize,
    /// Emit one event per timed run in addition to the per-engine summary.
    pub verbose: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            verbose: false,
        }
    }
}

impl BenchConfig {
    /// Config with `runs` repetitions.
    pub fn with_runs(runs: usize) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }
}

/// Errors raised by the harness.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// `runs` was zero, so there is nothing to take a median of.
    #[error("benchmark needs at least one run")]
    NoRuns,
    /// The graph could not be encoded for an engine.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Outcome of one [`benchmark`] call.
#[derive(Debug, Clone)]
pub struct BenchOutcome {
    /// Engine name.
    pub engine: &'static str,
    /// Duration of each timed `run`, in execution order.
    pub durations: Vec<Duration>,
    /// Lower median of `durations`.
    pub median: Duration,
    /// `"<engine> p50 = <ms>ms"`.
    pub label: String,
    /// Result of the last run.
    pub result: SizeMap,
}

/// Lower median: the element at `(len - 1) / 2` after sorting.
///
/// Returns `None` for an empty slice. Even-length inputs pick the lower of the
/// two middle elements instead of averaging them.
pub fn median<T: Ord + Copy>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    Some(sorted[(sorted.len() - 1) / 2])
}

/// Milliseconds as a float, for labels and reports.
#[inline]
pub fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

/// Times `config.runs` executions of `engine.run()`.
///
/// `prepare` precedes every run and is not timed. No warm-up runs are added;
/// callers that want one should discard an extra call themselves.
///
/// # Errors
/// [`BenchError::NoRuns`] if `config.runs == 0`.
pub fn benchmark<E>(engine: &mut E, config: &BenchConfig) -> Result<BenchOutcome, BenchError>
where
    E: TransitiveSizes + ?Sized,
{
    if config.runs == 0 {
        return Err(BenchError::NoRuns);
    }

    let name = engine.name();
    let mut durations = Vec::with_capacity(config.runs);
    for run in 0..config.runs {
        engine.prepare();
        let start = Instant::now();
        engine.run();
        let elapsed = start.elapsed();
        if config.verbose {
            tracing::debug!(engine = name, run, elapsed_ms = millis(elapsed), "timed run");
        }
        durations.push(elapsed);
    }

    let p50 = median(&durations).ok_or(BenchError::NoRuns)?;
    let label = format!("{name} p50 = {:.3}ms", millis(p50));
    tracing::info!(engine = name, runs = config.runs, "{label}");

    Ok(BenchOutcome {
        engine: name,
        durations,
        median: p50,
        label,
        result: engine.finalize(),
    })
}
