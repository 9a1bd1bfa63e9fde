//! The iteration protocol.
//!
//! A fork runs a number of warmup iterations followed by measured ones.
//! Each iteration invokes the strategy back to back until its time budget
//! is spent and records how many calls completed in how long.

use super::sink::Sink;
use crate::pattern::{Catalog, TestPattern};
use crate::strategy::{FormatError, FormatStrategy};
use log::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Iteration protocol of a benchmark run.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub warmup_iterations: usize,
    pub measurement_iterations: usize,
    /// Number of separate worker processes; zero measures in process
    pub forks: usize,
    pub iteration_time: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            warmup_iterations: 1,
            measurement_iterations: 2,
            forks: 2,
            iteration_time: Duration::from_secs(1),
        }
    }
}

/// Outcome of one timed iteration.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationResult {
    pub operations: u64,
    pub elapsed_nanos: u64,
    /// First formatting error, which ends the iteration
    pub error: Option<String>,
}

impl IterationResult {
    /// Average time per completed call, in nanoseconds.
    ///
    pub fn nanos_per_op(&self) -> Option<f64> {
        if self.operations == 0 {
            None
        } else {
            Some(self.elapsed_nanos as f64 / self.operations as f64)
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// All iterations of one fork for one pattern and strategy.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForkResult {
    pub pattern: String,
    pub strategy: String,
    pub fork: usize,
    pub warmup: Vec<IterationResult>,
    pub measurement: Vec<IterationResult>,
}

/// Call `strategy` once on `pattern` with freshly generated arguments.
///
/// The formatted text, or the error, goes to `sink` exactly once. Errors
/// are returned unchanged.
///
pub fn invoke<S: Sink>(
    strategy: &dyn FormatStrategy,
    pattern: &TestPattern,
    catalog: &Catalog,
    sink: &mut S,
) -> Result<(), FormatError> {
    let args = catalog.arguments(pattern);
    match strategy.format(pattern.syntax(strategy.variant()), args.as_deref()) {
        Ok(formatted) => {
            sink.consume(formatted);
            Ok(())
        }
        Err(error) => {
            sink.consume(&error);
            Err(error)
        }
    }
}

/// Run one iteration lasting at least `budget`.
///
pub fn run_iteration<S: Sink>(
    strategy: &dyn FormatStrategy,
    pattern: &TestPattern,
    catalog: &Catalog,
    sink: &mut S,
    budget: Duration,
) -> IterationResult {
    let mut operations = 0;
    let start = Instant::now();
    let error = loop {
        if let Err(error) = invoke(strategy, pattern, catalog, sink) {
            break Some(error.to_string());
        }
        operations += 1;
        if start.elapsed() >= budget {
            break None;
        }
    };
    let elapsed = start.elapsed();

    IterationResult {
        operations,
        elapsed_nanos: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        error,
    }
}

/// Run the warmup and measured iterations of one fork in this process.
///
pub fn run_fork<S: Sink>(
    options: &RunOptions,
    strategy: &dyn FormatStrategy,
    pattern: &TestPattern,
    catalog: &Catalog,
    sink: &mut S,
    fork: usize,
) -> ForkResult {
    let mut run = |phase: &str, count: usize| -> Vec<IterationResult> {
        let mut results = Vec::with_capacity(count);
        for iteration in 0..count {
            let result = run_iteration(strategy, pattern, catalog, sink, options.iteration_time);
            match (&result.error, result.nanos_per_op()) {
                (Some(error), _) => warn!(
                    "{} {} {} iteration {} failed: {}",
                    pattern.id(),
                    strategy.name(),
                    phase,
                    iteration + 1,
                    error
                ),
                (None, Some(nanos)) => debug!(
                    "{} {} {} iteration {}: {:.3} ns/op",
                    pattern.id(),
                    strategy.name(),
                    phase,
                    iteration + 1,
                    nanos
                ),
                (None, None) => {}
            }
            let failed = result.failed();
            results.push(result);
            if failed {
                break;
            }
        }
        results
    };

    let warmup = run("warmup", options.warmup_iterations);
    let measurement = if warmup.iter().any(IterationResult::failed) {
        Vec::new()
    } else {
        run("measurement", options.measurement_iterations)
    };

    ForkResult {
        pattern: pattern.id().name().to_string(),
        strategy: strategy.name().to_string(),
        fork,
        warmup,
        measurement,
    }
}
