//! Measurement harness.
//!
//! This module drives the strategies under the benchmark protocol:
//! - `Sink` / `BlackHole` and `ParameterProvider`, the two seams the
//!   measured code depends on
//! - `measure`, the warmup and measurement iterations of a single fork
//! - `fork`, worker processes that isolate forks from each other
//! - `summary`, average time per call across forks

mod error;
pub mod fork;
pub mod measure;
mod sink;
pub mod summary;

pub use error::HarnessError;
pub use fork::ForkLauncher;
pub use measure::{invoke, run_fork, run_iteration, ForkResult, IterationResult, RunOptions};
pub use sink::{BlackHole, FixedParameter, ParameterProvider, Sink};
pub use summary::{render_table, BenchmarkSummary};

use crate::pattern::Catalog;
use crate::strategy::Strategy;
use log::*;

/// Runs benchmarks for pattern and strategy pairs, one pattern bound per
/// run.
///
pub struct Runner<'a> {
    options: RunOptions,
    catalog: &'a Catalog,
    launcher: Option<ForkLauncher>,
}

impl<'a> Runner<'a> {
    /// Returns a runner that forks through `launcher` when the options ask
    /// for forks. Without a launcher every fork runs in this process.
    ///
    pub fn new(options: RunOptions, catalog: &'a Catalog, launcher: Option<ForkLauncher>) -> Self {
        Runner {
            options,
            catalog,
            launcher,
        }
    }

    /// Measure `strategy` on the pattern named by `parameters`.
    ///
    pub fn run(
        &self,
        parameters: &dyn ParameterProvider,
        strategy: Strategy,
    ) -> Result<BenchmarkSummary, HarnessError> {
        let pattern = self.catalog.get(parameters.pattern_name())?;
        info!(
            "Benchmarking {} with {} ({} warmup, {} measured, {} forks)...",
            pattern.id(),
            strategy,
            self.options.warmup_iterations,
            self.options.measurement_iterations,
            self.options.forks
        );

        let forks: Vec<ForkResult> = match (&self.launcher, self.options.forks) {
            (Some(launcher), count) if count > 0 => (0..count)
                .map(|fork| {
                    launcher.run(&self.options, pattern.id().name(), strategy.name(), fork)
                })
                .collect::<Result<Vec<_>, _>>()?,
            (_, count) => {
                let instance = strategy.build();
                let mut sink = BlackHole::new();
                (0..count.max(1))
                    .map(|fork| {
                        run_fork(
                            &self.options,
                            instance.as_ref(),
                            pattern,
                            self.catalog,
                            &mut sink,
                            fork,
                        )
                    })
                    .collect()
            }
        };

        let summary = BenchmarkSummary::from_forks(pattern.id().name(), strategy.name(), &forks);
        match (&summary.failure, summary.average_nanos) {
            (Some(failure), _) => warn!("{} {} failed: {}", pattern.id(), strategy, failure),
            (None, Some(nanos)) => info!("{} {}: {:.3} ns/op", pattern.id(), strategy, nanos),
            (None, None) => warn!("{} {} produced no measurements", pattern.id(), strategy),
        }
        Ok(summary)
    }
}
