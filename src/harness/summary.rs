//! Aggregation of fork results into one line per benchmark.

use super::measure::ForkResult;
use std::fmt::Write;

/// Average time per call of one strategy on one pattern.
///
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkSummary {
    pub pattern: String,
    pub strategy: String,
    pub forks: usize,
    /// Measured iterations that contributed to the score
    pub iterations: usize,
    pub operations: u64,
    /// Mean of the per-iteration averages, in nanoseconds per call
    pub average_nanos: Option<f64>,
    pub failure: Option<String>,
}

impl BenchmarkSummary {
    /// Combine the measured iterations of every fork. Warmup iterations
    /// only count towards failures.
    ///
    pub fn from_forks(pattern: &str, strategy: &str, forks: &[ForkResult]) -> BenchmarkSummary {
        let failure = forks
            .iter()
            .flat_map(|fork| fork.warmup.iter().chain(fork.measurement.iter()))
            .find_map(|iteration| iteration.error.clone());

        let scores: Vec<f64> = forks
            .iter()
            .flat_map(|fork| fork.measurement.iter())
            .filter(|iteration| !iteration.failed())
            .filter_map(|iteration| iteration.nanos_per_op())
            .collect();
        let operations = forks
            .iter()
            .flat_map(|fork| fork.measurement.iter())
            .map(|iteration| iteration.operations)
            .sum();
        let average_nanos = if scores.is_empty() || failure.is_some() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        BenchmarkSummary {
            pattern: pattern.to_string(),
            strategy: strategy.to_string(),
            forks: forks.len(),
            iterations: scores.len(),
            operations,
            average_nanos,
            failure,
        }
    }
}

/// Render summaries as a fixed-width table, one row per benchmark.
///
pub fn render_table(summaries: &[BenchmarkSummary]) -> String {
    let mut table = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        table,
        "{:<20} {:<16} {:>5} {:>5} {:>14}  {}",
        "PATTERN", "STRATEGY", "FORKS", "ITERS", "SCORE (ns/op)", "NOTE"
    );
    for summary in summaries {
        let score = summary
            .average_nanos
            .map(|nanos| format!("{:.3}", nanos))
            .unwrap_or_else(|| "-".to_string());
        let note = summary.failure.as_deref().unwrap_or("");
        let _ = writeln!(
            table,
            "{:<20} {:<16} {:>5} {:>5} {:>14}  {}",
            summary.pattern, summary.strategy, summary.forks, summary.iterations, score, note
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::IterationResult;

    fn iteration(operations: u64, elapsed_nanos: u64) -> IterationResult {
        IterationResult {
            operations,
            elapsed_nanos,
            error: None,
        }
    }

    fn fork(index: usize, measurement: Vec<IterationResult>) -> ForkResult {
        ForkResult {
            pattern: "SIMPLE_PATTERN".to_string(),
            strategy: "printf".to_string(),
            fork: index,
            warmup: vec![iteration(1, 1_000_000)],
            measurement,
        }
    }

    #[test]
    fn test_summary_averages_measured_iterations() {
        let forks = vec![
            fork(0, vec![iteration(100, 10_000), iteration(100, 20_000)]),
            fork(1, vec![iteration(50, 15_000), iteration(200, 20_000)]),
        ];
        let summary = BenchmarkSummary::from_forks("SIMPLE_PATTERN", "printf", &forks);
        assert_eq!(summary.forks, 2);
        assert_eq!(summary.iterations, 4);
        assert_eq!(summary.operations, 450);
        // (100 + 200 + 300 + 100) / 4
        assert_eq!(summary.average_nanos, Some(175.0));
        assert!(summary.failure.is_none());
    }

    #[test]
    fn test_summary_reports_failure() {
        let mut failed = fork(0, vec![]);
        failed.warmup = vec![IterationResult {
            operations: 0,
            elapsed_nanos: 10,
            error: Some("No value bound for parameter 'arg0'".to_string()),
        }];
        let summary = BenchmarkSummary::from_forks("SIMPLE_PATTERN", "printf", &[failed]);
        assert_eq!(summary.average_nanos, None);
        assert_eq!(
            summary.failure.as_deref(),
            Some("No value bound for parameter 'arg0'")
        );
    }

    #[test]
    fn test_render_table() {
        let summary = BenchmarkSummary::from_forks(
            "SIMPLE_PATTERN",
            "printf",
            &[fork(0, vec![iteration(4, 10)])],
        );
        let table = render_table(&[summary]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("PATTERN"));
        assert!(lines[1].starts_with("SIMPLE_PATTERN"));
        assert!(lines[1].contains("printf"));
        assert!(lines[1].contains("2.500"));
    }
}
