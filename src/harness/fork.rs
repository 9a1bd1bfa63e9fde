//! Forked worker processes.
//!
//! Each fork re-executes the harness binary with `--fork-worker`, which
//! runs one fork in process and prints its `ForkResult` as a single JSON
//! line on standard output. A worker reads no configuration file: every
//! setting it uses is passed on its command line.

use super::error::HarnessError;
use super::measure::{ForkResult, RunOptions};
use log::*;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Flag that puts the binary into worker mode.
pub const WORKER_FLAG: &str = "--fork-worker";

/// Launches worker processes of a harness binary.
///
#[derive(Clone, Debug)]
pub struct ForkLauncher {
    binary: PathBuf,
    seed: Option<u64>,
    log_level: Option<String>,
}

impl ForkLauncher {
    pub fn new(binary: impl Into<PathBuf>, seed: Option<u64>) -> Self {
        ForkLauncher {
            binary: binary.into(),
            seed,
            log_level: None,
        }
    }

    /// Have workers log at `level` instead of their default.
    ///
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Launcher for the currently running executable.
    ///
    pub fn current(seed: Option<u64>) -> Result<Self, HarnessError> {
        let binary = std::env::current_exe().map_err(HarnessError::Spawn)?;
        Ok(ForkLauncher::new(binary, seed))
    }

    /// Command line arguments handed to a worker.
    ///
    pub fn worker_args(
        &self,
        options: &RunOptions,
        pattern: &str,
        strategy: &str,
        fork: usize,
    ) -> Vec<String> {
        let mut args = vec![
            WORKER_FLAG.to_string(),
            fork.to_string(),
            "--pattern".to_string(),
            pattern.to_string(),
            "--strategy".to_string(),
            strategy.to_string(),
            "--warmup".to_string(),
            options.warmup_iterations.to_string(),
            "--iterations".to_string(),
            options.measurement_iterations.to_string(),
            "--time-ms".to_string(),
            options.iteration_time.as_millis().to_string(),
        ];
        if let Some(seed) = self.seed {
            args.push("--seed".to_string());
            args.push(seed.to_string());
        }
        if let Some(level) = &self.log_level {
            args.push("--log-level".to_string());
            args.push(level.clone());
        }
        args
    }

    /// Run one fork in a child process and collect its result.
    ///
    pub fn run(
        &self,
        options: &RunOptions,
        pattern: &str,
        strategy: &str,
        fork: usize,
    ) -> Result<ForkResult, HarnessError> {
        debug!(
            "Forking worker {} for {} {} ({})...",
            fork,
            pattern,
            strategy,
            self.binary.display()
        );
        let output = Command::new(&self.binary)
            .args(self.worker_args(options, pattern, strategy, fork))
            .stdin(Stdio::null())
            .output()
            .map_err(HarnessError::Spawn)?;

        if !output.status.success() {
            return Err(HarnessError::WorkerFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_worker_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extract the fork result from a worker's standard output. The result is
/// the last non-empty line.
///
pub fn parse_worker_output(stdout: &str) -> Result<ForkResult, HarnessError> {
    let line = stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| HarnessError::Protocol("worker printed nothing".to_string()))?;
    serde_json::from_str(line).map_err(|e| HarnessError::Protocol(e.to_string()))
}
