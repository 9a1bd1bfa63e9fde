//! Configuration management module.
//!
//! This module loads benchmark settings from an optional YAML file: the
//! iteration protocol, the argument seed, which patterns and strategies to
//! run and the log level. Command line flags are applied on top by the
//! binary.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::harness::RunOptions;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/messageformat-bench";

/// Benchmark settings for one invocation of the harness.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub warmup_iterations: usize,
    pub measurement_iterations: usize,
    pub forks: usize,
    pub iteration_time_ms: u64,
    pub seed: Option<u64>,
    pub patterns: Vec<String>,   // empty means all
    pub strategies: Vec<String>, // empty means all
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_warmup_iterations")]
    pub warmup_iterations: usize,
    #[serde(default = "default_measurement_iterations")]
    pub measurement_iterations: usize,
    #[serde(default = "default_forks")]
    pub forks: usize,
    #[serde(default = "default_iteration_time_ms")]
    pub iteration_time_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub strategies: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_warmup_iterations() -> usize {
    1
}

fn default_measurement_iterations() -> usize {
    2
}

fn default_forks() -> usize {
    2
}

fn default_iteration_time_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Return an instance holding the built-in defaults.
    ///
    pub fn new() -> Config {
        Config {
            warmup_iterations: default_warmup_iterations(),
            measurement_iterations: default_measurement_iterations(),
            forks: default_forks(),
            iteration_time_ms: default_iteration_time_ms(),
            seed: None,
            patterns: vec![],
            strategies: vec![],
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Load settings from the given file, or from the default location when
    /// no path is given. A missing default file leaves the defaults in
    /// place; a missing custom file is an error.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let file_path = match custom_path {
            Some(path) => Path::new(path).to_path_buf(),
            None => {
                let default = Config::default_path()?;
                if !default.exists() {
                    return Ok(());
                }
                default
            }
        };

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            source: e,
        })?;
        self.apply_yaml(&contents)?;
        self.file_path = Some(file_path);
        Ok(())
    }

    /// Replace the settings with those of a YAML document.
    ///
    pub fn apply_yaml(&mut self, contents: &str) -> Result<(), ConfigError> {
        let data: FileSpec = if contents.trim().is_empty() {
            serde_yaml::from_str("{}")
        } else {
            serde_yaml::from_str(contents)
        }
        .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;

        self.warmup_iterations = data.warmup_iterations;
        self.measurement_iterations = data.measurement_iterations;
        self.forks = data.forks;
        self.iteration_time_ms = data.iteration_time_ms;
        self.seed = data.seed;
        self.patterns = data.patterns;
        self.strategies = data.strategies;
        self.log_level = data.log_level;
        Ok(())
    }

    /// Check that the settings describe a runnable protocol.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.measurement_iterations == 0 {
            return Err(ConfigError::Invalid(
                "measurement_iterations must be at least 1".to_string(),
            ));
        }
        if self.iteration_time_ms == 0 {
            return Err(ConfigError::Invalid(
                "iteration_time_ms must be at least 1".to_string(),
            ));
        }
        self.level_filter()?;
        Ok(())
    }

    /// Parse the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)))
    }

    /// Returns the iteration protocol described by these settings.
    ///
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            warmup_iterations: self.warmup_iterations,
            measurement_iterations: self.measurement_iterations,
            forks: self.forks,
            iteration_time: Duration::from_millis(self.iteration_time_ms),
        }
    }

    /// Path of the file the settings were loaded from, if any.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(DEFAULT_DIRECTORY_PATH).join(FILE_NAME)),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
