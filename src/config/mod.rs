//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! Every field has a default, so a run with no flags and no config file
//! writes 2000 files of 1..85000 lines into the current directory.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::util::buffer::DEFAULT_SAMPLE_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of write iterations
    pub iterations: usize,
    /// Number of samples in the source buffer
    pub sample_count: usize,
    /// Mean of the source distribution
    pub mean: f64,
    /// Standard deviation of the source distribution
    pub stddev: f64,
    /// Smallest file size in lines (inclusive)
    pub min_file_size: usize,
    /// Largest file size in lines (exclusive)
    pub max_file_size: usize,
    /// Argument to the per-iteration `read(n)` call; performs `n - 1` read-backs
    pub read_n: usize,
    /// Directory files are created in
    pub directory: PathBuf,
    /// Remove every written file after the last iteration
    pub cleanup: bool,
    /// `fsync` each file before closing it
    pub fsync: bool,
    /// Seed for reproducible runs (entropy when unset)
    pub seed: Option<u64>,
    /// Iterations between progress log lines (0 disables)
    pub progress_interval: usize,
    /// Write a JSON summary to this path
    pub json_output: Option<PathBuf>,
}

pub const DEFAULT_ITERATIONS: usize = 2000;
pub const DEFAULT_MIN_FILE_SIZE: usize = 1;
pub const DEFAULT_MAX_FILE_SIZE: usize = 85_000;
pub const DEFAULT_READ_N: usize = 2;

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            sample_count: DEFAULT_SAMPLE_COUNT,
            mean: 0.0,
            stddev: 1.0,
            min_file_size: DEFAULT_MIN_FILE_SIZE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            read_n: DEFAULT_READ_N,
            directory: PathBuf::from("."),
            cleanup: false,
            fsync: false,
            seed: None,
            progress_interval: 100,
            json_output: None,
        }
    }
}

impl Config {
    /// Read-backs performed per iteration
    pub fn reads_per_iteration(&self) -> usize {
        self.read_n.saturating_sub(1)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Directory:      {}", self.directory.display())?;
        writeln!(f, "  Iterations:     {}", self.iterations)?;
        writeln!(
            f,
            "  File size:      [{}, {}) lines",
            self.min_file_size, self.max_file_size
        )?;
        writeln!(
            f,
            "  Read-backs:     {} per iteration (read_n = {})",
            self.reads_per_iteration(),
            self.read_n
        )?;
        writeln!(
            f,
            "  Source buffer:  {} samples ~ N({}, {})",
            self.sample_count, self.mean, self.stddev
        )?;
        writeln!(f, "  Fsync:          {}", if self.fsync { "yes" } else { "no" })?;
        writeln!(f, "  Cleanup:        {}", if self.cleanup { "yes" } else { "no" })?;
        match self.seed {
            Some(seed) => write!(f, "  Seed:           {}", seed),
            None => write!(f, "  Seed:           (entropy)"),
        }
    }
}
