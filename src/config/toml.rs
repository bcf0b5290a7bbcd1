//! TOML configuration file parsing

use super::Config;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
///
/// Missing keys keep their defaults.
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with a base configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Config {
    if let Some(dir) = &cli.directory {
        config.directory = dir.clone();
    }
    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(samples) = cli.samples {
        config.sample_count = samples;
    }
    if let Some(min) = cli.min_file_size {
        config.min_file_size = min;
    }
    if let Some(max) = cli.max_file_size {
        config.max_file_size = max;
    }
    if let Some(read_n) = cli.read_n {
        config.read_n = read_n;
    }
    if cli.cleanup {
        config.cleanup = true;
    }
    if cli.fsync {
        config.fsync = true;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(interval) = cli.progress_interval {
        config.progress_interval = interval;
    }
    if cli.json_output.is_some() {
        config.json_output = cli.json_output.clone();
    }

    config
}

/// Build the effective configuration: defaults, then config file, then CLI
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    Ok(merge_cli_with_config(cli, base))
}
