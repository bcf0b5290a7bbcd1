//! Configuration validation

use super::Config;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_workload(config)?;
    validate_source(config)?;
    validate_directory(config)?;
    Ok(())
}

/// Validate iteration count and file size range
pub fn validate_workload(config: &Config) -> Result<()> {
    if config.iterations == 0 {
        anyhow::bail!("iterations must be at least 1");
    }

    if config.min_file_size == 0 {
        anyhow::bail!("min_file_size must be at least 1 line");
    }

    if config.max_file_size <= config.min_file_size {
        anyhow::bail!(
            "max_file_size ({}) must be greater than min_file_size ({})",
            config.max_file_size,
            config.min_file_size
        );
    }

    Ok(())
}

/// Validate source buffer parameters
pub fn validate_source(config: &Config) -> Result<()> {
    if config.sample_count == 0 {
        anyhow::bail!("sample_count must be at least 1");
    }

    if !config.mean.is_finite() {
        anyhow::bail!("mean must be finite, got {}", config.mean);
    }

    if !config.stddev.is_finite() || config.stddev <= 0.0 {
        anyhow::bail!("stddev must be positive and finite, got {}", config.stddev);
    }

    Ok(())
}

/// Validate the target directory exists
pub fn validate_directory(config: &Config) -> Result<()> {
    let dir = &config.directory;
    if !dir.exists() {
        anyhow::bail!("directory does not exist: {}", dir.display());
    }
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    Ok(())
}
