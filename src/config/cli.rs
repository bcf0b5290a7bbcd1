//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// fsload - synthetic filesystem load generator
///
/// Writes randomly sized text files of Gaussian samples and reads random
/// ones back. With no options it performs the standard 2000-iteration run in
/// the current directory.
#[derive(Parser, Debug, Default)]
#[command(name = "fsload")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory to create files in
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// TOML configuration file (CLI options take precedence)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Number of write iterations
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Number of samples in the source buffer
    #[arg(long)]
    pub samples: Option<usize>,

    /// Smallest file size in lines (inclusive)
    #[arg(long)]
    pub min_file_size: Option<usize>,

    /// Largest file size in lines (exclusive)
    #[arg(long)]
    pub max_file_size: Option<usize>,

    /// Argument to the per-iteration read call (performs N-1 read-backs)
    #[arg(long, value_name = "N")]
    pub read_n: Option<usize>,

    /// Remove all written files at the end of the run
    #[arg(long)]
    pub cleanup: bool,

    /// fsync each file before closing it
    #[arg(long)]
    pub fsync: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Iterations between progress log lines (0 disables)
    #[arg(long)]
    pub progress_interval: Option<usize>,

    /// Write a JSON run summary to this path
    #[arg(long, value_name = "PATH")]
    pub json_output: Option<PathBuf>,

    /// Validate and print the configuration, then exit
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["fsload"]).unwrap();
        assert!(cli.directory.is_none());
        assert!(cli.iterations.is_none());
        assert!(!cli.cleanup);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "fsload",
            "/mnt/scratch",
            "-n",
            "10",
            "--samples",
            "1024",
            "--min-file-size",
            "5",
            "--max-file-size",
            "50",
            "--read-n",
            "3",
            "--cleanup",
            "--fsync",
            "--seed",
            "42",
            "--json-output",
            "out.json",
            "--debug",
        ])
        .unwrap();

        assert_eq!(cli.directory, Some(PathBuf::from("/mnt/scratch")));
        assert_eq!(cli.iterations, Some(10));
        assert_eq!(cli.samples, Some(1024));
        assert_eq!(cli.min_file_size, Some(5));
        assert_eq!(cli.max_file_size, Some(50));
        assert_eq!(cli.read_n, Some(3));
        assert!(cli.cleanup);
        assert!(cli.fsync);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.json_output, Some(PathBuf::from("out.json")));
        assert!(cli.debug);
    }

    #[test]
    fn test_environment_is_ignored() {
        std::env::set_var("FSLOAD_SEED", "42");
        std::env::set_var("FSLOAD_CONFIG", "/nonexistent/fsload.toml");

        let cli = Cli::try_parse_from(["fsload"]).unwrap();
        let config = crate::config::toml::load_config(&cli).unwrap();

        std::env::remove_var("FSLOAD_SEED");
        std::env::remove_var("FSLOAD_CONFIG");

        assert!(cli.seed.is_none());
        assert!(cli.config.is_none());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_rejects_bad_number() {
        assert!(Cli::try_parse_from(["fsload", "-n", "many"]).is_err());
    }
}
