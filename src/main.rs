//! fsload CLI entry point

use anyhow::{Context, Result};
use fsload::config::{cli::Cli, toml::load_config, validator::validate_config, Config};
use fsload::distribution::xoshiro::XoshiroSource;
use fsload::output::{json, text};
use fsload::{LoadError, LoadGenerator};
use std::process;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    fsload::telemetry::init_tracing(cli.debug);

    println!("fsload v{}", env!("CARGO_PKG_VERSION"));
    println!("Synthetic filesystem load generator");
    println!();

    let config = load_config(&cli)?;
    validate_config(&config).context("Configuration validation failed")?;

    text::print_configuration(&config);

    if cli.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    println!("Starting run...");
    println!();

    match run(&config) {
        Err(e) if e.is_file_not_found() => {
            eprintln!("{}", e);
            process::exit(1);
        }
        result => result.context("Load run failed"),
    }
}

fn run(config: &Config) -> Result<(), LoadError> {
    let start = Instant::now();

    let rng = Box::new(XoshiroSource::from_seed_option(config.seed));
    let mut generator = LoadGenerator::new(config, rng)?;
    generator.run(config)?;

    let elapsed = start.elapsed();
    text::print_results(generator.stats(), elapsed, config);

    if let Some(path) = &config.json_output {
        let summary = json::JsonRunSummary::new(generator.stats(), elapsed, config, generator.pid());
        if let Err(e) = json::write_json_output(path, &summary) {
            eprintln!("Warning: Failed to write JSON output: {:#}", e);
        }
    }

    Ok(())
}
