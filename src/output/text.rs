//! Human-readable text output

use crate::config::Config;
use crate::stats::histogram::LatencyHistogram;
use crate::stats::RunStats;
use crate::util::time::{
    calculate_rate, format_bytes, format_duration, format_number, format_rate, format_throughput,
};
use std::time::Duration;

/// Print the configuration block shown before a run
pub fn print_configuration(config: &Config) {
    println!("Configuration:");
    println!("{}", config);
}

/// Print run results to the console
pub fn print_results(stats: &RunStats, duration: Duration, config: &Config) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    RUN RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    println!("Elapsed Time: {:.3}s", duration.as_secs_f64());
    println!(
        "Source Buffer: {} samples in {}",
        format_number(config.sample_count as u64),
        format_duration(stats.source_generation())
    );
    println!();

    println!("Operations:");
    println!(
        "  Write: {} files, {} lines ({}) - {} files/s, {}",
        format_number(stats.files_written()),
        format_number(stats.lines_written()),
        format_bytes(stats.bytes_written()),
        format_rate(calculate_rate(stats.files_written(), duration)),
        format_throughput(calculate_rate(stats.bytes_written(), duration))
    );
    println!(
        "  Read:  {} files, {} lines ({}) - {} files/s, {}",
        format_number(stats.reads()),
        format_number(stats.lines_read()),
        format_bytes(stats.bytes_read()),
        format_rate(calculate_rate(stats.reads(), duration)),
        format_throughput(calculate_rate(stats.bytes_read(), duration))
    );
    if config.cleanup {
        println!("  Removed: {} files", format_number(stats.files_removed()));
    }
    println!();

    println!("Latency (per file):");
    print_latency_line("Write", stats.write_latency());
    print_latency_line("Read", stats.read_latency());
    println!();

    println!("═══════════════════════════════════════════════════════════");
}

fn print_latency_line(label: &str, hist: &LatencyHistogram) {
    match latency_line(hist) {
        Some(line) => println!("  {:<6}{}", format!("{}:", label), line),
        None => println!("  {:<6}-", format!("{}:", label)),
    }
}

/// `min / mean / p50 / p99 / max` for a non-empty histogram
pub fn latency_line(hist: &LatencyHistogram) -> Option<String> {
    Some(format!(
        "min {}  mean {}  p50 {}  p99 {}  max {}",
        format_duration(hist.min()?),
        format_duration(hist.mean()?),
        format_duration(hist.percentile(50.0)?),
        format_duration(hist.percentile(99.0)?),
        format_duration(hist.max()?)
    ))
}
