//! JSON run summary
//!
//! One document per run: the effective configuration, operation totals,
//! throughput and per-file latency percentiles.

use crate::config::Config;
use crate::stats::histogram::LatencyHistogram;
use crate::stats::RunStats;
use crate::util::time::{calculate_rate, format_duration, format_throughput};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: d.as_micros() as u64,
            human: format_duration(d),
        }
    }
}

/// Throughput with bytes/sec and human-readable format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonThroughput {
    pub bytes_per_sec: u64,
    pub human: String,
}

impl JsonThroughput {
    pub fn new(bytes_per_sec: f64) -> Self {
        Self {
            bytes_per_sec: bytes_per_sec as u64,
            human: format_throughput(bytes_per_sec),
        }
    }
}

/// Latency percentiles, absent when no samples were recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonLatency {
    pub samples: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p99: Option<JsonDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<JsonDuration>,
}

impl JsonLatency {
    pub fn from_histogram(hist: &LatencyHistogram) -> Self {
        Self {
            samples: hist.len(),
            min: hist.min().map(JsonDuration::from_duration),
            mean: hist.mean().map(JsonDuration::from_duration),
            p50: hist.percentile(50.0).map(JsonDuration::from_duration),
            p99: hist.percentile(99.0).map(JsonDuration::from_duration),
            max: hist.max().map(JsonDuration::from_duration),
        }
    }
}

/// Totals for one direction (write or read)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOperations {
    pub files: u64,
    pub lines: u64,
    pub bytes: u64,
    pub files_per_sec: f64,
    pub throughput: JsonThroughput,
    pub latency: JsonLatency,
}

/// Complete run summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRunSummary {
    pub tool: String,
    pub version: String,
    pub timestamp: String,
    pub pid: u32,
    pub config: Config,
    pub elapsed: JsonDuration,
    pub source_generation: JsonDuration,
    pub write: JsonOperations,
    pub read: JsonOperations,
    pub files_removed: u64,
}

impl JsonRunSummary {
    pub fn new(stats: &RunStats, duration: Duration, config: &Config, pid: u32) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            pid,
            config: config.clone(),
            elapsed: JsonDuration::from_duration(duration),
            source_generation: JsonDuration::from_duration(stats.source_generation()),
            write: JsonOperations {
                files: stats.files_written(),
                lines: stats.lines_written(),
                bytes: stats.bytes_written(),
                files_per_sec: calculate_rate(stats.files_written(), duration),
                throughput: JsonThroughput::new(calculate_rate(stats.bytes_written(), duration)),
                latency: JsonLatency::from_histogram(stats.write_latency()),
            },
            read: JsonOperations {
                files: stats.reads(),
                lines: stats.lines_read(),
                bytes: stats.bytes_read(),
                files_per_sec: calculate_rate(stats.reads(), duration),
                throughput: JsonThroughput::new(calculate_rate(stats.bytes_read(), duration)),
                latency: JsonLatency::from_histogram(stats.read_latency()),
            },
            files_removed: stats.files_removed(),
        }
    }
}

/// Write the summary as pretty-printed JSON
pub fn write_json_output(output_path: &Path, summary: &JsonRunSummary) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;

    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("Failed to write JSON output: {}", output_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_stats() -> RunStats {
        let mut stats = RunStats::new();
        stats.record_write(3, 39, Duration::from_micros(40));
        stats.record_read(3, 39, Duration::from_micros(10));
        stats
    }

    #[test]
    fn test_summary_totals() {
        let summary = JsonRunSummary::new(&sample_stats(), Duration::from_secs(1), &Config::default(), 77);

        assert_eq!(summary.tool, "fsload");
        assert_eq!(summary.pid, 77);
        assert_eq!(summary.write.files, 1);
        assert_eq!(summary.write.bytes, 39);
        assert_eq!(summary.write.throughput.bytes_per_sec, 39);
        assert_eq!(summary.read.lines, 3);
        assert_eq!(summary.read.latency.samples, 1);
        assert!(summary.read.latency.p99.is_some());
    }

    #[test]
    fn test_empty_latency_fields_skipped() {
        let summary = JsonRunSummary::new(&RunStats::new(), Duration::ZERO, &Config::default(), 1);
        let value = serde_json::to_value(&summary).unwrap();

        let latency = &value["read"]["latency"];
        assert_eq!(latency["samples"], 0);
        assert!(latency.get("p50").is_none());
    }

    #[test]
    fn test_write_json_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let summary = JsonRunSummary::new(&sample_stats(), Duration::from_millis(250), &Config::default(), 9);

        write_json_output(&path, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["config"]["iterations"], 2000);
        assert_eq!(value["write"]["lines"], 3);
        assert_eq!(value["files_removed"], 0);
    }
}
