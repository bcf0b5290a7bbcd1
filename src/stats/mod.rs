//! Run statistics
//!
//! Counters and latency histograms for one load run. The generator records
//! one sample per file write and one per read-back; the output module turns
//! the totals into a results table or JSON summary.

pub mod histogram;

use histogram::LatencyHistogram;
use std::time::Duration;

/// Statistics collected over a run
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    files_written: u64,
    lines_written: u64,
    bytes_written: u64,
    write_latency: LatencyHistogram,

    reads: u64,
    lines_read: u64,
    bytes_read: u64,
    read_latency: LatencyHistogram,

    files_removed: u64,
    source_generation: Duration,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_write(&mut self, lines: u64, bytes: u64, latency: Duration) {
        self.files_written += 1;
        self.lines_written += lines;
        self.bytes_written += bytes;
        self.write_latency.record(latency);
    }

    #[inline]
    pub fn record_read(&mut self, lines: u64, bytes: u64, latency: Duration) {
        self.reads += 1;
        self.lines_read += lines;
        self.bytes_read += bytes;
        self.read_latency.record(latency);
    }

    pub fn record_removed(&mut self, count: u64) {
        self.files_removed += count;
    }

    pub fn set_source_generation(&mut self, elapsed: Duration) {
        self.source_generation = elapsed;
    }

    pub fn files_written(&self) -> u64 {
        self.files_written
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn write_latency(&self) -> &LatencyHistogram {
        &self.write_latency
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn read_latency(&self) -> &LatencyHistogram {
        &self.read_latency
    }

    pub fn files_removed(&self) -> u64 {
        self.files_removed
    }

    /// Time spent sampling the source buffer
    pub fn source_generation(&self) -> Duration {
        self.source_generation
    }

    pub fn total_ops(&self) -> u64 {
        self.files_written + self.reads
    }

    pub fn total_bytes(&self) -> u64 {
        self.bytes_written + self.bytes_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_write_and_read() {
        let mut stats = RunStats::new();
        stats.record_write(10, 130, Duration::from_micros(50));
        stats.record_write(5, 65, Duration::from_micros(20));
        stats.record_read(10, 130, Duration::from_micros(10));

        assert_eq!(stats.files_written(), 2);
        assert_eq!(stats.lines_written(), 15);
        assert_eq!(stats.bytes_written(), 195);
        assert_eq!(stats.write_latency().len(), 2);

        assert_eq!(stats.reads(), 1);
        assert_eq!(stats.lines_read(), 10);
        assert_eq!(stats.bytes_read(), 130);
        assert_eq!(stats.read_latency().len(), 1);

        assert_eq!(stats.total_ops(), 3);
        assert_eq!(stats.total_bytes(), 325);
    }

    #[test]
    fn test_record_removed() {
        let mut stats = RunStats::new();
        stats.record_removed(3);
        stats.record_removed(0);
        assert_eq!(stats.files_removed(), 3);
    }
}
