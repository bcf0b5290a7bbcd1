//! Latency histogram using HdrHistogram
//!
//! Tracks per-operation latencies (one sample per file write or read-back)
//! from 1 nanosecond to 1 hour with 3 significant digits.
//!
//! # Example
//!
//! ```
//! use fsload::stats::histogram::LatencyHistogram;
//! use std::time::Duration;
//!
//! let mut hist = LatencyHistogram::new();
//! hist.record(Duration::from_micros(100));
//! hist.record(Duration::from_micros(200));
//!
//! assert_eq!(hist.len(), 2);
//! assert!(hist.percentile(50.0).is_some());
//! ```

use hdrhistogram::Histogram;
use std::time::Duration;

const MAX_TRACKED_NANOS: u64 = 3_600_000_000_000;

/// Latency histogram wrapper
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    histogram: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a histogram tracking 1ns to 1 hour, 3 significant digits
    pub fn new() -> Self {
        let histogram = Histogram::new_with_bounds(1, MAX_TRACKED_NANOS, 3)
            .expect("Failed to create histogram with valid bounds");

        Self { histogram }
    }

    /// Record a latency sample, clamped to the tracked range
    #[inline]
    pub fn record(&mut self, latency: Duration) {
        let nanos = latency.as_nanos().min(MAX_TRACKED_NANOS as u128) as u64;
        let _ = self.histogram.record(nanos.max(1));
    }

    /// Latency at `percentile` (0.0 - 100.0), `None` if empty
    pub fn percentile(&self, percentile: f64) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.value_at_percentile(percentile)))
    }

    pub fn min(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.min()))
    }

    pub fn max(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.max()))
    }

    pub fn mean(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.mean() as u64))
    }

    /// Number of samples recorded
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}
