//! Random sources
//!
//! Everything random in a run (the source buffer samples, the file size drawn
//! each iteration, the file picked for read-back) goes through the
//! `RandomSource` trait. Production runs use `XoshiroSource`; tests plug in a
//! scripted source so the exact sequence of sizes and picks is known.
//!
//! # Example
//!
//! ```
//! use fsload::distribution::{RandomSource, xoshiro::XoshiroSource};
//!
//! let mut rng = XoshiroSource::with_seed(7);
//! let size = rng.next_uniform(1.0, 85_000.0) as usize;
//! assert!(size >= 1 && size < 85_000);
//!
//! let index = rng.next_index(10);
//! assert!(index < 10);
//! ```

/// Source of random values for a load run
///
/// Implementations must be `Send` so a generator can be moved to another
/// thread, even though a run itself is single-threaded.
pub trait RandomSource: Send {
    /// Next sample from the standard normal distribution N(0, 1)
    fn next_standard_normal(&mut self) -> f64;

    /// Next uniform real in `[low, high)`
    ///
    /// Returns `low` when the range is empty.
    fn next_uniform(&mut self, low: f64, high: f64) -> f64;

    /// Next sample from N(mean, stddev)
    fn next_gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        mean + stddev * self.next_standard_normal()
    }

    /// Uniform index in `[0, len)`, drawn as a truncated uniform real
    ///
    /// Returns 0 when `len` is 0; callers check for an empty collection first.
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let index = self.next_uniform(0.0, len as f64) as usize;
        // float rounding can land exactly on the upper bound
        index.min(len - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_standard_normal(&mut self) -> f64 {
        (**self).next_standard_normal()
    }

    fn next_uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).next_uniform(low, high)
    }
}

pub mod xoshiro;
