//! Source buffer
//!
//! The in-memory dataset every written file draws its lines from. It is
//! sampled once per run from a normal distribution and never modified after.
//!
//! # Memory
//!
//! The default of 12Mi samples is 96 MiB of `f64`, allocated up front with
//! `Vec::with_capacity` so generation does not reallocate.

use crate::distribution::RandomSource;
use crate::error::LoadError;

/// Default number of samples in the source buffer
pub const DEFAULT_SAMPLE_COUNT: usize = 12 * 1024 * 1024;

/// Immutable sequence of Gaussian samples
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBuffer {
    values: Vec<f64>,
}

impl SourceBuffer {
    /// Sample `count` values from N(mean, stddev)
    ///
    /// # Errors
    ///
    /// Returns `LoadError::EmptySource` if `count` is 0.
    pub fn generate<R: RandomSource + ?Sized>(
        count: usize,
        mean: f64,
        stddev: f64,
        rng: &mut R,
    ) -> Result<Self, LoadError> {
        if count == 0 {
            return Err(LoadError::EmptySource);
        }

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(rng.next_gaussian(mean, stddev));
        }

        Ok(Self { values })
    }

    /// Wrap existing values
    ///
    /// # Errors
    ///
    /// Returns `LoadError::EmptySource` if `values` is empty.
    pub fn from_values(values: Vec<f64>) -> Result<Self, LoadError> {
        if values.is_empty() {
            return Err(LoadError::EmptySource);
        }
        Ok(Self { values })
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed buffer
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Size of the sample data in bytes
    pub fn size_bytes(&self) -> u64 {
        (self.values.len() * std::mem::size_of::<f64>()) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::scripted::ScriptedSource;
    use crate::distribution::xoshiro::XoshiroSource;

    #[test]
    fn test_generate_count() {
        let mut rng = XoshiroSource::with_seed(1);
        let buffer = SourceBuffer::generate(4096, 0.0, 1.0, &mut rng).unwrap();
        assert_eq!(buffer.len(), 4096);
        assert_eq!(buffer.size_bytes(), 4096 * 8);
    }

    #[test]
    fn test_generate_uses_mean_and_stddev() {
        let mut rng = ScriptedSource::new().with_normals(&[1.0, -1.0, 0.0]);
        let buffer = SourceBuffer::generate(3, 5.0, 2.0, &mut rng).unwrap();
        assert_eq!(buffer.values(), &[7.0, 3.0, 5.0]);
    }

    #[test]
    fn test_generate_zero_count() {
        let mut rng = XoshiroSource::with_seed(1);
        let err = SourceBuffer::generate(0, 0.0, 1.0, &mut rng).unwrap_err();
        assert!(matches!(err, LoadError::EmptySource));
    }

    #[test]
    fn test_from_values() {
        let buffer = SourceBuffer::from_values(vec![1.0, 2.0]).unwrap();
        assert_eq!(buffer.values(), &[1.0, 2.0]);
        assert!(SourceBuffer::from_values(Vec::new()).is_err());
    }

    #[test]
    fn test_generate_seeded_is_reproducible() {
        let a = SourceBuffer::generate(100, 0.0, 1.0, &mut XoshiroSource::with_seed(9)).unwrap();
        let b = SourceBuffer::generate(100, 0.0, 1.0, &mut XoshiroSource::with_seed(9)).unwrap();
        assert_eq!(a, b);
    }
}
