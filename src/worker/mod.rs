//! Load generator
//!
//! The `LoadGenerator` owns the source buffer, the registry of files it has
//! written and the random source, and drives the write/read-back loop:
//!
//! ```text
//! for i in 0..iterations:
//!     size = trunc(uniform(min_file_size, max_file_size))
//!     write(i, size)          -> "<pid>-<i>.txt", `size` lines
//!     read(read_n)            -> read_n - 1 random read-backs
//! remove_all()                -> only when cleanup is enabled
//! ```
//!
//! Everything is sequential and blocking. Any error stops the run; files
//! already written stay on disk.

use crate::config::Config;
use crate::distribution::RandomSource;
use crate::error::LoadError;
use crate::stats::RunStats;
use crate::target::{self, FileRegistry, ManagedFile};
use crate::util::buffer::SourceBuffer;
use crate::util::time::Timestamp;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Sequential filesystem load generator
pub struct LoadGenerator {
    source: SourceBuffer,
    registry: FileRegistry,
    rng: Box<dyn RandomSource>,
    stats: RunStats,
    directory: PathBuf,
    pid: u32,
    fsync: bool,
}

impl LoadGenerator {
    /// Create a generator and sample its source buffer
    ///
    /// Generation of the default 12Mi samples takes a noticeable fraction of
    /// a second; it happens exactly once, here.
    pub fn new(config: &Config, mut rng: Box<dyn RandomSource>) -> Result<Self, LoadError> {
        info!(
            samples = config.sample_count,
            mean = config.mean,
            stddev = config.stddev,
            "generating source buffer"
        );

        let start = Timestamp::now();
        let source = SourceBuffer::generate(config.sample_count, config.mean, config.stddev, &mut rng)?;
        let elapsed = start.elapsed();

        info!(
            samples = source.len(),
            bytes = source.size_bytes(),
            elapsed_ms = elapsed.as_millis() as u64,
            "source buffer ready"
        );

        let mut generator = Self::with_source(source, rng, &config.directory);
        generator.fsync = config.fsync;
        generator.stats.set_source_generation(elapsed);
        Ok(generator)
    }

    /// Create a generator around an existing source buffer
    pub fn with_source(source: SourceBuffer, rng: Box<dyn RandomSource>, directory: &Path) -> Self {
        Self {
            source,
            registry: FileRegistry::new(),
            rng,
            stats: RunStats::new(),
            directory: directory.to_path_buf(),
            pid: std::process::id(),
            fsync: false,
        }
    }

    /// Override the process id used in file names
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub fn source(&self) -> &SourceBuffer {
        &self.source
    }

    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Write `file_size` lines to `"<pid>-<file_index>.txt"`
    ///
    /// Lines are taken from the source buffer in order, wrapping to its
    /// start as often as needed. The file is registered before the write, so
    /// a failed write still leaves an entry behind.
    ///
    /// # Arguments
    ///
    /// * `file_index` - Sequence number that goes into the file name
    /// * `file_size` - Number of lines to write (must be at least 1)
    ///
    /// # Errors
    ///
    /// - `LoadError::InvalidLength` if `file_size` is 0
    /// - `LoadError::Io` if the file cannot be created or written
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fsload::distribution::xoshiro::XoshiroSource;
    /// use fsload::util::buffer::SourceBuffer;
    /// use fsload::LoadGenerator;
    /// use std::path::Path;
    ///
    /// let source = SourceBuffer::from_values(vec![1.0, 2.0]).unwrap();
    /// let mut generator =
    ///     LoadGenerator::with_source(source, Box::new(XoshiroSource::new()), Path::new("/tmp"));
    ///
    /// // 3 lines: 1.0, 2.0, 1.0
    /// generator.write(5, 3).unwrap();
    /// assert_eq!(generator.registry().len(), 1);
    /// ```
    pub fn write(&mut self, file_index: usize, file_size: usize) -> Result<(), LoadError> {
        let path = target::file_path(&self.directory, self.pid, file_index);
        let file = self.registry.push(ManagedFile::new(path).with_fsync(self.fsync));

        let start = Timestamp::now();
        let bytes = file.write(self.source.values(), file_size)?;
        let latency = start.elapsed();

        debug!(
            file = %file.name(),
            lines = file_size,
            bytes,
            latency_us = latency.as_micros() as u64,
            "wrote file"
        );
        self.stats.record_write(file_size as u64, bytes, latency);
        Ok(())
    }

    /// Read back `n - 1` uniformly chosen files
    ///
    /// `read(0)` and `read(1)` do nothing, even before the first write.
    ///
    /// # Arguments
    ///
    /// * `n` - One more than the number of read-backs to perform
    ///
    /// # Returns
    ///
    /// The number of read-backs performed, always `n.saturating_sub(1)` on
    /// success.
    ///
    /// # Errors
    ///
    /// - `LoadError::EmptyRegistry` if a read-back is due and nothing has
    ///   been written
    /// - `LoadError::FileNotFound` if the chosen file is gone
    pub fn read(&mut self, n: usize) -> Result<usize, LoadError> {
        let count = n.saturating_sub(1);
        if count > 0 && self.registry.is_empty() {
            return Err(LoadError::EmptyRegistry);
        }

        for _ in 0..count {
            let index = self.rng.next_index(self.registry.len());
            let file = self
                .registry
                .get(index)
                .ok_or(LoadError::EmptyRegistry)?;

            let start = Timestamp::now();
            let summary = file.read()?;
            let latency = start.elapsed();

            debug!(
                file = %file.name(),
                lines = summary.lines,
                latency_us = latency.as_micros() as u64,
                "read file"
            );
            self.stats.record_read(summary.lines, summary.bytes, latency);
        }

        Ok(count)
    }

    /// Remove every registered file, in registry order
    ///
    /// Files already gone are skipped; registry entries are kept.
    ///
    /// # Returns
    ///
    /// The number of files that were actually on disk.
    pub fn remove_all(&mut self) -> Result<usize, LoadError> {
        let mut removed = 0;
        for file in self.registry.iter() {
            if file.remove()? {
                removed += 1;
            }
        }

        info!(removed, registered = self.registry.len(), "removed files");
        self.stats.record_removed(removed as u64);
        Ok(removed)
    }

    /// Draw the next file size: a uniform real in `[min, max)`, truncated
    pub fn next_file_size(&mut self, min: usize, max: usize) -> usize {
        let size = self.rng.next_uniform(min as f64, max as f64) as usize;
        size.max(min)
    }

    /// Run the write/read-back loop described by `config`
    ///
    /// Each iteration `i` draws a file size, calls `write(i, size)` and then
    /// `read(config.read_n)`. Cleanup runs after the last iteration when
    /// `config.cleanup` is set.
    ///
    /// # Errors
    ///
    /// Stops at the first error. Files written so far stay on disk.
    pub fn run(&mut self, config: &Config) -> Result<(), LoadError> {
        info!(
            iterations = config.iterations,
            directory = %self.directory.display(),
            pid = self.pid,
            "starting run"
        );

        for i in 0..config.iterations {
            let file_size = self.next_file_size(config.min_file_size, config.max_file_size);
            self.write(i, file_size)?;
            self.read(config.read_n)?;

            if config.progress_interval > 0 && (i + 1) % config.progress_interval == 0 {
                info!(
                    iteration = i + 1,
                    of = config.iterations,
                    bytes_written = self.stats.bytes_written(),
                    "progress"
                );
            }
        }

        if config.cleanup {
            self.remove_all()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::scripted::ScriptedSource;
    use crate::distribution::xoshiro::XoshiroSource;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    const PID: u32 = 4242;

    fn generator(dir: &TempDir, values: Vec<f64>, rng: ScriptedSource) -> LoadGenerator {
        let source = SourceBuffer::from_values(values).unwrap();
        LoadGenerator::with_source(source, Box::new(rng), dir.path()).with_pid(PID)
    }

    fn small_config(dir: &TempDir) -> Config {
        Config {
            iterations: 25,
            sample_count: 1000,
            max_file_size: 300,
            directory: dir.path().to_path_buf(),
            seed: Some(3),
            ..Config::default()
        }
    }

    #[test]
    fn test_new_generates_source() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir);

        let gen = LoadGenerator::new(&config, Box::new(XoshiroSource::with_seed(1))).unwrap();
        assert_eq!(gen.source().len(), 1000);
        assert!(gen.registry().is_empty());
    }

    #[test]
    fn test_write_wraps_small_source() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0, 2.0], ScriptedSource::new());

        gen.write(5, 3).unwrap();

        let path = dir.path().join("4242-5.txt");
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "    1.000000\n    2.000000\n    1.000000\n");
        assert_eq!(gen.registry().len(), 1);
        assert_eq!(gen.registry().get(0).unwrap().length(), Some(3));
        assert_eq!(gen.stats().files_written(), 1);
        assert_eq!(gen.stats().lines_written(), 3);
    }

    #[test]
    fn test_write_zero_size_fails() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new());
        assert!(matches!(gen.write(0, 0), Err(LoadError::InvalidLength(0))));
    }

    #[test]
    fn test_read_one_does_nothing() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new());

        // no files yet, still no error
        assert_eq!(gen.read(1).unwrap(), 0);
        assert_eq!(gen.read(0).unwrap(), 0);

        gen.write(0, 10).unwrap();
        assert_eq!(gen.read(1).unwrap(), 0);
        assert_eq!(gen.stats().reads(), 0);
    }

    #[test]
    fn test_read_two_reads_single_file() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new().with_uniforms(&[0.7]));

        gen.write(0, 10).unwrap();
        assert_eq!(gen.read(2).unwrap(), 1);

        assert_eq!(gen.stats().reads(), 1);
        assert_eq!(gen.stats().lines_read(), 10);
    }

    #[test]
    fn test_read_picks_scripted_files() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new().with_uniforms(&[2.5, 0.1]));

        gen.write(0, 1).unwrap();
        gen.write(1, 2).unwrap();
        gen.write(2, 3).unwrap();

        // 2.5 -> index 2 (3 lines), 0.1 -> index 0 (1 line)
        assert_eq!(gen.read(3).unwrap(), 2);
        assert_eq!(gen.stats().lines_read(), 4);
    }

    #[test]
    fn test_read_empty_registry() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new());
        assert!(matches!(gen.read(2), Err(LoadError::EmptyRegistry)));
    }

    #[test]
    fn test_read_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new().with_uniforms(&[0.0]));

        gen.write(0, 5).unwrap();
        fs::remove_file(dir.path().join("4242-0.txt")).unwrap();

        let err = gen.read(2).unwrap_err();
        assert!(err.is_file_not_found());
        assert_eq!(gen.stats().reads(), 0);
    }

    #[test]
    fn test_same_index_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new());

        gen.write(0, 10).unwrap();
        gen.write(0, 2).unwrap();

        let content = fs::read_to_string(dir.path().join("4242-0.txt")).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(gen.registry().len(), 2);
    }

    #[test]
    fn test_remove_all() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new());

        gen.write(0, 1).unwrap();
        gen.write(1, 1).unwrap();
        gen.write(1, 1).unwrap();

        // duplicate index: second remove of the same path is a no-op
        assert_eq!(gen.remove_all().unwrap(), 2);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(gen.registry().len(), 3);

        assert_eq!(gen.remove_all().unwrap(), 0);
        assert_eq!(gen.stats().files_removed(), 2);
    }

    #[test]
    fn test_next_file_size_truncates() {
        let dir = TempDir::new().unwrap();
        let mut gen = generator(&dir, vec![1.0], ScriptedSource::new().with_uniforms(&[1.0, 84_999.99, 7.6]));

        assert_eq!(gen.next_file_size(1, 85_000), 1);
        assert_eq!(gen.next_file_size(1, 85_000), 84_999);
        assert_eq!(gen.next_file_size(1, 85_000), 7);
    }

    #[test]
    fn test_run_scripted() {
        let dir = TempDir::new().unwrap();
        // sizes 3, 4, 5 interleaved with read-back picks 0, 1, 2
        let rng = ScriptedSource::new().with_uniforms(&[3.2, 0.0, 4.9, 1.5, 5.0, 2.9]);
        let mut gen = generator(&dir, vec![0.5, -0.5], rng);
        let config = Config {
            iterations: 3,
            directory: dir.path().to_path_buf(),
            ..Config::default()
        };

        gen.run(&config).unwrap();

        for (i, lines) in [(0, 3), (1, 4), (2, 5)] {
            let content = fs::read_to_string(dir.path().join(format!("4242-{}.txt", i))).unwrap();
            assert_eq!(content.lines().count(), lines);
        }
        assert_eq!(gen.stats().files_written(), 3);
        assert_eq!(gen.stats().reads(), 3);
        assert_eq!(gen.stats().lines_read(), 3 + 4 + 5);
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir);
        let mut gen = LoadGenerator::new(&config, Box::new(XoshiroSource::from_seed_option(config.seed))).unwrap();

        gen.run(&config).unwrap();

        let names: HashSet<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 25);

        let source = gen.source().values().to_vec();
        for file in gen.registry().iter() {
            let length = file.length().unwrap();
            assert!(length >= 1 && length < 300);

            let content = fs::read_to_string(file.path()).unwrap();
            let lines: Vec<&str> = content.lines().collect();
            assert_eq!(lines.len(), length);
            for (i, line) in lines.iter().enumerate() {
                let parsed: f64 = line.trim().parse().unwrap();
                assert!((parsed - source[i % source.len()]).abs() <= 1e-6);
            }
        }

        assert_eq!(gen.stats().files_written(), 25);
        assert_eq!(gen.stats().reads(), 25);
        assert_eq!(gen.stats().files_removed(), 0);
    }

    #[test]
    fn test_run_with_cleanup() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            cleanup: true,
            ..small_config(&dir)
        };
        let mut gen = LoadGenerator::new(&config, Box::new(XoshiroSource::with_seed(5))).unwrap();

        gen.run(&config).unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(gen.stats().files_removed(), 25);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();

        for dir in [&a, &b] {
            let config = Config { iterations: 5, ..small_config(dir) };
            let mut gen = LoadGenerator::new(&config, Box::new(XoshiroSource::with_seed(11)))
                .unwrap()
                .with_pid(PID);
            gen.run(&config).unwrap();
        }

        for i in 0..5 {
            let name = format!("4242-{}.txt", i);
            assert_eq!(
                fs::read(a.path().join(&name)).unwrap(),
                fs::read(b.path().join(&name)).unwrap()
            );
        }
    }
}
