//! Managed text file
//!
//! A `ManagedFile` pairs an on-disk path with the number of lines last
//! written to it. Every write replaces the file's content in full; reads
//! stream the file to EOF and throw the data away.
//!
//! # Line format
//!
//! One value per line, fixed-point with 6 fractional digits, right-justified
//! in a 12-character field (`%12.6f`):
//!
//! ```text
//!     1.000000
//!    -0.532817
//! ```
//!
//! # Example
//!
//! ```no_run
//! use fsload::target::file::ManagedFile;
//!
//! let mut file = ManagedFile::new("/tmp/4242-0.txt");
//! let bytes = file.write(&[1.0, 2.0], 3).unwrap();
//! assert_eq!(bytes, 39);
//!
//! let summary = file.read().unwrap();
//! assert_eq!(summary.lines, 3);
//!
//! file.remove().unwrap();
//! ```

use crate::error::LoadError;
use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Field width of a formatted value
pub const LINE_WIDTH: usize = 12;

/// Digits after the decimal point
pub const LINE_PRECISION: usize = 6;

const IO_BUFFER_SIZE: usize = 64 * 1024;

/// Outcome of a read-back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    pub lines: u64,
    pub bytes: u64,
}

/// One file created by the generator
#[derive(Debug, Clone)]
pub struct ManagedFile {
    path: PathBuf,
    length: Option<usize>,
    fsync: bool,
}

impl ManagedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            length: None,
            fsync: false,
        }
    }

    /// Flush file data to stable storage before each write returns
    pub fn with_fsync(mut self, fsync: bool) -> Self {
        self.fsync = fsync;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without the directory
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Lines written by the most recent `write`, `None` before the first one
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    /// Write `length` lines taken from `data`, wrapping to the start of
    /// `data` after its last element
    ///
    /// Creates the file or truncates an existing one. The file handle is
    /// dropped (closed) on every return path.
    ///
    /// # Arguments
    ///
    /// * `data` - Values to cycle through (must be non-empty)
    /// * `length` - Number of lines to write (must be at least 1)
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// - `LoadError::InvalidLength` if `length` is 0
    /// - `LoadError::EmptySource` if `data` is empty
    /// - `LoadError::Io` if the file cannot be created, written or synced
    pub fn write(&mut self, data: &[f64], length: usize) -> Result<u64, LoadError> {
        if length == 0 {
            return Err(LoadError::InvalidLength(length));
        }
        if data.is_empty() {
            return Err(LoadError::EmptySource);
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| LoadError::io(&self.path, e))?;

        let mut writer = BufWriter::with_capacity(IO_BUFFER_SIZE, file);
        let mut line = String::with_capacity(LINE_WIDTH + 8);
        let mut bytes = 0u64;
        let mut index = 0usize;

        for _ in 0..length {
            line.clear();
            format_line(&mut line, data[index]);
            writer
                .write_all(line.as_bytes())
                .map_err(|e| LoadError::io(&self.path, e))?;
            bytes += line.len() as u64;

            index += 1;
            if index == data.len() {
                index = 0;
            }
        }

        let file = writer
            .into_inner()
            .map_err(|e| LoadError::io(&self.path, e.into_error()))?;
        if self.fsync {
            file.sync_all().map_err(|e| LoadError::io(&self.path, e))?;
        }

        self.length = Some(length);
        Ok(bytes)
    }

    /// Stream the whole file, discarding its content
    ///
    /// # Errors
    ///
    /// - `LoadError::FileNotFound` if the file is not on disk
    /// - `LoadError::Io` for any other open or read failure
    pub fn read(&self) -> Result<ReadSummary, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::FileNotFound {
                path: self.path.clone(),
            });
        }

        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::FileNotFound {
                path: self.path.clone(),
            },
            _ => LoadError::io(&self.path, e),
        })?;

        let mut reader = BufReader::with_capacity(IO_BUFFER_SIZE, file);
        let mut line = String::with_capacity(LINE_WIDTH + 8);
        let mut summary = ReadSummary::default();

        loop {
            line.clear();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| LoadError::io(&self.path, e))?;
            if n == 0 {
                break;
            }
            summary.lines += 1;
            summary.bytes += n as u64;
        }

        Ok(summary)
    }

    /// Remove the file if it exists
    ///
    /// Returns `true` if a file was removed, `false` if there was nothing to
    /// remove.
    pub fn delete(&self) -> Result<bool, LoadError> {
        if !self.path.exists() {
            return Ok(false);
        }
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            // lost a race with another remover; the end state is the same
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(LoadError::io(&self.path, e)),
        }
    }

    /// Alias of [`ManagedFile::delete`]
    pub fn remove(&self) -> Result<bool, LoadError> {
        self.delete()
    }
}

/// Append one `%12.6f` line (with trailing newline) to `out`
#[inline]
pub fn format_line(out: &mut String, value: f64) {
    // writing into a String cannot fail
    let _ = writeln!(out, "{:>width$.prec$}", value, width = LINE_WIDTH, prec = LINE_PRECISION);
}
