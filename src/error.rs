//! Typed errors for file and generator operations
//!
//! Application plumbing (config, output) uses `anyhow`; the operations that a
//! caller may want to match on return `LoadError` so the binary can tell a
//! missing file apart from any other I/O failure.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Read-back attempted against a file that is not on disk
    #[error("File {} does not exist", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Source buffer is empty")]
    EmptySource,

    #[error("Invalid line count: {0} (must be at least 1)")]
    InvalidLength(usize),

    #[error("No files have been written yet, nothing to read back")]
    EmptyRegistry,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the one failure the driver reports and stops on
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, LoadError::FileNotFound { .. })
    }
}
