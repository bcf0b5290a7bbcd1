//! Files under load
//!
//! - `file`: a single managed text file (write, read-back, delete)
//! - `registry`: the append-only list of files a run has created
//!
//! File names combine the process id with the iteration index, so concurrent
//! runs in the same directory never collide while two writes with the same
//! index inside one run target the same file.

pub mod file;
pub mod registry;

use std::path::{Path, PathBuf};

pub use file::{ManagedFile, ReadSummary};
pub use registry::FileRegistry;

/// File name for a given process and iteration: `"<pid>-<index>.txt"`
pub fn file_name(pid: u32, file_index: usize) -> String {
    format!("{}-{}.txt", pid, file_index)
}

/// Full path of a generated file inside `dir`
pub fn file_path(dir: &Path, pid: u32, file_index: usize) -> PathBuf {
    dir.join(file_name(pid, file_index))
}
