//! Append-only list of files written during a run

use super::file::ManagedFile;

/// Every file created by a run, in write order
///
/// Entries are never removed, even after `remove_all`; the registry only
/// exists to pick files for read-back and cleanup.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: Vec<ManagedFile>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file and return a mutable handle to it
    pub fn push(&mut self, file: ManagedFile) -> &mut ManagedFile {
        self.files.push(file);
        let last = self.files.len() - 1;
        &mut self.files[last]
    }

    pub fn get(&self, index: usize) -> Option<&ManagedFile> {
        self.files.get(index)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManagedFile> {
        self.files.iter()
    }
}
