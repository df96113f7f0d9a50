//! In-memory metadata nodes produced by a tree scan

use crate::types::{hex_hash, rfc3339_time, Hash};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// One regular file seen during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Base name of the file
    pub name: String,
    /// Path on disk at scan time
    pub full_path: PathBuf,
    /// Containing directory relative to the scan root (empty at the root)
    pub relative_dir: PathBuf,
    /// BLAKE3 digest of the full byte content
    #[serde(with = "hex_hash")]
    pub content_hash: Hash,
    /// Last modification time reported by the filesystem
    #[serde(with = "rfc3339_time")]
    pub modified: SystemTime,
    /// Length in bytes
    pub size: u64,
}

impl FileEntry {
    /// Path of this file relative to the scan root
    pub fn relative_path(&self) -> PathBuf {
        self.relative_dir.join(&self.name)
    }
}

/// One directory and everything beneath it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    /// Path on disk at scan time
    pub path: PathBuf,
    /// Path relative to the scan root (empty for the root itself)
    pub relative_path: PathBuf,
    /// Files directly inside this directory, in walk order
    pub files: Vec<FileEntry>,
    /// Child directories, in walk order
    pub subdirectories: Vec<DirectoryEntry>,
}

impl DirectoryEntry {
    /// Create an empty directory node
    pub fn new(name: String, path: PathBuf, relative_path: PathBuf) -> Self {
        Self {
            name,
            path,
            relative_path,
            files: Vec::new(),
            subdirectories: Vec::new(),
        }
    }

    /// Number of files in this directory and all descendants
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .subdirectories
                .iter()
                .map(DirectoryEntry::file_count)
                .sum::<usize>()
    }

    /// Number of descendant directories, not counting this one
    pub fn directory_count(&self) -> usize {
        self.subdirectories.len()
            + self
                .subdirectories
                .iter()
                .map(DirectoryEntry::directory_count)
                .sum::<usize>()
    }

    /// Sum of all file sizes beneath this directory
    pub fn total_size(&self) -> u64 {
        self.iter_files().map(|f| f.size).sum()
    }

    /// Iterate every file depth-first: a directory's own files come before
    /// those of its subdirectories.
    pub fn iter_files(&self) -> FileIter<'_> {
        FileIter {
            stack: vec![self],
            current: (&[] as &[FileEntry]).iter(),
        }
    }
}

/// Depth-first iterator over the files of a [`DirectoryEntry`]
pub struct FileIter<'a> {
    stack: Vec<&'a DirectoryEntry>,
    current: std::slice::Iter<'a, FileEntry>,
}

impl<'a> Iterator for FileIter<'a> {
    type Item = &'a FileEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.current.next() {
                return Some(file);
            }
            let dir = self.stack.pop()?;
            self.current = dir.files.iter();
            // Reverse so the first subdirectory is popped first.
            self.stack.extend(dir.subdirectories.iter().rev());
        }
    }
}
