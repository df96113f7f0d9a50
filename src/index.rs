//! Fingerprint index: identity lookup over every file of one tree
//!
//! A file's identity is the value tuple (name, content hash, size,
//! modification time). Two entries are the same file only when all four match.
//! When two files of one tree share a fingerprint the later one in traversal
//! order replaces the earlier one; the number of such replacements is kept so
//! callers can report it.

use crate::tree::node::{DirectoryEntry, FileEntry};
use crate::types::Hash;
use std::collections::HashMap;
use std::time::SystemTime;
use tracing::debug;

/// Identity of a file for move detection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub name: String,
    pub content_hash: Hash,
    pub size: u64,
    pub modified: SystemTime,
}

impl Fingerprint {
    pub fn of(file: &FileEntry) -> Self {
        Self {
            name: file.name.clone(),
            content_hash: file.content_hash,
            size: file.size,
            modified: file.modified,
        }
    }
}

impl From<&FileEntry> for Fingerprint {
    fn from(file: &FileEntry) -> Self {
        Fingerprint::of(file)
    }
}

/// Map from fingerprint to the file that produced it
#[derive(Debug, Default)]
pub struct FingerprintIndex<'a> {
    entries: HashMap<Fingerprint, &'a FileEntry>,
    collisions: usize,
}

impl<'a> FingerprintIndex<'a> {
    /// Index every file in `tree`, including all subdirectories.
    pub fn build(tree: &'a DirectoryEntry) -> Self {
        let mut index = Self::default();
        index.add_directory(tree);
        debug!(
            root = %tree.path.display(),
            entries = index.entries.len(),
            collisions = index.collisions,
            "Built fingerprint index"
        );
        index
    }

    fn add_directory(&mut self, directory: &'a DirectoryEntry) {
        for file in &directory.files {
            if let Some(previous) = self.entries.insert(Fingerprint::of(file), file) {
                self.collisions += 1;
                debug!(
                    kept = %file.full_path.display(),
                    hidden = %previous.full_path.display(),
                    "Fingerprint collision"
                );
            }
        }

        for subdirectory in &directory.subdirectories {
            self.add_directory(subdirectory);
        }
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&'a FileEntry> {
        self.entries.get(fingerprint).copied()
    }

    /// Look up the entry with the same identity as `file`
    pub fn lookup(&self, file: &FileEntry) -> Option<&'a FileEntry> {
        self.get(&Fingerprint::of(file))
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that were replaced by a later file with the same fingerprint
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
