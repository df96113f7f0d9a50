//! Directory listing for the tree builder

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// One entry found directly inside a listed directory
#[derive(Debug, Clone)]
pub enum Entry {
    /// A regular file with the metadata captured at listing time
    File {
        path: PathBuf,
        size: u64,
        modified: SystemTime,
    },
    /// A directory to descend into
    Directory { path: PathBuf },
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File { path, .. } | Entry::Directory { path } => path,
        }
    }
}

/// Source of directory listings for the tree builder
pub trait DirectoryLister: Send + Sync {
    /// List the files and subdirectories directly inside `dir`.
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, ScanError>;
}

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Entry names to skip entirely (e.g. ".git"); matched against the file name
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Sort the entries of each directory by file name (default: true)
    #[serde(default = "default_sort_by_name")]
    pub sort_by_name: bool,
}

fn default_sort_by_name() -> bool {
    true
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            sort_by_name: default_sort_by_name(),
        }
    }
}

/// Lists the immediate children of a directory
#[derive(Debug, Clone, Default)]
pub struct Walker {
    config: WalkerConfig,
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// List the files and subdirectories directly inside `dir`.
    ///
    /// The directory itself is never returned. Symbolic links and special
    /// files are skipped. Any listing or metadata failure is returned as an
    /// error; there is no partial listing.
    pub fn list(&self, dir: &Path) -> Result<Vec<Entry>, ScanError> {
        let mut walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);
        if self.config.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| ScanError::ListDirectory {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
                source: walk_error_to_io(e),
            })?;

            if self.should_ignore(entry.file_name()) {
                continue;
            }

            let path = entry.path().to_path_buf();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                entries.push(Entry::Directory { path });
            } else if file_type.is_file() {
                let metadata = entry.metadata().map_err(|e| ScanError::Metadata {
                    path: path.clone(),
                    source: walk_error_to_io(e),
                })?;
                let modified = metadata.modified().map_err(|source| ScanError::Metadata {
                    path: path.clone(),
                    source,
                })?;
                entries.push(Entry::File {
                    path,
                    size: metadata.len(),
                    modified,
                });
            }
            // Symlinks and special files are not part of the tree
        }

        Ok(entries)
    }

    /// Check if an entry name matches one of the ignore patterns
    fn should_ignore(&self, name: &std::ffi::OsStr) -> bool {
        let name = name.to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.as_str() == name)
    }
}

impl DirectoryLister for Walker {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, ScanError> {
        Walker::list(self, dir)
    }
}

fn walk_error_to_io(err: walkdir::Error) -> std::io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message))
}
