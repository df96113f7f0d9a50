//! Tree builder for constructing directory metadata trees

use crate::error::ScanError;
use crate::tree::hasher::{Blake3ContentHasher, ContentHasher, HashError};
use crate::tree::node::{DirectoryEntry, FileEntry};
use crate::tree::walker::{DirectoryLister, Entry, Walker, WalkerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tracing::{debug, error, info, instrument, trace, warn};

/// Builds a [`DirectoryEntry`] tree for one root directory
pub struct TreeBuilder {
    root: PathBuf,
    lister: Arc<dyn DirectoryLister>,
    hasher: Arc<dyn ContentHasher>,
}

impl TreeBuilder {
    /// Create a new tree builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            lister: Arc::new(Walker::new()),
            hasher: Arc::new(Blake3ContentHasher),
        }
    }

    /// Set walker config (ignore patterns, ordering).
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.lister = Arc::new(Walker::with_config(config));
        self
    }

    /// Replace the source of directory listings.
    pub fn with_lister(mut self, lister: Arc<dyn DirectoryLister>) -> Self {
        self.lister = lister;
        self
    }

    /// Replace the content hasher used for every regular file.
    pub fn with_hasher(mut self, hasher: Arc<dyn ContentHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Walk the root recursively and build the metadata tree.
    ///
    /// Files that cannot be opened are left out. Any directory that cannot be
    /// listed, or any file whose read fails part way, aborts the whole build.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<DirectoryEntry, ScanError> {
        let start = Instant::now();
        info!("Starting tree build");

        let root = dunce::canonicalize(&self.root).map_err(|e| {
            error!("Cannot resolve root: {}", e);
            ScanError::InvalidRoot(format!("{}: {}", self.root.display(), e))
        })?;
        if !root.is_dir() {
            return Err(ScanError::InvalidRoot(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let tree = match self.build_directory(&root, name, PathBuf::new()) {
            Ok(tree) => tree,
            Err(e) => {
                error!("Tree build failed: {}", e);
                return Err(e);
            }
        };

        info!(
            file_count = tree.file_count(),
            directory_count = tree.directory_count(),
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );
        Ok(tree)
    }

    /// Build the node for one directory, recursing into its subdirectories.
    fn build_directory(
        &self,
        dir_path: &Path,
        name: String,
        relative_path: PathBuf,
    ) -> Result<DirectoryEntry, ScanError> {
        debug!(path = %dir_path.display(), "Creating directory metadata");
        let mut directory = DirectoryEntry::new(name, dir_path.to_path_buf(), relative_path);

        for entry in self.lister.list(dir_path)? {
            match entry {
                Entry::Directory { path } => {
                    let child_name = entry_name(&path);
                    let child_relative = directory.relative_path.join(&child_name);
                    let child = self.build_directory(&path, child_name, child_relative)?;
                    directory.subdirectories.push(child);
                }
                Entry::File {
                    path,
                    size,
                    modified,
                } => {
                    if let Some(file) =
                        self.create_file_entry(path, &directory.relative_path, size, modified)?
                    {
                        directory.files.push(file);
                    }
                }
            }
        }

        Ok(directory)
    }

    /// Hash a file and build its entry; `None` when the file cannot be opened.
    fn create_file_entry(
        &self,
        path: PathBuf,
        relative_dir: &Path,
        size: u64,
        modified: SystemTime,
    ) -> Result<Option<FileEntry>, ScanError> {
        let content_hash = match self.hasher.hash_file(&path) {
            Ok(hash) => hash,
            Err(HashError::Open(e)) => {
                warn!(path = %path.display(), "Cannot open file, leaving it out: {}", e);
                return Ok(None);
            }
            Err(HashError::Read(source)) => {
                return Err(ScanError::ReadFile { path, source });
            }
        };
        trace!(path = %path.display(), content_hash = %hex::encode(content_hash), "Hashed file");

        Ok(Some(FileEntry {
            name: entry_name(&path),
            full_path: path,
            relative_dir: relative_dir.to_path_buf(),
            content_hash,
            modified,
            size,
        }))
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
