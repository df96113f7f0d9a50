//! Change finder facade
//!
//! Entry point for callers that want a change plan: build the two trees, index
//! them, and diff them.

use crate::diff::{self, ChangePlan};
use crate::error::ScanError;
use crate::index::FingerprintIndex;
use crate::tree::builder::TreeBuilder;
use crate::tree::hasher::{Blake3ContentHasher, ContentHasher};
use crate::tree::node::DirectoryEntry;
use crate::tree::walker::WalkerConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Builds trees, indices and change plans with one shared configuration
pub struct ChangeFinder {
    walker_config: WalkerConfig,
    hasher: Arc<dyn ContentHasher>,
}

impl Default for ChangeFinder {
    fn default() -> Self {
        Self::new(WalkerConfig::default())
    }
}

impl ChangeFinder {
    pub fn new(walker_config: WalkerConfig) -> Self {
        Self {
            walker_config,
            hasher: Arc::new(Blake3ContentHasher),
        }
    }

    /// Use a different content hasher for both trees.
    pub fn with_hasher(mut self, hasher: Arc<dyn ContentHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Build the metadata tree for one root directory.
    pub fn build_tree(&self, root: &Path) -> Result<DirectoryEntry, ScanError> {
        TreeBuilder::new(root.to_path_buf())
            .with_walker_config(self.walker_config.clone())
            .with_hasher(Arc::clone(&self.hasher))
            .build()
    }

    /// Index every file of `tree` by fingerprint.
    pub fn build_index<'a>(&self, tree: &'a DirectoryEntry) -> FingerprintIndex<'a> {
        FingerprintIndex::build(tree)
    }

    /// Diff two scanned trees using their indices.
    pub fn compute_change_plan(
        &self,
        source_tree: &DirectoryEntry,
        dest_tree: &DirectoryEntry,
        source_index: &FingerprintIndex<'_>,
        dest_index: &FingerprintIndex<'_>,
    ) -> ChangePlan {
        diff::compute_change_plan(source_tree, dest_tree, source_index, dest_index)
    }

    /// Scan both roots and compute the plan that makes `destination` mirror `source`.
    #[instrument(skip_all, fields(source = %source.display(), destination = %destination.display()))]
    pub fn find_changes(&self, source: &Path, destination: &Path) -> Result<ChangePlan, ScanError> {
        info!("Creating directory metadata for source");
        let source_tree = self.build_tree(source)?;
        info!("Creating directory metadata for destination");
        let dest_tree = self.build_tree(destination)?;

        info!("Finding required operations");
        let source_index = self.build_index(&source_tree);
        let dest_index = self.build_index(&dest_tree);
        let plan = self.compute_change_plan(&source_tree, &dest_tree, &source_index, &dest_index);

        info!(operation_count = plan.len(), "Change plan ready");
        Ok(plan)
    }
}
