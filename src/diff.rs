//! Change plan computation
//!
//! The plan is built in two passes over already-scanned trees. The source pass
//! emits an add for every source file without a match in the destination and a
//! move for every source file that has one. The destination pass emits a delete
//! for every destination file without a match in the source. Matching is done
//! purely through [`FingerprintIndex`] lookups, so the computation cannot fail.

use crate::index::FingerprintIndex;
use crate::tree::node::DirectoryEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Kind of planned file operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    AddFile,
    DeleteFile,
    MoveFile,
    /// Reserved; never emitted by the planner
    CreateDirectory,
    /// Reserved; never emitted by the planner
    DeleteDirectory,
}

impl OperationKind {
    /// Short upper-case label used in text output
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::AddFile => "ADD",
            OperationKind::DeleteFile => "DELETE",
            OperationKind::MoveFile => "MOVE",
            OperationKind::CreateDirectory => "MKDIR",
            OperationKind::DeleteDirectory => "RMDIR",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One planned action
///
/// For adds `source` is the file in the source tree; for moves and deletes it
/// is the file in the destination tree. `destination` is the root-relative
/// directory the file should end up in and is `None` for deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
}

impl Operation {
    pub fn add(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            kind: OperationKind::AddFile,
            source,
            destination: Some(destination),
        }
    }

    pub fn move_to(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            kind: OperationKind::MoveFile,
            source,
            destination: Some(destination),
        }
    }

    pub fn delete(source: PathBuf) -> Self {
        Self {
            kind: OperationKind::DeleteFile,
            source,
            destination: None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.destination {
            Some(destination) => write!(
                f,
                "{} {} -> {}",
                self.kind,
                self.source.display(),
                display_relative(destination)
            ),
            None => write!(f, "{} {}", self.kind, self.source.display()),
        }
    }
}

/// Render a root-relative directory, showing the root itself as "."
pub fn display_relative(path: &std::path::Path) -> String {
    if path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path.display().to_string()
    }
}

/// Counters gathered while computing a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub adds: usize,
    pub moves: usize,
    /// Moves whose matched file already sits in the target directory
    pub in_place_moves: usize,
    pub deletes: usize,
    /// Source files hidden by a later file with the same fingerprint
    pub source_collisions: usize,
    /// Destination files hidden by a later file with the same fingerprint
    pub destination_collisions: usize,
}

/// Ordered operations plus summary counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePlan {
    pub operations: Vec<Operation>,
    pub stats: PlanStats,
}

impl ChangePlan {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }
}

impl<'a> IntoIterator for &'a ChangePlan {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

/// Compute the operations that turn `dest_tree` into a mirror of `source_tree`.
///
/// Source-pass operations come first, then deletions. Within each pass a
/// directory's own files are handled before its subdirectories.
pub fn compute_change_plan(
    source_tree: &DirectoryEntry,
    dest_tree: &DirectoryEntry,
    source_index: &FingerprintIndex<'_>,
    dest_index: &FingerprintIndex<'_>,
) -> ChangePlan {
    let mut plan = ChangePlan {
        operations: Vec::new(),
        stats: PlanStats {
            source_collisions: source_index.collisions(),
            destination_collisions: dest_index.collisions(),
            ..PlanStats::default()
        },
    };

    find_add_move_operations(source_tree, dest_index, &mut plan);
    find_delete_operations(dest_tree, source_index, &mut plan);

    debug!(
        adds = plan.stats.adds,
        moves = plan.stats.moves,
        in_place_moves = plan.stats.in_place_moves,
        deletes = plan.stats.deletes,
        "Computed change plan"
    );
    plan
}

fn find_add_move_operations(
    source_dir: &DirectoryEntry,
    dest_index: &FingerprintIndex<'_>,
    plan: &mut ChangePlan,
) {
    for source_file in &source_dir.files {
        match dest_index.lookup(source_file) {
            None => {
                trace!(path = %source_file.full_path.display(), "No match in destination");
                plan.stats.adds += 1;
                plan.operations.push(Operation::add(
                    source_file.full_path.clone(),
                    source_file.relative_dir.clone(),
                ));
            }
            Some(dest_file) => {
                trace!(
                    from = %dest_file.full_path.display(),
                    to = %source_file.relative_dir.display(),
                    "Matched in destination"
                );
                plan.stats.moves += 1;
                if dest_file.relative_dir == source_file.relative_dir {
                    plan.stats.in_place_moves += 1;
                }
                plan.operations.push(Operation::move_to(
                    dest_file.full_path.clone(),
                    source_file.relative_dir.clone(),
                ));
            }
        }
    }

    for subdirectory in &source_dir.subdirectories {
        find_add_move_operations(subdirectory, dest_index, plan);
    }
}

fn find_delete_operations(
    dest_dir: &DirectoryEntry,
    source_index: &FingerprintIndex<'_>,
    plan: &mut ChangePlan,
) {
    for dest_file in &dest_dir.files {
        if source_index.lookup(dest_file).is_none() {
            plan.stats.deletes += 1;
            plan.operations
                .push(Operation::delete(dest_file.full_path.clone()));
        }
    }

    for subdirectory in &dest_dir.subdirectories {
        find_delete_operations(subdirectory, source_index, plan);
    }
}
