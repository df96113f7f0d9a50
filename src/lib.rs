//! rsyncx: change planning between two directory trees
//!
//! Scans a source and a destination directory into metadata trees, indexes
//! every file by its identity fingerprint (name, content hash, size,
//! modification time), and computes the ordered add/move/delete operations
//! that would make the destination mirror the source. Nothing on disk is
//! changed.

pub mod api;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod index;
pub mod logging;
pub mod tree;
pub mod types;

pub use api::ChangeFinder;
pub use diff::{compute_change_plan, ChangePlan, Operation, OperationKind, PlanStats};
pub use error::{ApiError, ScanError};
pub use index::{Fingerprint, FingerprintIndex};
pub use tree::node::{DirectoryEntry, FileEntry};
