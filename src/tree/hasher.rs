//! Content hashing for regular files using BLAKE3

use crate::types::Hash;
use blake3::Hasher;
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Why a file could not be fingerprinted
///
/// The two cases are handled differently by the tree builder: a file that
/// cannot be opened is left out of the tree, while a read that fails after the
/// open aborts the whole scan.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("cannot open file: {0}")]
    Open(#[source] io::Error),

    #[error("read failed after open: {0}")]
    Read(#[source] io::Error),
}

/// Computes the content fingerprint of a single file
pub trait ContentHasher: Send + Sync {
    /// Hash the complete byte content of the file at `path`.
    fn hash_file(&self, path: &Path) -> Result<Hash, HashError>;
}

/// Default hasher: streams the file through BLAKE3
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3ContentHasher;

impl ContentHasher for Blake3ContentHasher {
    fn hash_file(&self, path: &Path) -> Result<Hash, HashError> {
        let mut file = File::open(path).map_err(HashError::Open)?;
        let mut hasher = Hasher::new();
        io::copy(&mut file, &mut hasher).map_err(HashError::Read)?;
        Ok(*hasher.finalize().as_bytes())
    }
}

/// Compute content hash for in-memory bytes
///
/// Produces the same digest as [`Blake3ContentHasher`] for a file holding `content`.
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}
