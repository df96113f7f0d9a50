//! Directory metadata trees
//!
//! A scan produces one [`node::DirectoryEntry`] per root: every regular file
//! carries its name, on-disk path, root-relative directory, BLAKE3 content
//! hash, modification time and size.

pub mod builder;
pub mod hasher;
pub mod node;
pub mod walker;
