//! Integration tests for tree building

use super::test_utils::{pinned_mtime, scanned_path, write_file, write_file_at};
use rsyncx::tree::builder::TreeBuilder;
use rsyncx::tree::hasher::{compute_content_hash, Blake3ContentHasher, ContentHasher, HashError};
use rsyncx::tree::walker::{DirectoryLister, Entry, Walker, WalkerConfig};
use rsyncx::types::Hash;
use rsyncx::{DirectoryEntry, ScanError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Test that every file carries the metadata captured during the walk
#[test]
fn test_file_entries_carry_full_metadata() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "docs/guide/intro.md", "# Intro");

    let tree = TreeBuilder::new(temp_dir.path().to_path_buf()).build().unwrap();

    let docs = &tree.subdirectories[0];
    let guide = &docs.subdirectories[0];
    let file = &guide.files[0];
    assert_eq!(file.name, "intro.md");
    assert_eq!(file.full_path, scanned_path(&temp_dir, "docs/guide/intro.md"));
    assert_eq!(file.relative_dir, PathBuf::from("docs").join("guide"));
    assert_eq!(file.content_hash, compute_content_hash(b"# Intro"));
    assert_eq!(file.size, 7);
    assert_eq!(file.modified, pinned_mtime());
}

/// Test that the same filesystem produces the same tree
#[test]
fn test_same_filesystem_same_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "file1.txt", "content1");
    write_file(root, "file2.txt", "content2");
    write_file(root, "dir1/file3.txt", "content3");
    fs::create_dir(root.join("empty")).unwrap();

    let builder = TreeBuilder::new(root.to_path_buf());
    let tree1 = builder.build().unwrap();
    let tree2 = builder.build().unwrap();

    assert_eq!(tree1, tree2);
    assert_eq!(tree1.file_count(), 3);
    assert_eq!(tree1.directory_count(), 2);
}

/// Test that file content changes are visible in the hash
#[test]
fn test_content_change_changes_hash() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "test.txt", "content1");

    let builder = TreeBuilder::new(root.to_path_buf());
    let before = builder.build().unwrap();
    write_file(root, "test.txt", "content2");
    let after = builder.build().unwrap();

    assert_ne!(before.files[0].content_hash, after.files[0].content_hash);
    assert_eq!(before.files[0].modified, after.files[0].modified);
}

/// Test that a root given through a relative path component is resolved
#[test]
fn test_root_with_dot_components_is_resolved() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "sub/a.txt", "a");
    let indirect = temp_dir.path().join("sub").join("..");

    let tree = TreeBuilder::new(indirect).build().unwrap();

    assert_eq!(tree.path, dunce::canonicalize(temp_dir.path()).unwrap());
    assert_eq!(tree.relative_path, PathBuf::new());
}

/// Test that ignore patterns drop whole subtrees
#[test]
fn test_ignore_patterns_drop_subtrees() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "src/main.rs", "fn main() {}");
    write_file(root, "target/debug/app", "binary");
    write_file(root, "src/target/keep.rs", "nested name also ignored");

    let tree = TreeBuilder::new(root.to_path_buf())
        .with_walker_config(WalkerConfig {
            ignore_patterns: vec!["target".to_string()],
            ..WalkerConfig::default()
        })
        .build()
        .unwrap();

    let paths: Vec<_> = tree.iter_files().map(|f| f.relative_path()).collect();
    assert_eq!(paths, vec![PathBuf::from("src").join("main.rs")]);
}

/// Fails the listing of every directory with the given name.
struct DeniedDirectory(&'static str);

impl DirectoryLister for DeniedDirectory {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, ScanError> {
        if dir.file_name().map_or(false, |n| n == self.0) {
            return Err(ScanError::ListDirectory {
                path: dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            });
        }
        Walker::new().list(dir)
    }
}

/// Refuses to open files with the given name.
struct DeniedFile(&'static str);

impl ContentHasher for DeniedFile {
    fn hash_file(&self, path: &Path) -> Result<Hash, HashError> {
        if path.file_name().map_or(false, |n| n == self.0) {
            return Err(HashError::Open(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )));
        }
        Blake3ContentHasher.hash_file(path)
    }
}

/// Test that an unlistable directory deep in the tree aborts the whole build
#[test]
fn test_unlistable_directory_aborts_build() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "docs/a.txt", "a");
    write_file(temp_dir.path(), "docs/locked/inner.txt", "x");
    write_file(temp_dir.path(), "zz/after.txt", "after");

    let result = TreeBuilder::new(temp_dir.path().to_path_buf())
        .with_lister(Arc::new(DeniedDirectory("locked")))
        .build();

    match result {
        Err(ScanError::ListDirectory { path, .. }) => {
            assert_eq!(path, scanned_path(&temp_dir, "docs/locked"));
        }
        other => panic!("expected ListDirectory error, got {:?}", other),
    }
}

/// Test that an unreadable file is dropped while its sibling survives
#[test]
fn test_unreadable_file_is_isolated() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "secret.txt", "hidden");
    write_file(temp_dir.path(), "public.txt", "visible");

    let tree = TreeBuilder::new(temp_dir.path().to_path_buf())
        .with_hasher(Arc::new(DeniedFile("secret.txt")))
        .build()
        .unwrap();

    let names: Vec<_> = tree.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["public.txt"]);
}

/// Test that a pre-1970 modification time survives a JSON round trip
#[test]
fn test_pre_epoch_mtime_serializes() {
    let temp_dir = TempDir::new().unwrap();
    let before_epoch = SystemTime::UNIX_EPOCH - Duration::from_secs(86_400);
    write_file_at(temp_dir.path(), "old.txt", "from the sixties", before_epoch);

    let tree = TreeBuilder::new(temp_dir.path().to_path_buf()).build().unwrap();
    assert_eq!(tree.files[0].modified, before_epoch);

    let json = serde_json::to_string(&tree).unwrap();
    assert!(json.contains("1969-12-31T00:00:00Z"));
    let restored: DirectoryEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, tree);
}
