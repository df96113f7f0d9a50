//! Integration tests for change plans computed from real directories

use super::test_utils::{pinned_mtime, scanned_path, write_file, write_file_at};
use rsyncx::diff::{Operation, OperationKind};
use rsyncx::{ChangeFinder, ChangePlan};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn find(source: &TempDir, dest: &TempDir) -> ChangePlan {
    ChangeFinder::default()
        .find_changes(source.path(), dest.path())
        .unwrap()
}

fn count(plan: &ChangePlan, kind: OperationKind) -> usize {
    plan.iter().filter(|op| op.kind == kind).count()
}

/// Source {a.txt}, destination {} gives a single add into the root
#[test]
fn test_new_file_is_added_to_root() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(source.path(), "a.txt", "0123456789");

    let plan = find(&source, &dest);

    assert_eq!(
        plan.operations,
        vec![Operation::add(scanned_path(&source, "a.txt"), PathBuf::new())]
    );
}

/// Source {}, destination {b.txt} gives a single delete
#[test]
fn test_stray_file_is_deleted() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(dest.path(), "b.txt", "stale");

    let plan = find(&source, &dest);

    assert_eq!(
        plan.operations,
        vec![Operation::delete(scanned_path(&dest, "b.txt"))]
    );
}

/// Source {sub/c.txt}, destination {c.txt} gives a move into "sub"
#[test]
fn test_relocated_file_is_moved() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(source.path(), "sub/c.txt", "moved content");
    write_file(dest.path(), "c.txt", "moved content");

    let plan = find(&source, &dest);

    assert_eq!(
        plan.operations,
        vec![Operation::move_to(
            scanned_path(&dest, "c.txt"),
            PathBuf::from("sub")
        )]
    );
    assert_eq!(count(&plan, OperationKind::AddFile), 0);
    assert_eq!(count(&plan, OperationKind::DeleteFile), 0);
}

/// An unchanged file yields one in-place move and nothing else
#[test]
fn test_unchanged_file_is_in_place_move() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(source.path(), "docs/readme.md", "hello");
    write_file(dest.path(), "docs/readme.md", "hello");

    let plan = find(&source, &dest);

    assert_eq!(
        plan.operations,
        vec![Operation::move_to(
            scanned_path(&dest, "docs/readme.md"),
            PathBuf::from("docs")
        )]
    );
    assert_eq!(plan.stats.in_place_moves, 1);
}

/// A content edit is never a modify: it is an add plus a delete
#[test]
fn test_edited_file_is_add_and_delete() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(source.path(), "notes.txt", "version 2");
    write_file(dest.path(), "notes.txt", "version 1");

    let plan = find(&source, &dest);

    assert_eq!(
        plan.operations,
        vec![
            Operation::add(scanned_path(&source, "notes.txt"), PathBuf::new()),
            Operation::delete(scanned_path(&dest, "notes.txt")),
        ]
    );
}

/// A renamed file does not match: identity includes the name
#[test]
fn test_renamed_file_is_add_and_delete() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(source.path(), "new-name.txt", "same bytes");
    write_file(dest.path(), "old-name.txt", "same bytes");

    let plan = find(&source, &dest);

    assert_eq!(count(&plan, OperationKind::AddFile), 1);
    assert_eq!(count(&plan, OperationKind::DeleteFile), 1);
    assert_eq!(count(&plan, OperationKind::MoveFile), 0);
}

/// A content-identical copy with a different mtime is not recognized as a move
#[test]
fn test_restamped_copy_is_add_and_delete() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(source.path(), "photo.jpg", "pixels");
    write_file_at(
        dest.path(),
        "photo.jpg",
        "pixels",
        pinned_mtime() + Duration::from_secs(60),
    );

    let plan = find(&source, &dest);

    assert_eq!(count(&plan, OperationKind::AddFile), 1);
    assert_eq!(count(&plan, OperationKind::DeleteFile), 1);
}

/// Mixed scenario: ordering is source pass first, files before subdirectories
#[test]
fn test_mixed_plan_order_and_completeness() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    write_file(source.path(), "keep.txt", "keep");
    write_file(source.path(), "a/moved.txt", "moved");
    write_file(source.path(), "a/b/new.txt", "new");
    write_file(source.path(), "z.txt", "zzz");

    write_file(dest.path(), "keep.txt", "keep");
    write_file(dest.path(), "moved.txt", "moved");
    write_file(dest.path(), "old/gone.txt", "gone");
    write_file(dest.path(), "z.txt", "outdated");

    let plan = find(&source, &dest);

    assert_eq!(
        plan.operations,
        vec![
            Operation::move_to(scanned_path(&dest, "keep.txt"), PathBuf::new()),
            Operation::add(scanned_path(&source, "z.txt"), PathBuf::new()),
            Operation::move_to(scanned_path(&dest, "moved.txt"), PathBuf::from("a")),
            Operation::add(
                scanned_path(&source, "a/b/new.txt"),
                PathBuf::from("a").join("b")
            ),
            Operation::delete(scanned_path(&dest, "z.txt")),
            Operation::delete(scanned_path(&dest, "old/gone.txt")),
        ]
    );
    assert_eq!(plan.stats.adds, 2);
    assert_eq!(plan.stats.moves, 2);
    assert_eq!(plan.stats.in_place_moves, 1);
    assert_eq!(plan.stats.deletes, 2);
}

/// Running the planner twice on the same trees gives the same plan
#[test]
fn test_plan_is_deterministic() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    for i in 0..10 {
        write_file(source.path(), &format!("d{}/f{}.txt", i % 3, i), &format!("{}", i));
        write_file(dest.path(), &format!("f{}.txt", i), &format!("{}", i * 2));
    }

    let first = find(&source, &dest);
    let second = find(&source, &dest);

    assert_eq!(first, second);
}

/// Directory-level operations are never part of a plan
#[test]
fn test_empty_directories_produce_no_operations() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    std::fs::create_dir_all(source.path().join("only/in/source")).unwrap();
    std::fs::create_dir_all(dest.path().join("only_in_dest")).unwrap();

    let plan = find(&source, &dest);

    assert!(plan.is_empty());
}

/// Duplicate files in the destination: only the last one seen is matched
#[test]
fn test_destination_duplicates_last_one_wins() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(source.path(), "dup.txt", "dup");
    write_file(dest.path(), "a/dup.txt", "dup");
    write_file(dest.path(), "b/dup.txt", "dup");

    let plan = find(&source, &dest);

    assert_eq!(
        plan.operations,
        vec![Operation::move_to(
            scanned_path(&dest, "b/dup.txt"),
            PathBuf::new()
        )]
    );
    assert_eq!(plan.stats.destination_collisions, 1);
}
