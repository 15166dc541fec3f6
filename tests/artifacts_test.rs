use freemarker::artifacts::{self, TempFiles};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_new_path_is_unique_and_inside_dir() {
    let temp_dir = TempDir::new().unwrap();
    let temp = TempFiles::new(temp_dir.path());

    let mut seen = HashSet::new();
    for _ in 0..64 {
        let path = temp.new_path();
        assert_eq!(path.parent(), Some(temp_dir.path()));
        assert!(seen.insert(path), "Duplicate temp path generated");
    }
}

#[test]
fn test_write_then_read_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let temp = TempFiles::new(temp_dir.path());

    let path = temp.new_path();
    artifacts::write_artifact(&path, "sourceRoot: /tmp\n").unwrap();
    assert_eq!(artifacts::read_artifact(&path).unwrap(), "sourceRoot: /tmp\n");
}

#[test]
fn test_cleanup_ignores_missing_files() {
    let temp_dir = TempDir::new().unwrap();
    let temp = TempFiles::new(temp_dir.path());

    let existing = temp.new_path();
    let missing = temp.new_path();
    artifacts::write_artifact(&existing, "x").unwrap();

    let paths = vec![existing.clone(), missing];
    artifacts::cleanup(&paths);
    assert!(!existing.exists());

    // Running again over already-deleted files must be a no-op
    artifacts::cleanup(&paths);
}

#[test]
fn test_guard_releases_tracked_paths_on_drop() {
    let temp_dir = TempDir::new().unwrap();
    let temp = TempFiles::new(temp_dir.path());

    let kept = temp.new_path();
    artifacts::write_artifact(&kept, "kept").unwrap();

    let tracked = {
        let mut guard = temp.guard();
        let tracked = guard.track(temp.new_path());
        artifacts::write_artifact(&tracked, "tracked").unwrap();
        assert!(tracked.exists());
        tracked
    };

    assert!(!tracked.exists());
    assert!(kept.exists());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}
