//! Multi-step scenarios that chain the guarded operations the way an
//! application would.

use strictfs::{Filesystem, HostFilesystem};
use strictfs_test_utils::tree::TempTree;

fn fs() -> HostFilesystem {
    HostFilesystem::new()
}

#[test]
fn publish_and_archive_a_config_file() {
    let tree = TempTree::new();
    tree.dir("etc");
    let live = tree.root().join("etc").join("app.conf");

    // First publication creates the file.
    assert_eq!(fs().write_file(&live, b"threads = 4\n").unwrap(), 12);
    tree.assert_file_contains("etc/app.conf", "threads = 4");

    // A later publication replaces it atomically.
    fs().write_file(&live, b"threads = 8\n").unwrap();
    assert_eq!(fs().read_file(&live).unwrap(), b"threads = 8\n");

    // Archive the old revision, then write the next one.
    let archived = tree.root().join("etc").join("app.conf.bak");
    fs().rename(&live, &archived).unwrap();
    tree.assert_not_exists("etc/app.conf");
    tree.assert_file_contains("etc/app.conf.bak", "threads = 8");

    fs().write_file(&live, b"threads = 16\n").unwrap();
    tree.assert_file_contains("etc/app.conf", "threads = 16");

    // Exactly the two files, no temp leftovers.
    assert_eq!(tree.entry_count("etc"), 2);
}

#[cfg(unix)]
#[test]
fn lock_down_a_written_secret() {
    let tree = TempTree::new();
    let secret = tree.root().join("token");

    fs().write_file(&secret, b"hunter2").unwrap();
    fs().chmod(&secret, 0o600).unwrap();

    assert_eq!(tree.mode_of("token"), 0o600);
    assert_eq!(fs().read_file(&secret).unwrap(), b"hunter2");
}

#[test]
fn relative_paths_are_anchored_to_an_explicit_base() {
    let tree = TempTree::new();
    tree.dir("workdir");
    let base = tree.root().join("workdir");

    let resolved = fs().resolve_path_in(std::path::Path::new("out.txt"), &base);
    assert_eq!(fs().write_file(&resolved, b"anchored").unwrap(), 8);
    tree.assert_file_contains("workdir/out.txt", "anchored");
}

#[test]
fn failures_leave_prior_state_intact() {
    let tree = TempTree::new();
    let file = tree.file("data.txt", b"stable");

    // Reading a missing sibling fails without touching the survivor.
    let err = fs().read_file(&tree.root().join("missing.txt")).unwrap_err();
    assert!(err.is_not_found());

    // Renaming a missing source fails before any side effect.
    let err = fs()
        .rename(&tree.root().join("ghost"), &file)
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(tree.read("data.txt"), b"stable");
    assert_eq!(tree.entry_count(""), 1);
}
