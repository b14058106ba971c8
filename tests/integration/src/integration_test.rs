//! End-to-end pipeline through the `Filesystem` trait object.

use std::path::Path;

use assert_fs::prelude::*;
use predicates::prelude::*;
use strictfs::{Filesystem, HostFilesystem};
use strictfs_test_utils::fault::FaultVfs;

#[test]
fn guarded_pipeline_end_to_end() {
    let temp = assert_fs::TempDir::new().unwrap();
    let host = HostFilesystem::new();
    let fs: &dyn Filesystem = &host;

    let target = temp.child("report.txt");
    let written = fs.write_file(target.path(), b"v1 contents").unwrap();
    assert_eq!(written, 11);
    target.assert(predicate::path::is_file());
    assert_eq!(fs.read_file(target.path()).unwrap(), b"v1 contents");

    fs.write_file(target.path(), b"v2").unwrap();
    target.assert("v2");

    let renamed = temp.child("archive.txt");
    fs.rename(target.path(), renamed.path()).unwrap();
    target.assert(predicate::path::missing());
    renamed.assert("v2");

    let err = fs.read_file(target.path()).unwrap_err();
    assert!(err.is_not_found());

    temp.close().unwrap();
}

// A consumer written against the trait, oblivious to the backend.
fn store(fs: &dyn Filesystem, path: &Path, payload: &[u8]) -> strictfs::Result<usize> {
    fs.write_file(path, payload)
}

#[test]
fn consumers_accept_any_backend() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("stored.txt");

    let host = HostFilesystem::new();
    assert_eq!(store(&host, target.path(), b"real backend").unwrap(), 12);
    target.assert("real backend");

    let faulty = HostFilesystem::with_vfs(FaultVfs::new().failing_temp_files());
    let err = store(&faulty, target.path(), b"never lands").unwrap_err();
    assert!(err.to_string().starts_with("Could not create temporary file"));
    // The failed write must not have disturbed the previous content.
    target.assert("real backend");

    temp.close().unwrap();
}

#[test]
fn assertions_do_not_modify_the_tree() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("present.txt");
    file.write_str("untouched").unwrap();
    let host = HostFilesystem::new();
    let fs: &dyn Filesystem = &host;

    fs.assert_exists(file.path()).unwrap();
    fs.assert_is_file(file.path()).unwrap();
    fs.assert_is_directory(temp.path()).unwrap();
    fs.assert_readable(file.path()).unwrap();
    fs.assert_writable(file.path()).unwrap();
    fs.assert_writable_file(file.path()).unwrap();

    file.assert("untouched");
    temp.close().unwrap();
}
