//! [`FaultVfs`], a fault-injecting [`Vfs`] double.
//!
//! Delegates every primitive to [`OsVfs`] but fails the selected ones
//! with an injected `io::Error`. This exercises the wrap-the-failure
//! paths deterministically, without touching permission bits or filling
//! disks.

use std::io;
use std::path::{Path, PathBuf};

use strictfs::{OsVfs, Vfs};

#[derive(Debug, Default, Clone, Copy)]
struct Faults {
    read: bool,
    write: bool,
    rename: bool,
    set_mode: bool,
    create_temp: bool,
}

/// A [`Vfs`] over the real filesystem with selectable failing primitives.
///
/// # Example
///
/// ```rust,no_run
/// use strictfs::{Filesystem, HostFilesystem};
/// use strictfs_test_utils::fault::FaultVfs;
///
/// let fs = HostFilesystem::with_vfs(FaultVfs::new().failing_reads());
/// let err = fs.read_file(std::path::Path::new("/etc/hosts")).unwrap_err();
/// assert!(err.to_string().starts_with("Failed to read file"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct FaultVfs {
    inner: OsVfs,
    faults: Faults,
}

impl FaultVfs {
    /// A double with no faults armed; behaves exactly like [`OsVfs`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `read` call.
    pub fn failing_reads(mut self) -> Self {
        self.faults.read = true;
        self
    }

    /// Fail every `write` call, including writes to temporary files.
    pub fn failing_writes(mut self) -> Self {
        self.faults.write = true;
        self
    }

    /// Fail every `rename` call.
    pub fn failing_renames(mut self) -> Self {
        self.faults.rename = true;
        self
    }

    /// Fail every `set_mode` call.
    pub fn failing_set_mode(mut self) -> Self {
        self.faults.set_mode = true;
        self
    }

    /// Fail every `create_temp_in` call.
    pub fn failing_temp_files(mut self) -> Self {
        self.faults.create_temp = true;
        self
    }

    fn injected() -> io::Error {
        io::Error::other("injected fault")
    }
}

impl Vfs for FaultVfs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if self.faults.read {
            return Err(Self::injected());
        }
        self.inner.read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        if self.faults.write {
            return Err(Self::injected());
        }
        self.inner.write(path, data)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.faults.rename {
            return Err(Self::injected());
        }
        self.inner.rename(from, to)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        if self.faults.set_mode {
            return Err(Self::injected());
        }
        self.inner.set_mode(path, mode)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.inner.is_symlink(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn is_readable(&self, path: &Path) -> bool {
        self.inner.is_readable(path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.inner.is_writable(path)
    }

    fn create_temp_in(&self, dir: &Path) -> io::Result<PathBuf> {
        if self.faults.create_temp {
            return Err(Self::injected());
        }
        self.inner.create_temp_in(dir)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.canonicalize(path)
    }

    fn current_dir(&self) -> PathBuf {
        self.inner.current_dir()
    }
}
