//! The primitive I/O seam.
//!
//! [`Vfs`] captures everything the access layer consumes from its host
//! platform; [`OsVfs`] is the one real implementation. Tests substitute a
//! fault-injecting double behind the same trait instead of shadowing
//! global functions.

use std::io;
use std::path::{Path, PathBuf};

/// The raw filesystem primitives the access layer is built on.
///
/// Implementations report failure through `std::io::Error`; assigning
/// meaning to those failures is the access layer's job, not theirs.
pub trait Vfs: Send + Sync {
    /// Read the entire contents of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write `data` to `path`, truncating any existing content.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Rename `from` to `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Apply `mode`, an octal permission bitmask, to `path`.
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Plain existence probe; follows symlinks, so a dangling link counts
    /// as absent.
    fn exists(&self, path: &Path) -> bool;

    /// True if `path` is itself a symlink, dangling or not.
    fn is_symlink(&self, path: &Path) -> bool;

    /// True if `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// True if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read-permission probe.
    fn is_readable(&self, path: &Path) -> bool;

    /// Write-permission probe.
    fn is_writable(&self, path: &Path) -> bool;

    /// Create a uniquely-named empty file inside `dir` and return its
    /// path. The file must live in `dir` itself so a later rename onto a
    /// sibling stays on one filesystem.
    fn create_temp_in(&self, dir: &Path) -> io::Result<PathBuf>;

    /// OS-level canonicalization, resolving `.`, `..` and symlinks.
    /// Fails when the path does not exist.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// The process current working directory.
    fn current_dir(&self) -> PathBuf;
}

/// [`Vfs`] backed by the host platform's standard I/O layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsVfs;

impl Vfs for OsVfs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        std::fs::write(path, data)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        // Only the owner-write bit has a Windows counterpart.
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_readonly(mode & 0o200 == 0);
        std::fs::set_permissions(path, perms)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.symlink_metadata()
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[cfg(unix)]
    fn is_readable(&self, path: &Path) -> bool {
        nix::unistd::access(path, nix::unistd::AccessFlags::R_OK).is_ok()
    }

    #[cfg(not(unix))]
    fn is_readable(&self, path: &Path) -> bool {
        path.exists()
    }

    #[cfg(unix)]
    fn is_writable(&self, path: &Path) -> bool {
        nix::unistd::access(path, nix::unistd::AccessFlags::W_OK).is_ok()
    }

    #[cfg(not(unix))]
    fn is_writable(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .map(|meta| !meta.permissions().readonly())
            .unwrap_or(false)
    }

    fn create_temp_in(&self, dir: &Path) -> io::Result<PathBuf> {
        let temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.into_temp_path().keep().map_err(|e| e.error)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        dunce::canonicalize(path)
    }

    fn current_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}
