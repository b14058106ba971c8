//! Guarded filesystem operations.
//!
//! Every operation follows the same shape: resolve the path, assert the
//! preconditions, delegate to a [`Vfs`] primitive, and wrap whatever
//! failure remains into a typed [`Error`] naming the resolved path.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::{is_absolute_like, join_relative, parent_dir};
use crate::vfs::{OsVfs, Vfs};

/// The filesystem capability surface.
///
/// There is exactly one concrete implementation, [`HostFilesystem`].
/// Consumers take `&dyn Filesystem` (or a generic bound) so test doubles
/// and alternate backends can be injected instead of calling global
/// functions.
pub trait Filesystem: Send + Sync {
    /// Canonicalize `path` relative to the current working directory.
    fn resolve_path(&self, path: &Path) -> PathBuf;

    /// Canonicalize `path` relative to `relative_to`.
    ///
    /// An existing target comes back in OS-canonical form, with `.`,
    /// `..` and symlinks resolved. A target that does not exist yet comes
    /// back as the syntactic join, trailing separators intact.
    fn resolve_path_in(&self, path: &Path, relative_to: &Path) -> PathBuf;

    /// True if `path` points to anything at all, including a dangling
    /// symlink the plain existence probe misses.
    fn path_exists(&self, path: &Path) -> bool;

    /// Fail with [`Error::NotFound`] unless `path` exists.
    fn assert_exists(&self, path: &Path) -> Result<()>;

    /// Fail unless `path` is a regular file. Missing paths and
    /// directories fail this check alike; the type check subsumes the
    /// existence check.
    fn assert_is_file(&self, path: &Path) -> Result<()>;

    /// Fail unless `path` is a directory.
    fn assert_is_directory(&self, path: &Path) -> Result<()>;

    /// Fail unless `path` passes the OS read-permission probe.
    fn assert_readable(&self, path: &Path) -> Result<()>;

    /// Fail unless `path` passes the OS write-permission probe.
    fn assert_writable(&self, path: &Path) -> Result<()>;

    /// Fail unless a file at `path` could be written: an existing target
    /// must itself be writable, a not-yet-existing one needs an existing,
    /// writable parent directory.
    fn assert_writable_file(&self, path: &Path) -> Result<()>;

    /// Read the full contents of the file at `path`. Empty files yield an
    /// empty vector.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Atomically replace the contents of `path` with `data`, returning
    /// the number of bytes written.
    ///
    /// The payload goes to a uniquely-named temporary file in the
    /// target's own directory, which is then renamed onto the target, so
    /// a concurrent reader observes either the old or the new content in
    /// full, never a partial write.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<usize>;

    /// Rename `source` to `destination`. No precondition is checked on
    /// the destination; the OS rename call is the source of truth for
    /// whether the operation is legal.
    fn rename(&self, source: &Path, destination: &Path) -> Result<()>;

    /// Apply the octal permission bitmask `mode` to `path`.
    fn chmod(&self, path: &Path, mode: u32) -> Result<()>;
}

/// [`Filesystem`] backed by host platform primitives.
///
/// Generic over [`Vfs`] so the primitive layer can be swapped for a
/// fault-injecting double in tests; production code uses the [`OsVfs`]
/// default. Holds no mutable state, so one instance can be shared across
/// any number of threads.
#[derive(Debug, Default, Clone)]
pub struct HostFilesystem<V: Vfs = OsVfs> {
    vfs: V,
}

impl HostFilesystem {
    /// A filesystem over the real OS primitives.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: Vfs> HostFilesystem<V> {
    /// A filesystem over caller-supplied primitives.
    pub fn with_vfs(vfs: V) -> Self {
        Self { vfs }
    }

    fn resolve_with(&self, path: &Path, relative_to: Option<&Path>) -> PathBuf {
        let joined = if is_absolute_like(path) {
            path.to_path_buf()
        } else {
            let base = relative_to
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.vfs.current_dir());
            join_relative(&base, path)
        };

        match self.vfs.canonicalize(&joined) {
            Ok(canonical) => canonical,
            Err(_) => joined,
        }
    }

    fn discard_temp(&self, temp: &Path) {
        if let Err(e) = self.vfs.remove_file(temp) {
            tracing::warn!(
                path = %temp.display(),
                error = %e,
                "Could not remove orphaned temporary file"
            );
        }
    }
}

impl<V: Vfs> Filesystem for HostFilesystem<V> {
    fn resolve_path(&self, path: &Path) -> PathBuf {
        self.resolve_with(path, None)
    }

    fn resolve_path_in(&self, path: &Path, relative_to: &Path) -> PathBuf {
        self.resolve_with(path, Some(relative_to))
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.vfs.exists(path) || self.vfs.is_symlink(path)
    }

    fn assert_exists(&self, path: &Path) -> Result<()> {
        if !self.path_exists(path) {
            return Err(Error::not_found(path));
        }
        Ok(())
    }

    fn assert_is_file(&self, path: &Path) -> Result<()> {
        if !self.vfs.is_file(path) {
            return Err(Error::io(
                format!("Requested path '{}' is not a file.", path.display()),
                path,
            ));
        }
        Ok(())
    }

    fn assert_is_directory(&self, path: &Path) -> Result<()> {
        if !self.vfs.is_dir(path) {
            return Err(Error::io(
                format!("Request path '{}' is not a directory.", path.display()),
                path,
            ));
        }
        Ok(())
    }

    fn assert_readable(&self, path: &Path) -> Result<()> {
        if !self.vfs.is_readable(path) {
            return Err(Error::io(
                format!("Path '{}' is not readable.", path.display()),
                path,
            ));
        }
        Ok(())
    }

    fn assert_writable(&self, path: &Path) -> Result<()> {
        if !self.vfs.is_writable(path) {
            return Err(Error::io(
                format!("Path '{}' is not writable", path.display()),
                path,
            ));
        }
        Ok(())
    }

    fn assert_writable_file(&self, path: &Path) -> Result<()> {
        let resolved = self.resolve_path(path);
        let dir = parent_dir(&resolved);

        self.assert_exists(&dir)?;
        self.assert_is_directory(&dir)?;

        if self.path_exists(&resolved) {
            self.assert_writable(&resolved)
        } else {
            self.assert_writable(&dir)
        }
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let resolved = self.resolve_path(path);

        self.assert_exists(&resolved)?;
        self.assert_is_file(&resolved)?;
        self.assert_readable(&resolved)?;

        self.vfs.read(&resolved).map_err(|e| {
            Error::io_from(
                format!("Failed to read file '{}'", resolved.display()),
                &resolved,
                e,
            )
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<usize> {
        let resolved = self.resolve_path(path);
        self.assert_writable_file(&resolved)?;

        let dir = parent_dir(&resolved);
        let temp = self.vfs.create_temp_in(&dir).map_err(|e| {
            Error::io_from(
                format!(
                    "Could not create temporary file for atomic write on '{}'",
                    resolved.display()
                ),
                &resolved,
                e,
            )
        })?;

        if let Err(e) = self.vfs.write(&temp, data) {
            self.discard_temp(&temp);
            return Err(Error::io_from(
                format!(
                    "Could not write to temporary file for atomic write on '{}'",
                    resolved.display()
                ),
                &resolved,
                e,
            ));
        }

        if let Err(e) = self.rename(&temp, &resolved) {
            self.discard_temp(&temp);
            return Err(e);
        }

        tracing::debug!(
            path = %resolved.display(),
            bytes = data.len(),
            "Atomic write complete"
        );
        Ok(data.len())
    }

    fn rename(&self, source: &Path, destination: &Path) -> Result<()> {
        let source = self.resolve_path(source);
        let destination = self.resolve_path(destination);

        self.assert_exists(&source)?;

        self.vfs.rename(&source, &destination).map_err(|e| {
            Error::io_from(
                format!(
                    "Could not rename file '{}' to '{}'",
                    source.display(),
                    destination.display()
                ),
                &source,
                e,
            )
        })?;

        tracing::debug!(
            from = %source.display(),
            to = %destination.display(),
            "Renamed"
        );
        Ok(())
    }

    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        let resolved = self.resolve_path(path);

        self.assert_exists(&resolved)?;

        self.vfs.set_mode(&resolved, mode).map_err(|e| {
            Error::io_from(
                format!("Failed to chmod '{}' to '{:04o}'", resolved.display(), mode),
                &resolved,
                e,
            )
        })?;

        tracing::debug!(
            path = %resolved.display(),
            mode = %format!("{mode:04o}"),
            "Changed permissions"
        );
        Ok(())
    }
}
