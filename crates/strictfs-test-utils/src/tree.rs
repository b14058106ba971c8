//! [`TempTree`], a scratch-directory builder for filesystem tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory with helper methods for laying out fixtures and
/// asserting on the result.
///
/// # Example
///
/// ```rust,no_run
/// use strictfs_test_utils::tree::TempTree;
///
/// let tree = TempTree::new();
/// let config = tree.file("etc/app.conf", b"threads = 4\n");
/// tree.assert_file_contains("etc/app.conf", "threads");
/// assert!(config.starts_with(tree.root()));
/// ```
pub struct TempTree {
    temp_dir: TempDir,
}

impl Default for TempTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TempTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The canonical form of the root, matching what resolved paths in
    /// error messages look like.
    pub fn canonical_root(&self) -> PathBuf {
        fs::canonicalize(self.root())
            .expect("TempTree::canonical_root: temp directory should canonicalize")
    }

    /// Create a file at `rel` (relative to the root) with `contents`,
    /// creating parent directories as needed. Returns the absolute path.
    pub fn file(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Create a directory at `rel`, parents included. Returns the
    /// absolute path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Create a symlink at `rel` pointing to `target`. Returns the
    /// absolute path of the link. The target may dangle.
    #[cfg(unix)]
    pub fn symlink(&self, target: impl AsRef<Path>, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        std::os::unix::fs::symlink(target, &path).unwrap();
        path
    }

    /// Set the permission bits of `rel`.
    #[cfg(unix)]
    pub fn set_mode(&self, rel: &str, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(self.root().join(rel), fs::Permissions::from_mode(mode)).unwrap();
    }

    /// The permission bits of `rel`, masked to the four octal digits.
    #[cfg(unix)]
    pub fn mode_of(&self, rel: &str) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(self.root().join(rel)).unwrap().permissions().mode() & 0o7777
    }

    /// Read the file at `rel` back.
    pub fn read(&self, rel: &str) -> Vec<u8> {
        fs::read(self.root().join(rel)).unwrap()
    }

    /// The number of directory entries directly under `rel` (`""` for the
    /// root). Useful for spotting leftover temporary files.
    pub fn entry_count(&self, rel: &str) -> usize {
        fs::read_dir(self.root().join(rel)).unwrap().count()
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, rel: &str) {
        let full_path = self.root().join(rel);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, rel: &str) {
        let full_path = self.root().join(rel);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let full_path = self.root().join(rel);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "Expected {} to contain {:?}, got {:?}",
            full_path.display(),
            content,
            file_content
        );
    }
}
