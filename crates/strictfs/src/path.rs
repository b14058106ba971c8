//! Syntactic path resolution rules.
//!
//! Everything here is pure string manipulation; OS-level canonicalization
//! happens behind the [`Vfs`](crate::vfs::Vfs) seam.

use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Regex for URI-scheme-prefixed locators (`scheme://...`).
static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("Invalid scheme regex"));

/// True if `path` needs no base directory: it starts with the platform
/// separator or carries a URI-scheme prefix.
pub fn is_absolute_like(path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.starts_with(MAIN_SEPARATOR) || SCHEME_REGEX.is_match(&text)
}

/// Join `path` onto `base`, stripping a single trailing separator from
/// `base` only. Trailing separators on `path` itself survive verbatim;
/// the asymmetry is what keeps `/x/y/` resolving to `/x/y/`.
pub fn join_relative(base: &Path, path: &Path) -> PathBuf {
    let base = base.to_string_lossy();
    let base = base.strip_suffix(MAIN_SEPARATOR).unwrap_or(&base);

    let path = path.to_string_lossy();
    let mut joined = String::with_capacity(base.len() + 1 + path.len());
    joined.push_str(base);
    joined.push(MAIN_SEPARATOR);
    joined.push_str(&path);
    PathBuf::from(joined)
}

/// The directory a file at `path` would live in. The filesystem root is
/// its own parent.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from(MAIN_SEPARATOR_STR),
    }
}
