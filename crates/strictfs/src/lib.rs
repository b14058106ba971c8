//! Guarded filesystem access with typed, path-carrying errors.
//!
//! Replaces silent-failure, boolean-returning filesystem primitives with
//! a uniform contract: every operation either succeeds with a
//! well-defined result or fails with an [`Error`] naming the offending
//! path. Writes are atomic (write-to-temporary-then-rename), path
//! resolution is total, and all preconditions are asserted before any
//! side effect.
//!
//! The surface is the [`Filesystem`] trait with a single concrete
//! implementation, [`HostFilesystem`], backed by the host platform's I/O
//! primitives through the [`Vfs`] seam.

pub mod error;
pub mod fs;
pub mod path;
pub mod vfs;

pub use error::{Error, Result};
pub use fs::{Filesystem, HostFilesystem};
pub use vfs::{OsVfs, Vfs};
