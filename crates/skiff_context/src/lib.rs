//! Build-context capability for the skiff package build driver.
//!
//! This crate knows the source-tree layout conventions: how an import path
//! maps to a package directory, which files belong to a package, where a
//! package's cached artifact lives, and how to read modification times.
//! Everything above it (cache, resolver, linker) consumes the [`BuildContext`]
//! trait and never touches the filesystem directly, which keeps the whole
//! driver testable against the in-memory implementation.

#![warn(missing_docs)]

pub mod error;
pub mod fs_context;
pub mod memory;
pub mod meta;
pub mod scan;

use std::path::Path;
use std::time::SystemTime;

pub use error::ContextError;
pub use fs_context::FsContext;
pub use memory::MemoryContext;
pub use meta::PackageMeta;

/// File extension for skiff source files.
pub const SOURCE_EXT: &str = "sk";

/// File extension for cached library archives.
pub const ARCHIVE_EXT: &str = "ska";

/// Import path of the low-level intrinsics pseudo-package.
///
/// It has no source files; the build driver registers a predefined
/// type-universe entry for it instead of translating anything.
pub const INTRINSICS_PATH: &str = "intrinsics";

/// Import path of the reflection-support pseudo-package.
///
/// Excluded from linker traversal to avoid bootstrapping cycles.
pub const REFLECT_PATH: &str = "reflect";

/// Capability interface to the underlying source tree.
///
/// Implemented by [`FsContext`] for real builds and [`MemoryContext`] for
/// tests. All methods take `&self`; implementations that need mutation use
/// interior mutability.
pub trait BuildContext {
    /// Locates the package for `import_path`, resolved relative to `from_dir`.
    ///
    /// Returns the package's directory, source file list, declared imports,
    /// command flag and artifact path. Fails with
    /// [`ContextError::ImportNotFound`] if no such package exists.
    fn locate(&self, import_path: &str, from_dir: &Path) -> Result<PackageMeta, ContextError>;

    /// Reads the full contents of a file.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ContextError>;

    /// Writes a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), ContextError>;

    /// Returns the modification time of a file, or `None` if it does not
    /// exist. `None` is the "epoch" case: an artifact with no readable
    /// timestamp is always considered stale.
    fn mod_time(&self, path: &Path) -> Option<SystemTime>;

    /// The compiler's own baseline modification time.
    ///
    /// Every package's freshness starts here, so artifacts built by an older
    /// compiler are never considered fresh.
    fn baseline(&self) -> SystemTime;
}
