//! The program linker: assembles a resolved build session into one
//! JavaScript bundle.
//!
//! Linking walks the dependency graph depth-first from the entry package,
//! emitting each package's module wrapper strictly after the wrappers of
//! everything it imports. After the wrappers come the interface dispatch
//! tables, the package initializer calls in dependency order, and finally
//! the single entry-point invocation.

#![warn(missing_docs)]

pub mod analyze;
pub mod error;
pub mod linker;

pub use error::LinkError;
pub use linker::link;
