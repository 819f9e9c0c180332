//! The skiff build session: package registry, recursive resolver, and the
//! translator adapter.
//!
//! One [`BuildSession`] drives one compilation run. Resolving an import path
//! recursively resolves everything it depends on, depth-first, consulting
//! the archive cache before retranslating. The session's registry memoizes
//! every package and doubles as the cycle detector; the shared type table
//! accumulates each package's exported type information as it completes.

#![warn(missing_docs)]

pub mod error;
pub mod frontend;
pub mod session;

pub use error::BuildError;
pub use frontend::{Frontend, ParseError, ParseErrorList, TranslateError};
pub use session::{BuildSession, CompiledPackage};
