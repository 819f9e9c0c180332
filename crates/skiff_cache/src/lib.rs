//! Staleness detection and the package-archive cache.
//!
//! A library package that has not changed since its last build is loaded
//! from an on-disk archive instead of being retranslated. The archive is a
//! self-describing two-section container: the package's emitted code and its
//! serialized exported-type information, guarded by a validated binary
//! header. Staleness is decided by conservative modification-time
//! comparison: any input newer than the recorded artifact forces a rebuild.
//!
//! Unlike a fail-safe cache, archive corruption and I/O failures here are
//! fatal for the affected package's build: a fresh-looking artifact that
//! cannot be read back is an error, never a silent rebuild.

#![warn(missing_docs)]

pub mod archive;
pub mod error;
pub mod hash;
pub mod store;

pub use archive::{decode_archive, encode_archive, ArchiveContents};
pub use error::CacheError;
pub use hash::ContentHash;
pub use store::{check, fold_source_times, load, store, CacheStatus};

/// Version string of the tool, recorded in archive headers.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
