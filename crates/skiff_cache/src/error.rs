//! Error types for cache and archive operations.
//!
//! Archive failures are fatal for the affected package's build: they
//! propagate to the resolver rather than degrading into a cache miss.

use std::path::PathBuf;

/// Errors that can occur while reading or writing package archives.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A package that should have an artifact path does not.
    #[error("package \"{import_path}\" has no artifact path")]
    MissingArtifactPath {
        /// The import path of the offending package.
        import_path: String,
    },

    /// The archive file is too short to contain a header.
    #[error("truncated archive: {path}")]
    Truncated {
        /// The archive file path.
        path: PathBuf,
    },

    /// The archive header is malformed or carries the wrong magic bytes.
    #[error("invalid archive header in {path}: {reason}")]
    InvalidHeader {
        /// The archive file path.
        path: PathBuf,
        /// Description of the header problem.
        reason: String,
    },

    /// The archive was written with an incompatible format version.
    #[error("archive format version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The archive file path.
        path: PathBuf,
        /// The supported format version.
        expected: u32,
        /// The version found in the file.
        actual: u32,
    },

    /// The payload checksum does not match the header.
    #[error("archive checksum mismatch in {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The archive file path.
        path: PathBuf,
        /// The checksum recorded in the header.
        expected: String,
        /// The checksum computed from the payload.
        actual: String,
    },

    /// The archive header could not be serialized.
    #[error("failed to encode archive header: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },

    /// The exported-type section could not be encoded or decoded.
    #[error(transparent)]
    TypeData(#[from] skiff_types::ExportError),

    /// An I/O failure from the underlying build context.
    #[error(transparent)]
    Context(#[from] skiff_context::ContextError),
}
