//! The frontend capability: parsing and package translation.
//!
//! The build driver treats the source-language parser and the
//! statement-level translator as one external collaborator behind this
//! trait. The driver never inspects parsed files; it only carries them from
//! `parse` to `translate`.

use std::fmt;
use std::path::{Path, PathBuf};

use skiff_context::PackageMeta;
use skiff_types::{PackageTypes, TypeTable};

/// A single scan or parse failure in one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The file the error occurred in.
    pub path: PathBuf,
    /// One-based line number, when known.
    pub line: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.path.display(), line, self.message),
            None => write!(f, "{}: {}", self.path.display(), self.message),
        }
    }
}

/// Parse failures accumulated across all of a package's source files.
///
/// Every failure stays inspectable; `Display` renders the first one with a
/// count of the rest, which is enough for a one-line report.
#[derive(Debug)]
pub struct ParseErrorList(Vec<ParseError>);

impl ParseErrorList {
    /// Wraps a non-empty list of accumulated errors.
    pub fn new(errors: Vec<ParseError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    /// All accumulated errors.
    pub fn errors(&self) -> &[ParseError] {
        &self.0
    }

    /// Number of accumulated errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty (never true when constructed normally).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ParseErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.first() {
            Some(first) if self.0.len() == 1 => write!(f, "{first}"),
            Some(first) => write!(f, "{first} (and {} more errors)", self.0.len() - 1),
            None => write!(f, "no errors"),
        }
    }
}

impl std::error::Error for ParseErrorList {}

/// An opaque failure from the translation collaborator.
#[derive(Debug, thiserror::Error)]
#[error("translation failed for \"{import_path}\": {reason}")]
pub struct TranslateError {
    /// The package being translated.
    pub import_path: String,
    /// Description of the failure.
    pub reason: String,
}

/// The parser/translator collaborator consumed by the build session.
pub trait Frontend {
    /// The frontend's parsed representation of one source file.
    type File;

    /// Parses one source file. Failures are returned as a list so the
    /// session can accumulate errors across the whole package.
    fn parse(&self, path: &Path, source: &[u8]) -> Result<Self::File, Vec<ParseError>>;

    /// Translates a fully parsed package into emitted code plus its
    /// exported type information. The type table already contains an entry
    /// for every import of `meta`.
    fn translate(
        &self,
        meta: &PackageMeta,
        files: &[Self::File],
        types: &TypeTable,
    ) -> Result<(Vec<u8>, PackageTypes), TranslateError>;
}
