//! Error taxonomy for the build session.
//!
//! No error is recovered or retried locally: every failure aborts the
//! current package's build and propagates to its caller.

use crate::frontend::{ParseErrorList, TranslateError};

/// Errors that can abort a package build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Two packages import each other, directly or transitively. The
    /// registry detects this when a resolution re-enters a package that is
    /// still being built.
    #[error("import cycle through \"{import_path}\"")]
    ImportCycle {
        /// The import path where the cycle was detected.
        import_path: String,
    },

    /// One or more source files in a package failed to parse. All of the
    /// package's parse errors are reported together.
    #[error(transparent)]
    Parse(#[from] ParseErrorList),

    /// The translation collaborator failed; opaque, propagated as-is.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// An archive could not be read or written. Fatal, not retried.
    #[error(transparent)]
    Cache(#[from] skiff_cache::CacheError),

    /// The build context failed: an import could not be located, or a
    /// source file could not be read.
    #[error(transparent)]
    Context(#[from] skiff_context::ContextError),
}

impl BuildError {
    /// Whether this is a missing-import failure.
    pub fn is_import_not_found(&self) -> bool {
        matches!(
            self,
            BuildError::Context(skiff_context::ContextError::ImportNotFound { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_display() {
        let err = BuildError::ImportCycle {
            import_path: "lib/a".to_string(),
        };
        assert_eq!(format!("{err}"), "import cycle through \"lib/a\"");
    }

    #[test]
    fn import_not_found_is_detectable() {
        let err: BuildError = skiff_context::ContextError::ImportNotFound {
            import_path: "lib/x".to_string(),
        }
        .into();
        assert!(err.is_import_not_found());
        assert_eq!(format!("{err}"), "import not found: \"lib/x\"");
    }
}
