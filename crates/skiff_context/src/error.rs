//! Error types for build-context operations.

use std::path::PathBuf;

/// Errors that can occur while locating packages or touching files.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// A declared import path could not be located in the source tree.
    #[error("import not found: \"{import_path}\"")]
    ImportNotFound {
        /// The import path that failed to resolve.
        import_path: String,
    },

    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl ContextError {
    /// Convenience constructor for [`ContextError::Io`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_not_found_display() {
        let err = ContextError::ImportNotFound {
            import_path: "lib/missing".to_string(),
        };
        assert_eq!(format!("{err}"), "import not found: \"lib/missing\"");
    }

    #[test]
    fn io_display_includes_path() {
        let err = ContextError::io(
            "src/main/main.sk",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = format!("{err}");
        assert!(msg.contains("main.sk"));
        assert!(msg.contains("no such file"));
    }
}
