//! Linker failures. Any of these means no bundle is produced at all.

/// Errors that abort linking.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// A package reachable from the entry was never resolved by the build
    /// session. The resolver builds the whole graph before linking starts,
    /// so this indicates the session and the linker disagree on the graph.
    #[error("package \"{import_path}\" is not in the build registry")]
    MissingPackage {
        /// The unresolved import path.
        import_path: String,
    },

    /// A resolved package has no entry in the type table.
    #[error("no type information for package \"{import_path}\"")]
    MissingTypes {
        /// The import path without type information.
        import_path: String,
    },

    /// The entry package declares no `main` function.
    #[error("entry package \"{import_path}\" has no main function")]
    MissingMain {
        /// The entry package's import path.
        import_path: String,
    },
}
