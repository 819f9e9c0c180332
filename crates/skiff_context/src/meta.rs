//! Package metadata as reported by the build context.

use std::path::PathBuf;

/// Source-level metadata for one package, produced by
/// [`BuildContext::locate`](crate::BuildContext::locate).
///
/// This is the resolver's view of a package before anything is built:
/// where it lives, what it contains, what it imports, and where its cached
/// artifact would be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMeta {
    /// Globally unique import path identifying the package.
    pub import_path: String,

    /// Directory containing the package's source files.
    pub dir: PathBuf,

    /// Source file names within `dir`, sorted.
    pub source_files: Vec<String>,

    /// Import paths declared across the package's source files, in first
    /// appearance order, deduplicated.
    pub imports: Vec<String>,

    /// Whether the package is a command (entry point) rather than a library.
    pub is_command: bool,

    /// Where the package's build artifact lives: the archive file for a
    /// library, the output bundle for a command. `None` for pseudo-packages.
    pub artifact_path: Option<PathBuf>,
}

impl PackageMeta {
    /// Full paths of the package's source files.
    pub fn source_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.source_files.iter().map(|name| self.dir.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_paths_join_dir() {
        let meta = PackageMeta {
            import_path: "lib/geom".to_string(),
            dir: PathBuf::from("/src/lib/geom"),
            source_files: vec!["point.sk".to_string(), "rect.sk".to_string()],
            imports: vec![],
            is_command: false,
            artifact_path: None,
        };
        let paths: Vec<_> = meta.source_paths().collect();
        assert_eq!(paths[0], PathBuf::from("/src/lib/geom/point.sk"));
        assert_eq!(paths[1], PathBuf::from("/src/lib/geom/rect.sk"));
    }
}
