//! Filesystem-backed build context.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ContextError;
use crate::meta::PackageMeta;
use crate::scan::scan_source;
use crate::{BuildContext, ARCHIVE_EXT, SOURCE_EXT};

/// Build context rooted in a real source tree.
///
/// Layout convention: the package for import path `p` lives at
/// `<src_root>/<p>/` and consists of every `.sk` file directly in that
/// directory. Library artifacts are cached at `<cache_dir>/<p>.ska`; the
/// command artifact is the output bundle itself.
pub struct FsContext {
    /// Root of the source tree.
    src_root: PathBuf,
    /// Directory for cached library archives.
    cache_dir: PathBuf,
    /// Output path of the linked bundle (the command artifact).
    out_path: PathBuf,
    /// The compiler's own baseline modification time.
    baseline: SystemTime,
}

impl FsContext {
    /// Creates a context for the given source root, cache directory and
    /// bundle output path.
    ///
    /// The baseline defaults to the modification time of the running
    /// executable, so rebuilding the compiler invalidates every artifact.
    pub fn new(src_root: PathBuf, cache_dir: PathBuf, out_path: PathBuf) -> Self {
        let baseline = std::env::current_exe()
            .ok()
            .and_then(|exe| std::fs::metadata(exe).ok())
            .and_then(|m| m.modified().ok())
            .unwrap_or(UNIX_EPOCH);
        Self {
            src_root,
            cache_dir,
            out_path,
            baseline,
        }
    }

    /// Overrides the baseline modification time.
    pub fn with_baseline(mut self, baseline: SystemTime) -> Self {
        self.baseline = baseline;
        self
    }

    /// Collects the sorted `.sk` file names directly inside `dir`.
    fn list_sources(dir: &Path) -> Result<Vec<String>, ContextError> {
        let entries =
            std::fs::read_dir(dir).map_err(|e| ContextError::io(dir.to_path_buf(), e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ContextError::io(dir.to_path_buf(), e))?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXT) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

impl BuildContext for FsContext {
    fn locate(&self, import_path: &str, _from_dir: &Path) -> Result<PackageMeta, ContextError> {
        let dir = self.src_root.join(import_path);
        if !dir.is_dir() {
            return Err(ContextError::ImportNotFound {
                import_path: import_path.to_string(),
            });
        }

        let source_files = Self::list_sources(&dir)?;
        if source_files.is_empty() {
            return Err(ContextError::ImportNotFound {
                import_path: import_path.to_string(),
            });
        }

        let mut imports: Vec<String> = Vec::new();
        let mut is_command = false;
        for name in &source_files {
            let bytes = self.read_file(&dir.join(name))?;
            let scanned = scan_source(&bytes);
            for imp in scanned.imports {
                if !imports.contains(&imp) {
                    imports.push(imp);
                }
            }
            is_command |= scanned.has_main;
        }

        let artifact_path = if is_command {
            self.out_path.clone()
        } else {
            self.cache_dir
                .join(format!("{import_path}.{ARCHIVE_EXT}"))
        };

        Ok(PackageMeta {
            import_path: import_path.to_string(),
            dir,
            source_files,
            imports,
            is_command,
            artifact_path: Some(artifact_path),
        })
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ContextError> {
        std::fs::read(path).map_err(|e| ContextError::io(path.to_path_buf(), e))
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), ContextError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ContextError::io(parent.to_path_buf(), e))?;
        }
        std::fs::write(path, bytes).map_err(|e| ContextError::io(path.to_path_buf(), e))
    }

    fn mod_time(&self, path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).ok()?.modified().ok()
    }

    fn baseline(&self) -> SystemTime {
        self.baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tree() -> (tempfile::TempDir, FsContext) {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let cache = dir.path().join(".skiff-cache");
        let out = dir.path().join("out.js");
        std::fs::create_dir_all(&src).unwrap();
        let ctx = FsContext::new(src, cache, out).with_baseline(UNIX_EPOCH);
        (dir, ctx)
    }

    fn write_pkg(root: &Path, import_path: &str, files: &[(&str, &str)]) {
        let dir = root.join("src").join(import_path);
        std::fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            std::fs::write(dir.join(name), content).unwrap();
        }
    }

    #[test]
    fn locate_library_package() {
        let (dir, ctx) = make_tree();
        write_pkg(
            dir.path(),
            "lib/geom",
            &[("geom.sk", "import \"lib/util\"\nemit var x = 1;\n")],
        );

        let meta = ctx.locate("lib/geom", Path::new(".")).unwrap();
        assert_eq!(meta.import_path, "lib/geom");
        assert_eq!(meta.source_files, vec!["geom.sk"]);
        assert_eq!(meta.imports, vec!["lib/util"]);
        assert!(!meta.is_command);
        let artifact = meta.artifact_path.unwrap();
        assert!(artifact.ends_with(".skiff-cache/lib/geom.ska"));
    }

    #[test]
    fn locate_command_package() {
        let (dir, ctx) = make_tree();
        write_pkg(dir.path(), "main", &[("main.sk", "func main\nemit go();\n")]);

        let meta = ctx.locate("main", Path::new(".")).unwrap();
        assert!(meta.is_command);
        assert!(meta.artifact_path.unwrap().ends_with("out.js"));
    }

    #[test]
    fn missing_package_is_import_not_found() {
        let (_dir, ctx) = make_tree();
        let err = ctx.locate("lib/nope", Path::new(".")).unwrap_err();
        assert!(matches!(err, ContextError::ImportNotFound { .. }));
    }

    #[test]
    fn empty_directory_is_import_not_found() {
        let (dir, ctx) = make_tree();
        std::fs::create_dir_all(dir.path().join("src/lib/empty")).unwrap();
        let err = ctx.locate("lib/empty", Path::new(".")).unwrap_err();
        assert!(matches!(err, ContextError::ImportNotFound { .. }));
    }

    #[test]
    fn source_files_sorted_and_imports_deduplicated() {
        let (dir, ctx) = make_tree();
        write_pkg(
            dir.path(),
            "lib/multi",
            &[
                ("b.sk", "import \"lib/dep\"\n"),
                ("a.sk", "import \"lib/dep\"\nimport \"lib/other\"\n"),
            ],
        );

        let meta = ctx.locate("lib/multi", Path::new(".")).unwrap();
        assert_eq!(meta.source_files, vec!["a.sk", "b.sk"]);
        assert_eq!(meta.imports, vec!["lib/dep", "lib/other"]);
    }

    #[test]
    fn non_source_files_ignored() {
        let (dir, ctx) = make_tree();
        write_pkg(dir.path(), "lib/mixed", &[("a.sk", "emit x;\n")]);
        std::fs::write(dir.path().join("src/lib/mixed/readme.txt"), "notes").unwrap();

        let meta = ctx.locate("lib/mixed", Path::new(".")).unwrap();
        assert_eq!(meta.source_files, vec!["a.sk"]);
    }

    #[test]
    fn write_file_creates_parents() {
        let (dir, ctx) = make_tree();
        let target = dir.path().join(".skiff-cache/lib/deep/pkg.ska");
        ctx.write_file(&target, b"archive").unwrap();
        assert_eq!(ctx.read_file(&target).unwrap(), b"archive");
        assert!(ctx.mod_time(&target).is_some());
    }

    #[test]
    fn mod_time_missing_file_is_none() {
        let (dir, ctx) = make_tree();
        assert!(ctx.mod_time(&dir.path().join("nope.sk")).is_none());
    }
}
