//! In-memory build context for deterministic tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ContextError;
use crate::meta::PackageMeta;
use crate::scan::scan_source;
use crate::{BuildContext, ARCHIVE_EXT};

/// A build context backed entirely by in-memory tables.
///
/// Packages, file contents and modification times are all explicit, so tests
/// can stage any staleness scenario without touching the filesystem. Writes
/// are stamped with a settable logical clock.
pub struct MemoryContext {
    /// Registered packages by import path.
    packages: HashMap<String, PackageMeta>,
    /// File contents and modification times.
    files: RefCell<HashMap<PathBuf, (Vec<u8>, SystemTime)>>,
    /// The compiler baseline time.
    baseline: SystemTime,
    /// Timestamp assigned to subsequent writes.
    now: Cell<SystemTime>,
}

/// Turns a seconds offset into a timestamp, for readable test setups.
pub fn stamp(secs: u64) -> SystemTime {
    UNIX_EPOCH + std::time::Duration::from_secs(secs)
}

impl MemoryContext {
    /// Creates an empty context with an epoch baseline.
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            files: RefCell::new(HashMap::new()),
            baseline: UNIX_EPOCH,
            now: Cell::new(stamp(1)),
        }
    }

    /// Sets the compiler baseline time.
    pub fn set_baseline(&mut self, t: SystemTime) {
        self.baseline = t;
    }

    /// Sets the timestamp stamped onto subsequent writes.
    pub fn set_now(&self, t: SystemTime) {
        self.now.set(t);
    }

    /// Registers a package with explicit metadata.
    pub fn add_package(&mut self, meta: PackageMeta) {
        self.packages.insert(meta.import_path.clone(), meta);
    }

    /// Adds a file with the given contents and modification time.
    pub fn add_file(&self, path: impl AsRef<Path>, bytes: &[u8], time: SystemTime) {
        self.files
            .borrow_mut()
            .insert(path.as_ref().to_path_buf(), (bytes.to_vec(), time));
    }

    /// Registers a package from `(file name, source, mod-time seconds)`
    /// triples, deriving imports and the command flag by scanning the
    /// sources the way [`FsContext`](crate::FsContext) does.
    pub fn add_package_src(&mut self, import_path: &str, sources: &[(&str, &str, u64)]) {
        let dir = PathBuf::from(format!("/mem/src/{import_path}"));
        let mut imports: Vec<String> = Vec::new();
        let mut is_command = false;
        let mut source_files = Vec::new();

        for (name, content, secs) in sources {
            source_files.push(name.to_string());
            let scanned = scan_source(content.as_bytes());
            for imp in scanned.imports {
                if !imports.contains(&imp) {
                    imports.push(imp);
                }
            }
            is_command |= scanned.has_main;
            self.add_file(dir.join(name), content.as_bytes(), stamp(*secs));
        }
        source_files.sort();

        let artifact_path = if is_command {
            PathBuf::from("/mem/out.js")
        } else {
            PathBuf::from(format!("/mem/cache/{import_path}.{ARCHIVE_EXT}"))
        };

        self.add_package(PackageMeta {
            import_path: import_path.to_string(),
            dir,
            source_files,
            imports,
            is_command,
            artifact_path: Some(artifact_path),
        });
    }
}

impl Default for MemoryContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildContext for MemoryContext {
    fn locate(&self, import_path: &str, _from_dir: &Path) -> Result<PackageMeta, ContextError> {
        self.packages
            .get(import_path)
            .cloned()
            .ok_or_else(|| ContextError::ImportNotFound {
                import_path: import_path.to_string(),
            })
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ContextError> {
        self.files
            .borrow()
            .get(path)
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| {
                ContextError::io(
                    path.to_path_buf(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                )
            })
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), ContextError> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), (bytes.to_vec(), self.now.get()));
        Ok(())
    }

    fn mod_time(&self, path: &Path) -> Option<SystemTime> {
        self.files.borrow().get(path).map(|(_, t)| *t)
    }

    fn baseline(&self) -> SystemTime {
        self.baseline
    }
}
