//! The build session: memoized recursive resolution and the translator
//! adapter.

use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use skiff_cache::CacheStatus;
use skiff_context::{BuildContext, PackageMeta, INTRINSICS_PATH};
use skiff_types::TypeTable;

use crate::error::BuildError;
use crate::frontend::{Frontend, ParseErrorList};

/// One fully built node in the package graph.
///
/// Populated exactly once when its build step returns; never mutated
/// afterwards.
#[derive(Debug)]
pub struct CompiledPackage {
    /// Source metadata from the build context.
    pub meta: PackageMeta,

    /// The latest modification time among the compiler baseline, every
    /// transitive import's freshness, and every own source file. Never
    /// older than any dependency's freshness.
    pub freshness: SystemTime,

    /// Emitted code for the package. Empty for pseudo-packages and for
    /// up-to-date commands (the bundle on disk is already current).
    pub code: Vec<u8>,

    /// Whether the code came from the archive cache rather than a fresh
    /// translation.
    pub loaded_from_cache: bool,

    /// Whether the package's artifact was already up to date. For a
    /// command this means the final bundle needs no relink.
    pub up_to_date: bool,
}

/// Registry slot: a package currently on the resolution stack, or done.
/// Unvisited packages are simply absent from the registry.
enum PackageSlot {
    InProgress,
    Done(CompiledPackage),
}

/// One compilation run: registry, type table, and borrowed capabilities.
///
/// Never a process-wide singleton; independent sessions can run without
/// cross-talk. Single-threaded by design: the registry's cycle marker and
/// the type table both rely on strictly sequential mutation.
pub struct BuildSession<'a, F: Frontend> {
    ctx: &'a dyn BuildContext,
    frontend: &'a F,
    types: TypeTable,
    packages: HashMap<String, PackageSlot>,
}

impl<'a, F: Frontend> BuildSession<'a, F> {
    /// Creates a session over the given context and frontend.
    pub fn new(ctx: &'a dyn BuildContext, frontend: &'a F) -> Self {
        Self {
            ctx,
            frontend,
            types: TypeTable::new(),
            packages: HashMap::new(),
        }
    }

    /// The session's accumulated type table.
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// A finished package, if `import_path` has been resolved.
    pub fn package(&self, import_path: &str) -> Option<&CompiledPackage> {
        match self.packages.get(import_path) {
            Some(PackageSlot::Done(pkg)) => Some(pkg),
            _ => None,
        }
    }

    /// Every finished package, in no particular order.
    pub fn packages(&self) -> impl Iterator<Item = &CompiledPackage> {
        self.packages.values().filter_map(|slot| match slot {
            PackageSlot::Done(pkg) => Some(pkg),
            PackageSlot::InProgress => None,
        })
    }

    /// Resolves and builds a package, memoized, returning its freshness.
    ///
    /// The first request for an import path locates and builds the package
    /// (recursively resolving its imports); later requests return the
    /// memoized result without re-entering the build. Re-entering a package
    /// that is still building is an import cycle and fails rather than
    /// observing an incomplete entry.
    pub fn resolve(&mut self, import_path: &str, from_dir: &Path) -> Result<SystemTime, BuildError> {
        match self.packages.get(import_path) {
            Some(PackageSlot::Done(pkg)) => return Ok(pkg.freshness),
            Some(PackageSlot::InProgress) => {
                return Err(BuildError::ImportCycle {
                    import_path: import_path.to_string(),
                })
            }
            None => {}
        }

        if import_path == INTRINSICS_PATH {
            return Ok(self.register_intrinsics());
        }

        let meta = self.ctx.locate(import_path, from_dir)?;
        self.packages
            .insert(import_path.to_string(), PackageSlot::InProgress);

        match self.build_package(meta) {
            Ok(pkg) => {
                let freshness = pkg.freshness;
                self.packages
                    .insert(import_path.to_string(), PackageSlot::Done(pkg));
                Ok(freshness)
            }
            Err(e) => {
                // Drop the marker so the slot doesn't read as a false cycle;
                // the whole build is aborting anyway.
                self.packages.remove(import_path);
                Err(e)
            }
        }
    }

    /// Registers the predefined type-universe entry for the intrinsics
    /// pseudo-package: no sources, no freshness computation, no artifact.
    fn register_intrinsics(&mut self) -> SystemTime {
        self.types.insert_empty(INTRINSICS_PATH);
        self.packages.insert(
            INTRINSICS_PATH.to_string(),
            PackageSlot::Done(CompiledPackage {
                meta: PackageMeta {
                    import_path: INTRINSICS_PATH.to_string(),
                    dir: Path::new("").to_path_buf(),
                    source_files: Vec::new(),
                    imports: Vec::new(),
                    is_command: false,
                    artifact_path: None,
                },
                freshness: UNIX_EPOCH,
                code: Vec::new(),
                loaded_from_cache: false,
                up_to_date: true,
            }),
        );
        UNIX_EPOCH
    }

    /// The translator adapter: freshness, cache consultation, parse,
    /// translate, persist.
    fn build_package(&mut self, meta: PackageMeta) -> Result<CompiledPackage, BuildError> {
        let ctx = self.ctx;

        // Freshness starts at the compiler baseline and folds in every
        // import's freshness; resolving here is what builds the dependency
        // graph depth-first.
        let mut freshness = ctx.baseline();
        let dir = meta.dir.clone();
        for import in meta.imports.clone() {
            let t = self.resolve(&import, &dir)?;
            if t > freshness {
                freshness = t;
            }
        }
        freshness = skiff_cache::fold_source_times(ctx, &meta, freshness);

        if skiff_cache::check(ctx, &meta, freshness) == CacheStatus::Fresh {
            if meta.is_command {
                // Commands are always relinked from scratch; a fresh bundle
                // means there is nothing to do at all.
                return Ok(CompiledPackage {
                    meta,
                    freshness,
                    code: Vec::new(),
                    loaded_from_cache: false,
                    up_to_date: true,
                });
            }
            let (code, types) = skiff_cache::load(ctx, &meta)?;
            self.types.insert(types);
            return Ok(CompiledPackage {
                meta,
                freshness,
                code,
                loaded_from_cache: true,
                up_to_date: true,
            });
        }

        // Full build: parse every source file, accumulating failures so the
        // package's errors are reported as a unit.
        let mut files = Vec::new();
        let mut parse_errors = Vec::new();
        for path in meta.source_paths() {
            let source = ctx.read_file(&path)?;
            match self.frontend.parse(&path, &source) {
                Ok(file) => files.push(file),
                Err(mut errors) => parse_errors.append(&mut errors),
            }
        }
        if !parse_errors.is_empty() {
            return Err(ParseErrorList::new(parse_errors).into());
        }

        let (code, pkg_types) = self.frontend.translate(&meta, &files, &self.types)?;

        if !meta.is_command {
            skiff_cache::store(ctx, &meta, &code, &pkg_types)?;
        }
        self.types.insert(pkg_types);

        Ok(CompiledPackage {
            meta,
            freshness,
            code,
            loaded_from_cache: false,
            up_to_date: false,
        })
    }
}
