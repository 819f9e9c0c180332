//! Bundle assembly: dependency-first emission, init calls, entry invocation.

use std::collections::HashSet;

use skiff_build::{BuildSession, Frontend};
use skiff_context::{INTRINSICS_PATH, REFLECT_PATH};
use skiff_types::TypeDef;

use crate::analyze::dispatch_tables;
use crate::error::LinkError;

/// Links a resolved session into a complete bundle.
///
/// `entry_path` must already be resolved in `session` and must declare a
/// `main` function. The bundle is the prelude, every reachable package's
/// module wrapper in dependency-first order, the interface dispatch tables,
/// the initializer calls, and one entry invocation. Each package is emitted
/// exactly once even when imported along several paths.
pub fn link<F: Frontend>(
    session: &BuildSession<'_, F>,
    entry_path: &str,
    prelude: &str,
) -> Result<Vec<u8>, LinkError> {
    let entry_types = session
        .types()
        .get(entry_path)
        .ok_or_else(|| LinkError::MissingTypes {
            import_path: entry_path.to_string(),
        })?;
    if !entry_types.has_main() {
        return Err(LinkError::MissingMain {
            import_path: entry_path.to_string(),
        });
    }

    let mut linker = Linker {
        session,
        out: Vec::new(),
        emitted: HashSet::new(),
        inits: Vec::new(),
        defs: Vec::new(),
    };

    linker.out.extend_from_slice(prelude.trim().as_bytes());
    linker.out.push(b'\n');

    linker.emit_package(entry_path)?;

    for line in dispatch_tables(&linker.defs) {
        linker.out.extend_from_slice(line.as_bytes());
        linker.out.push(b'\n');
    }
    for path in &linker.inits {
        linker
            .out
            .extend_from_slice(format!("$packages[\"{path}\"].init();\n").as_bytes());
    }
    linker
        .out
        .extend_from_slice(format!("$packages[\"{entry_path}\"].main();\n").as_bytes());

    Ok(linker.out)
}

struct Linker<'a, 'b, F: Frontend> {
    session: &'a BuildSession<'b, F>,
    out: Vec<u8>,
    emitted: HashSet<String>,
    inits: Vec<String>,
    defs: Vec<TypeDef>,
}

impl<F: Frontend> Linker<'_, '_, F> {
    /// Emits `import_path`'s wrapper after all of its imports' wrappers.
    ///
    /// The guard set here is separate from the session registry: the
    /// registry answers "is it built", this answers "is it in the bundle".
    fn emit_package(&mut self, import_path: &str) -> Result<(), LinkError> {
        if !self.emitted.insert(import_path.to_string()) {
            return Ok(());
        }

        let pkg =
            self.session
                .package(import_path)
                .ok_or_else(|| LinkError::MissingPackage {
                    import_path: import_path.to_string(),
                })?;
        let types =
            self.session
                .types()
                .get(import_path)
                .ok_or_else(|| LinkError::MissingTypes {
                    import_path: import_path.to_string(),
                })?;

        for import in &pkg.meta.imports {
            if import == INTRINSICS_PATH || import == REFLECT_PATH {
                continue;
            }
            self.emit_package(import)?;
        }

        self.out
            .extend_from_slice(format!("$packages[\"{import_path}\"] = (function() {{\n").as_bytes());
        self.out.extend_from_slice(&pkg.code);
        self.out.extend_from_slice(b"})();\n");

        if types.has_init() {
            self.inits.push(import_path.to_string());
        }
        self.defs.extend(types.types.iter().cloned());
        Ok(())
    }
}
