//! Per-package exported type information and the session type table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::TypeDef;

/// Exported type information for one package.
///
/// Produced by the frontend when a package is translated, or reconstructed
/// from a library archive on a cache hit. This is what crosses the package
/// boundary: declared types and top-level function names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageTypes {
    /// Import path of the package this information describes.
    pub import_path: String,

    /// Types declared at the package's top level.
    pub types: Vec<TypeDef>,

    /// Top-level function names, used to detect `init` and `main`.
    pub funcs: Vec<String>,
}

impl PackageTypes {
    /// An empty entry for a pseudo-package.
    pub fn empty(import_path: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            types: Vec::new(),
            funcs: Vec::new(),
        }
    }

    /// Whether the package declares a top-level initializer.
    pub fn has_init(&self) -> bool {
        self.funcs.iter().any(|f| f == "init")
    }

    /// Whether the package declares an entry symbol.
    pub fn has_main(&self) -> bool {
        self.funcs.iter().any(|f| f == "main")
    }
}

/// Mapping from import path to resolved type information.
///
/// Append-only for the duration of one build session; entries are written
/// exactly once, when a package finishes translating or loads from archive.
#[derive(Debug, Default)]
pub struct TypeTable {
    packages: HashMap<String, PackageTypes>,
}

impl TypeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a package's exported type information.
    pub fn insert(&mut self, types: PackageTypes) {
        self.packages.insert(types.import_path.clone(), types);
    }

    /// Registers an empty predefined entry, used for the intrinsics
    /// pseudo-package.
    pub fn insert_empty(&mut self, import_path: &str) {
        self.packages
            .entry(import_path.to_string())
            .or_insert_with(|| PackageTypes::empty(import_path));
    }

    /// Looks up a package's type information.
    pub fn get(&self, import_path: &str) -> Option<&PackageTypes> {
        self.packages.get(import_path)
    }

    /// Whether the table has an entry for the import path.
    pub fn contains(&self, import_path: &str) -> bool {
        self.packages.contains_key(import_path)
    }

    /// Number of registered packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeShape, TypeDef};

    #[test]
    fn init_and_main_detection() {
        let mut pt = PackageTypes::empty("main");
        assert!(!pt.has_init());
        assert!(!pt.has_main());
        pt.funcs = vec!["init".to_string(), "main".to_string(), "helper".to_string()];
        assert!(pt.has_init());
        assert!(pt.has_main());
    }

    #[test]
    fn insert_and_get() {
        let mut table = TypeTable::new();
        assert!(table.is_empty());

        let mut pt = PackageTypes::empty("lib/geom");
        pt.types.push(TypeDef {
            pkg: "lib/geom".to_string(),
            name: "Point".to_string(),
            shape: TypeShape::Struct,
            methods: vec![],
        });
        table.insert(pt);

        assert_eq!(table.len(), 1);
        assert!(table.contains("lib/geom"));
        assert_eq!(table.get("lib/geom").unwrap().types[0].name, "Point");
        assert!(table.get("lib/other").is_none());
    }

    #[test]
    fn insert_empty_does_not_clobber() {
        let mut table = TypeTable::new();
        let mut pt = PackageTypes::empty("intrinsics");
        pt.funcs.push("magic".to_string());
        table.insert(pt);

        table.insert_empty("intrinsics");
        assert_eq!(table.get("intrinsics").unwrap().funcs, vec!["magic"]);
    }
}
