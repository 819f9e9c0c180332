//! Whole-program interface satisfaction analysis.
//!
//! Once every package wrapper is emitted, the linker knows every declared
//! type in the bundle. This pass pairs each interface with every concrete
//! type that structurally satisfies it and emits one dispatch-table
//! assignment per interface, so the runtime can answer type assertions with
//! a precomputed list instead of a per-assertion method scan.
//!
//! The pass is quadratic in the number of declared types. It runs once per
//! link over method-signature comparisons only, which keeps it well under
//! translation cost for realistic programs.

use std::collections::BTreeSet;

use skiff_types::{error_interface, satisfies, TypeDef};

/// The runtime expression naming a declared type.
fn runtime_ref(def: &TypeDef) -> String {
    format!("$packages[\"{}\"].{}", def.pkg, def.name)
}

/// Computes the dispatch-table assignments for every interface in `defs`.
///
/// Interfaces with an empty method set are satisfied by everything and get
/// no table; the runtime treats a missing table as "always satisfied". The
/// built-in error-like interface is analyzed alongside the declared ones and
/// binds to the fixed `$error` global. Implementer lists are deduplicated
/// and sorted, and interfaces are processed in sorted order, so the emitted
/// text is deterministic for a given set of declarations.
pub fn dispatch_tables(defs: &[TypeDef]) -> Vec<String> {
    let mut interfaces: Vec<(String, &TypeDef)> = defs
        .iter()
        .filter(|d| d.is_interface() && !d.methods.is_empty())
        .map(|d| (format!("{}.implementedBy", runtime_ref(d)), d))
        .collect();
    interfaces.sort_by(|(a, _), (b, _)| a.cmp(b));

    let error_iface = error_interface();
    interfaces.insert(0, ("$error.implementedBy".to_string(), &error_iface));

    let mut lines = Vec::with_capacity(interfaces.len());
    for (target, iface) in interfaces {
        let implementers: BTreeSet<String> = defs
            .iter()
            .filter(|d| satisfies(d, iface))
            .map(runtime_ref)
            .collect();
        let list: Vec<String> = implementers.into_iter().collect();
        lines.push(format!("{} = [{}];", target, list.join(", ")));
    }
    lines
}
