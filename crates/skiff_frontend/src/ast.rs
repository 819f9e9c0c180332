//! Parsed representation of one directive file.

use std::path::PathBuf;

use skiff_types::{MethodSig, TypeShape};

/// One directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// `import "path"`.
    Import(String),
    /// `type Name struct` or `type Name value`.
    TypeDecl {
        /// Declared type name.
        name: String,
        /// Underlying shape; never `Interface` (interfaces have their own
        /// directive).
        shape: TypeShape,
    },
    /// `method [*]Recv Name(params) result?` — one method on a declared type.
    Method {
        /// Receiver type name.
        recv: String,
        /// Parsed signature; `ptr_receiver` reflects the `*` prefix.
        sig: MethodSig,
    },
    /// `interface Name Method(params) result?` — one requirement of an
    /// interface, which is declared implicitly by its first mention.
    InterfaceMethod {
        /// Interface name.
        iface: String,
        /// The required method signature.
        sig: MethodSig,
    },
    /// `func name` — a top-level function declaration.
    Func(String),
    /// `emit <raw JavaScript>` — copied into the package body verbatim.
    Emit(String),
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path the file was read from, for diagnostics.
    pub path: PathBuf,
    /// Directives in file order.
    pub items: Vec<Item>,
}
