//! The structural type model: references, method signatures, shapes, and
//! the interface-satisfaction check.

use serde::{Deserialize, Serialize};

/// A reference to a type, as it appears in a method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    /// A built-in type such as `int` or `string`.
    Builtin(String),
    /// A named type declared in some package.
    Named {
        /// Import path of the owning package.
        pkg: String,
        /// Declared name within that package.
        name: String,
    },
}

impl TypeRef {
    /// A built-in type reference.
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::Builtin(name.into())
    }

    /// A package-qualified named type reference.
    pub fn named(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            pkg: pkg.into(),
            name: name.into(),
        }
    }
}

/// One method in a type's method set or an interface's requirement list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    /// Method name.
    pub name: String,
    /// Whether the method is declared on a by-reference receiver.
    /// Meaningless for interface requirements.
    pub ptr_receiver: bool,
    /// Parameter types in order.
    pub params: Vec<TypeRef>,
    /// Result types in order.
    pub results: Vec<TypeRef>,
}

impl MethodSig {
    /// Structural signature equality: name, parameters and results.
    /// The receiver flag is a property of the declaration, not the signature.
    pub fn matches(&self, other: &MethodSig) -> bool {
        self.name == other.name && self.params == other.params && self.results == other.results
    }
}

/// The underlying shape of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeShape {
    /// A non-struct value type (numeric, string, slice wrapper, ...).
    Value,
    /// A record/struct type.
    Struct,
    /// An interface type; `methods` holds its requirements.
    Interface,
}

/// One declared type: name, owning package, underlying shape, methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Import path of the declaring package; empty for built-ins.
    pub pkg: String,
    /// Declared name.
    pub name: String,
    /// Underlying shape.
    pub shape: TypeShape,
    /// Declared methods (requirements, for interfaces).
    pub methods: Vec<MethodSig>,
}

impl TypeDef {
    /// Whether this is an interface type.
    pub fn is_interface(&self) -> bool {
        self.shape == TypeShape::Interface
    }

    /// The method set used for satisfaction checks.
    ///
    /// Struct-underlying types are compared as a pointer to the struct, so
    /// their full method set counts (by-reference receiver promotion). Value
    /// types are compared directly and contribute only by-value methods.
    pub fn method_set(&self) -> impl Iterator<Item = &MethodSig> {
        let promote = self.shape != TypeShape::Value;
        self.methods
            .iter()
            .filter(move |m| promote || !m.ptr_receiver)
    }
}

/// Whether the concrete type `def` structurally satisfies an interface.
///
/// Interfaces never satisfy (only concrete types count as implementers);
/// empty-method-set interfaces are everyone's interface and are filtered
/// out by the analyzer before this is called.
pub fn satisfies(def: &TypeDef, iface: &TypeDef) -> bool {
    if def.is_interface() {
        return false;
    }
    iface
        .methods
        .iter()
        .all(|req| def.method_set().any(|m| m.matches(req)))
}

/// The synthetic built-in error-like interface: `Error() string`.
///
/// It participates in the analyzer alongside every declared type, but binds
/// to a fixed global rather than a package-qualified name.
pub fn error_interface() -> TypeDef {
    TypeDef {
        pkg: String::new(),
        name: "error".to_string(),
        shape: TypeShape::Interface,
        methods: vec![MethodSig {
            name: "Error".to_string(),
            ptr_receiver: false,
            params: vec![],
            results: vec![TypeRef::builtin("string")],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, ptr: bool, params: &[TypeRef], results: &[TypeRef]) -> MethodSig {
        MethodSig {
            name: name.to_string(),
            ptr_receiver: ptr,
            params: params.to_vec(),
            results: results.to_vec(),
        }
    }

    fn iface(name: &str, methods: Vec<MethodSig>) -> TypeDef {
        TypeDef {
            pkg: "lib/shapes".to_string(),
            name: name.to_string(),
            shape: TypeShape::Interface,
            methods,
        }
    }

    #[test]
    fn struct_with_matching_method_satisfies() {
        let drawer = iface("Drawer", vec![method("Draw", false, &[], &[])]);
        let square = TypeDef {
            pkg: "lib/shapes".to_string(),
            name: "Square".to_string(),
            shape: TypeShape::Struct,
            methods: vec![method("Draw", true, &[], &[])],
        };
        assert!(satisfies(&square, &drawer));
    }

    #[test]
    fn missing_method_does_not_satisfy() {
        let drawer = iface("Drawer", vec![method("Draw", false, &[], &[])]);
        let blob = TypeDef {
            pkg: "lib/shapes".to_string(),
            name: "Blob".to_string(),
            shape: TypeShape::Struct,
            methods: vec![method("Render", false, &[], &[])],
        };
        assert!(!satisfies(&blob, &drawer));
    }

    #[test]
    fn signature_mismatch_does_not_satisfy() {
        let drawer = iface(
            "Drawer",
            vec![method("Draw", false, &[TypeRef::builtin("int")], &[])],
        );
        let square = TypeDef {
            pkg: "lib/shapes".to_string(),
            name: "Square".to_string(),
            shape: TypeShape::Struct,
            methods: vec![method("Draw", false, &[TypeRef::builtin("string")], &[])],
        };
        assert!(!satisfies(&square, &drawer));
    }

    #[test]
    fn value_type_excludes_pointer_receiver_methods() {
        let drawer = iface("Drawer", vec![method("Draw", false, &[], &[])]);
        // A value type whose only Draw has a by-reference receiver: the
        // value's method set does not include it.
        let handle = TypeDef {
            pkg: "lib/shapes".to_string(),
            name: "Handle".to_string(),
            shape: TypeShape::Value,
            methods: vec![method("Draw", true, &[], &[])],
        };
        assert!(!satisfies(&handle, &drawer));

        // Struct-underlying types are promoted to pointer, so it counts.
        let boxed = TypeDef {
            shape: TypeShape::Struct,
            ..handle.clone()
        };
        assert!(satisfies(&boxed, &drawer));
    }

    #[test]
    fn interface_never_satisfies() {
        let drawer = iface("Drawer", vec![method("Draw", false, &[], &[])]);
        let other = iface("Sketcher", vec![method("Draw", false, &[], &[])]);
        assert!(!satisfies(&other, &drawer));
    }

    #[test]
    fn error_interface_shape() {
        let err = error_interface();
        assert!(err.is_interface());
        assert_eq!(err.pkg, "");
        assert_eq!(err.methods.len(), 1);
        assert_eq!(err.methods[0].name, "Error");
        assert_eq!(err.methods[0].results, vec![TypeRef::builtin("string")]);
    }

    #[test]
    fn named_type_refs_compare_structurally() {
        let a = TypeRef::named("lib/geom", "Point");
        let b = TypeRef::named("lib/geom", "Point");
        let c = TypeRef::named("lib/other", "Point");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
