//! The translator: folds a package's parsed items into emitted code and
//! exported type information.

use std::path::Path;

use skiff_build::{Frontend, ParseError, TranslateError};
use skiff_context::PackageMeta;
use skiff_types::{MethodSig, PackageTypes, TypeDef, TypeRef, TypeShape, TypeTable};

use crate::ast::{Item, SourceFile};
use crate::parser::parse_source;

/// The directive-language frontend.
///
/// Stateless; one instance serves a whole build session.
#[derive(Debug, Default)]
pub struct DirectiveFrontend;

impl DirectiveFrontend {
    /// Creates the frontend.
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for DirectiveFrontend {
    type File = SourceFile;

    fn parse(&self, path: &Path, source: &[u8]) -> Result<SourceFile, Vec<ParseError>> {
        parse_source(path, source)
    }

    fn translate(
        &self,
        meta: &PackageMeta,
        files: &[SourceFile],
        _types: &TypeTable,
    ) -> Result<(Vec<u8>, PackageTypes), TranslateError> {
        let mut tr = Translator {
            pkg: &meta.import_path,
            code: Vec::new(),
            types: Vec::new(),
            funcs: Vec::new(),
        };
        for file in files {
            for item in &file.items {
                tr.item(item)?;
            }
        }
        Ok((
            tr.code,
            PackageTypes {
                import_path: meta.import_path.clone(),
                types: tr.types,
                funcs: tr.funcs,
            },
        ))
    }
}

struct Translator<'a> {
    pkg: &'a str,
    code: Vec<u8>,
    types: Vec<TypeDef>,
    funcs: Vec<String>,
}

impl Translator<'_> {
    fn item(&mut self, item: &Item) -> Result<(), TranslateError> {
        match item {
            // Imports were consumed by the resolver before translation.
            Item::Import(_) => {}

            Item::TypeDecl { name, shape } => {
                if self.find(name).is_some() {
                    return Err(self.err(format!("type {name} declared twice")));
                }
                self.code_line(&format!("// type {name}"));
                self.types.push(TypeDef {
                    pkg: self.pkg.to_string(),
                    name: name.clone(),
                    shape: *shape,
                    methods: Vec::new(),
                });
            }

            Item::Method { recv, sig } => {
                let sig = qualify(sig, self.pkg);
                match self.find(recv) {
                    None => {
                        return Err(self.err(format!("method on undeclared type {recv}")));
                    }
                    Some(i) if self.types[i].shape == TypeShape::Interface => {
                        return Err(
                            self.err(format!("{recv} is an interface, not a method receiver"))
                        );
                    }
                    Some(i) => self.types[i].methods.push(sig),
                }
            }

            Item::InterfaceMethod { iface, sig } => {
                let sig = qualify(sig, self.pkg);
                match self.find(iface) {
                    Some(i) if self.types[i].shape == TypeShape::Interface => {
                        self.types[i].methods.push(sig)
                    }
                    Some(_) => {
                        return Err(self.err(format!("{iface} is already declared as a type")))
                    }
                    None => {
                        self.code_line(&format!("// interface {iface}"));
                        self.types.push(TypeDef {
                            pkg: self.pkg.to_string(),
                            name: iface.clone(),
                            shape: TypeShape::Interface,
                            methods: vec![sig],
                        });
                    }
                }
            }

            Item::Func(name) => {
                if !self.funcs.contains(name) {
                    self.funcs.push(name.clone());
                }
            }

            Item::Emit(js) => self.code_line(js),
        }
        Ok(())
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.types.iter().position(|t| t.name == name)
    }

    fn code_line(&mut self, line: &str) {
        self.code.extend_from_slice(line.as_bytes());
        self.code.push(b'\n');
    }

    fn err(&self, reason: String) -> TranslateError {
        TranslateError {
            import_path: self.pkg.to_string(),
            reason,
        }
    }
}

/// Rewrites current-package type references (empty package marker) to the
/// package being translated.
fn qualify(sig: &MethodSig, pkg: &str) -> MethodSig {
    let fix = |r: &TypeRef| match r {
        TypeRef::Named { pkg: p, name } if p.is_empty() => TypeRef::named(pkg, name.clone()),
        other => other.clone(),
    };
    MethodSig {
        name: sig.name.clone(),
        ptr_receiver: sig.ptr_receiver,
        params: sig.params.iter().map(fix).collect(),
        results: sig.results.iter().map(fix).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn meta(import_path: &str) -> PackageMeta {
        PackageMeta {
            import_path: import_path.to_string(),
            dir: PathBuf::from("/src").join(import_path),
            source_files: vec!["a.sk".to_string()],
            imports: vec![],
            is_command: false,
            artifact_path: None,
        }
    }

    fn translate(import_path: &str, sources: &[&str]) -> (String, PackageTypes) {
        let frontend = DirectiveFrontend::new();
        let files: Vec<SourceFile> = sources
            .iter()
            .enumerate()
            .map(|(i, src)| {
                frontend
                    .parse(Path::new(&format!("{i}.sk")), src.as_bytes())
                    .unwrap()
            })
            .collect();
        let (code, types) = frontend
            .translate(&meta(import_path), &files, &TypeTable::new())
            .unwrap();
        (String::from_utf8(code).unwrap(), types)
    }

    #[test]
    fn translates_a_full_package() {
        let (code, types) = translate(
            "lib/shapes",
            &["type Square struct\n\
               method *Square Draw()\n\
               method Square Area() float\n\
               interface Drawer Draw()\n\
               func init\n\
               emit var area = 0;\n"],
        );
        assert_eq!(
            code,
            "// type Square\n// interface Drawer\nvar area = 0;\n"
        );
        assert_eq!(types.import_path, "lib/shapes");
        assert_eq!(types.funcs, vec!["init"]);
        assert!(types.has_init());

        let square = &types.types[0];
        assert_eq!(square.name, "Square");
        assert_eq!(square.shape, TypeShape::Struct);
        assert_eq!(square.methods.len(), 2);
        assert!(square.methods[0].ptr_receiver);

        let drawer = &types.types[1];
        assert!(drawer.is_interface());
        assert_eq!(drawer.methods.len(), 1);
    }

    #[test]
    fn interface_methods_accumulate_across_files() {
        let (_, types) = translate(
            "lib/io",
            &[
                "interface Stream Read() string\n",
                "interface Stream Close()\n",
            ],
        );
        assert_eq!(types.types.len(), 1);
        assert_eq!(types.types[0].methods.len(), 2);
    }

    #[test]
    fn current_package_refs_are_qualified() {
        let (_, types) = translate(
            "lib/geom",
            &["type Point struct\n\
               method Point Add(Point) Point\n"],
        );
        let add = &types.types[0].methods[0];
        assert_eq!(add.params, vec![TypeRef::named("lib/geom", "Point")]);
        assert_eq!(add.results, vec![TypeRef::named("lib/geom", "Point")]);
    }

    #[test]
    fn method_on_undeclared_type_fails() {
        let frontend = DirectiveFrontend::new();
        let file = frontend
            .parse(Path::new("a.sk"), b"method Ghost Draw()\n")
            .unwrap();
        let err = frontend
            .translate(&meta("lib/x"), &[file], &TypeTable::new())
            .unwrap_err();
        assert!(err.reason.contains("undeclared type Ghost"));
        assert_eq!(err.import_path, "lib/x");
    }

    #[test]
    fn duplicate_type_declaration_fails() {
        let frontend = DirectiveFrontend::new();
        let file = frontend
            .parse(Path::new("a.sk"), b"type A struct\ntype A value\n")
            .unwrap();
        let err = frontend
            .translate(&meta("lib/x"), &[file], &TypeTable::new())
            .unwrap_err();
        assert!(err.reason.contains("declared twice"));
    }

    #[test]
    fn method_on_interface_fails() {
        let frontend = DirectiveFrontend::new();
        let file = frontend
            .parse(
                Path::new("a.sk"),
                b"interface Drawer Draw()\nmethod Drawer Draw()\n",
            )
            .unwrap();
        let err = frontend
            .translate(&meta("lib/x"), &[file], &TypeTable::new())
            .unwrap_err();
        assert!(err.reason.contains("interface"));
    }
}
