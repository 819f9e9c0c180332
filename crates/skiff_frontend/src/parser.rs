//! Line-by-line directive parser.
//!
//! Every malformed line becomes one [`ParseError`] carrying the file path
//! and one-based line number; parsing continues so a file reports all of its
//! problems in a single pass.

use std::path::Path;

use skiff_build::ParseError;
use skiff_types::{MethodSig, TypeRef, TypeShape};

use crate::ast::{Item, SourceFile};

/// Parses one directive file.
///
/// Returns every error found in the file; the caller (the build session)
/// accumulates them across the package's files.
pub fn parse_source(path: &Path, source: &[u8]) -> Result<SourceFile, Vec<ParseError>> {
    let Ok(text) = std::str::from_utf8(source) else {
        return Err(vec![ParseError {
            path: path.to_path_buf(),
            line: None,
            message: "source is not valid UTF-8".to_string(),
        }]);
    };

    let mut items = Vec::new();
    let mut errors = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        match parse_line(line) {
            Ok(item) => items.push(item),
            Err(message) => errors.push(ParseError {
                path: path.to_path_buf(),
                line: Some(idx + 1),
                message,
            }),
        }
    }

    if errors.is_empty() {
        Ok(SourceFile {
            path: path.to_path_buf(),
            items,
        })
    } else {
        Err(errors)
    }
}

fn parse_line(line: &str) -> Result<Item, String> {
    if let Some(rest) = line.strip_prefix("import ") {
        let rest = rest.trim();
        let path = rest
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .ok_or_else(|| format!("import path must be quoted: {rest}"))?;
        if path.is_empty() {
            return Err("import path is empty".to_string());
        }
        return Ok(Item::Import(path.to_string()));
    }

    if let Some(rest) = line.strip_prefix("type ") {
        let mut words = rest.split_whitespace();
        let name = words.next().ok_or("type declaration needs a name")?;
        let shape = match words.next() {
            Some("struct") => TypeShape::Struct,
            Some("value") => TypeShape::Value,
            Some(other) => return Err(format!("unknown type shape: {other}")),
            None => return Err(format!("type {name} needs a shape (struct or value)")),
        };
        return Ok(Item::TypeDecl {
            name: name.to_string(),
            shape,
        });
    }

    if let Some(rest) = line.strip_prefix("method ") {
        let rest = rest.trim();
        let (recv, sig_text) = rest
            .split_once(' ')
            .ok_or("method needs a receiver and a signature")?;
        let (recv, ptr) = match recv.strip_prefix('*') {
            Some(name) => (name, true),
            None => (recv, false),
        };
        if recv.is_empty() {
            return Err("method receiver is empty".to_string());
        }
        let mut sig = parse_signature(sig_text.trim())?;
        sig.ptr_receiver = ptr;
        return Ok(Item::Method {
            recv: recv.to_string(),
            sig,
        });
    }

    if let Some(rest) = line.strip_prefix("interface ") {
        let rest = rest.trim();
        let (iface, sig_text) = rest
            .split_once(' ')
            .ok_or("interface needs a name and a method signature")?;
        let sig = parse_signature(sig_text.trim())?;
        return Ok(Item::InterfaceMethod {
            iface: iface.to_string(),
            sig,
        });
    }

    if let Some(rest) = line.strip_prefix("func ") {
        let name = rest.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(format!("malformed function declaration: {line}"));
        }
        return Ok(Item::Func(name.to_string()));
    }

    if let Some(rest) = line.strip_prefix("emit ") {
        return Ok(Item::Emit(rest.to_string()));
    }

    Err(format!("unknown directive: {line}"))
}

/// Parses `Name(p1, p2) result?` into a value-receiver signature.
fn parse_signature(text: &str) -> Result<MethodSig, String> {
    let open = text
        .find('(')
        .ok_or_else(|| format!("signature needs a parameter list: {text}"))?;
    let close = text
        .find(')')
        .filter(|c| *c > open)
        .ok_or_else(|| format!("unclosed parameter list: {text}"))?;

    let name = text[..open].trim();
    if name.is_empty() {
        return Err(format!("signature needs a method name: {text}"));
    }

    let params = parse_type_list(&text[open + 1..close])?;
    let tail = text[close + 1..].trim();
    let results = if tail.is_empty() {
        Vec::new()
    } else if tail.contains(char::is_whitespace) {
        return Err(format!("at most one result type: {text}"));
    } else {
        vec![type_ref(tail)]
    };

    Ok(MethodSig {
        name: name.to_string(),
        ptr_receiver: false,
        params,
        results,
    })
}

fn parse_type_list(text: &str) -> Result<Vec<TypeRef>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|t| {
            let t = t.trim();
            if t.is_empty() {
                Err("empty type in parameter list".to_string())
            } else {
                Ok(type_ref(t))
            }
        })
        .collect()
}

/// Resolves a type token. `pkg.Name` is a qualified named type, a leading
/// uppercase letter names a type in the current package (qualified during
/// translation), anything else is a built-in.
fn type_ref(token: &str) -> TypeRef {
    if let Some((pkg, name)) = token.rsplit_once('.') {
        return TypeRef::named(pkg, name);
    }
    if token.chars().next().is_some_and(|c| c.is_uppercase()) {
        // The owning package is not known until translation; an empty
        // package marks "current package".
        return TypeRef::named("", token);
    }
    TypeRef::Builtin(token.to_string())
}
