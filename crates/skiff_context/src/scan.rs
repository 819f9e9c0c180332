//! Light directive scan used to fill package metadata without full parsing.
//!
//! The build context needs a package's import list and command flag before
//! the frontend ever parses it. A line scan for `import "..."` and
//! `func main` directives is enough; anything malformed is left for the real
//! parser to report later.

/// Result of scanning one source file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Import paths declared in the file, in order of appearance.
    pub imports: Vec<String>,
    /// Whether the file declares a top-level `main` function.
    pub has_main: bool,
}

/// Scans source bytes for import declarations and a `main` entry point.
///
/// Non-UTF-8 content yields an empty result; the frontend will reject the
/// file properly during parsing.
pub fn scan_source(bytes: &[u8]) -> ScanResult {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return ScanResult::default();
    };

    let mut result = ScanResult::default();
    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("import ") {
            if let Some(path) = unquote(rest.trim()) {
                result.imports.push(path.to_string());
            }
        } else if line == "func main" {
            result.has_main = true;
        }
    }
    result
}

/// Strips a matched pair of double quotes, returning the interior.
fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('"')?.strip_suffix('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_imports_in_order() {
        let src = b"import \"lib/a\"\nemit x\nimport \"lib/b\"\n";
        let r = scan_source(src);
        assert_eq!(r.imports, vec!["lib/a", "lib/b"]);
        assert!(!r.has_main);
    }

    #[test]
    fn detects_main() {
        let r = scan_source(b"func main\nemit console.log(1);\n");
        assert!(r.has_main);
        assert!(r.imports.is_empty());
    }

    #[test]
    fn ignores_malformed_import() {
        // Missing closing quote: left for the parser to report.
        let r = scan_source(b"import \"lib/a\n");
        assert!(r.imports.is_empty());
    }

    #[test]
    fn ignores_indented_directives() {
        let r = scan_source(b"  import \"lib/a\"\n\tfunc main\n");
        assert_eq!(r.imports, vec!["lib/a"]);
        assert!(r.has_main);
    }

    #[test]
    fn non_utf8_is_empty() {
        let r = scan_source(&[0xff, 0xfe, 0x00]);
        assert_eq!(r, ScanResult::default());
    }
}
