//! Shared helpers for CLI commands: project root resolution.

use std::path::{Path, PathBuf};

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing
/// `skiff.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join("skiff.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find skiff.toml in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir →
/// itself). Otherwise walks up from the current directory.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_root_in_parent() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("skiff.toml"), "[project]\nname = \"x\"\n").unwrap();
        let nested = tmp.path().join("src/lib/geom");
        std::fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn missing_root_errors() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_project_root(tmp.path()).is_err());
    }

    #[test]
    fn config_flag_overrides_search() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("skiff.toml");
        std::fs::write(&config, "[project]\nname = \"x\"\n").unwrap();

        let global = GlobalArgs {
            quiet: false,
            verbose: false,
            config: Some(config.to_str().unwrap().to_string()),
        };
        let root = resolve_project_root(&global).unwrap();
        assert_eq!(root, tmp.path());
    }
}
