//! Parsing and validation of `skiff.toml` project configuration files.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading or validating a `skiff.toml`
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),
}

/// The `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Project name.
    pub name: String,
    /// Project version string.
    #[serde(default = "default_version")]
    pub version: String,
    /// Import path of the entry (command) package.
    #[serde(default = "default_entry")]
    pub entry: String,
}

/// The `[paths]` section. Every entry is relative to the project root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Source tree root.
    pub src: String,
    /// Bundle output path.
    pub out: String,
    /// Library archive cache directory.
    pub cache: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            src: "src".to_string(),
            out: "out/bundle.js".to_string(),
            cache: ".skiff-cache".to_string(),
        }
    }
}

/// A fully parsed `skiff.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// The `[project]` section.
    pub project: ProjectSection,
    /// The `[paths]` section.
    #[serde(default)]
    pub paths: PathsSection,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_entry() -> String {
    "main".to_string()
}

/// Loads and validates a `skiff.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join("skiff.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `skiff.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.entry.is_empty() {
        return Err(ConfigError::MissingField("project.entry".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[project]
name = "blinky"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "blinky");
        assert_eq!(config.project.version, "0.1.0");
        assert_eq!(config.project.entry, "main");
        assert_eq!(config.paths.src, "src");
        assert_eq!(config.paths.out, "out/bundle.js");
        assert_eq!(config.paths.cache, ".skiff-cache");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
name = "webapp"
version = "2.3.0"
entry = "cmd/server"

[paths]
src = "packages"
out = "dist/server.js"
cache = ".cache"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "webapp");
        assert_eq!(config.project.version, "2.3.0");
        assert_eq!(config.project.entry, "cmd/server");
        assert_eq!(config.paths.src, "packages");
        assert_eq!(config.paths.out, "dist/server.js");
        assert_eq!(config.paths.cache, ".cache");
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[project]
name = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn empty_entry_errors() {
        let toml = r#"
[project]
name = "app"
entry = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
