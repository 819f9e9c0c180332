//! `skiff init` — project scaffolding command.
//!
//! Creates a new skiff project directory with a `skiff.toml`, a `src/main`
//! command package, and the cache/output directory layout implied by the
//! default configuration.

use std::fs;
use std::path::PathBuf;

/// Runs the `skiff init` command.
///
/// If `name` is `Some`, creates a new subdirectory with that name.
/// Otherwise initializes in the current working directory.
/// Returns exit code 0 on success.
pub fn run(name: Option<String>) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = match &name {
        Some(n) => {
            let dir = PathBuf::from(n);
            if dir.exists() {
                return Err(format!("directory '{n}' already exists").into());
            }
            fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };

    let project_name = project_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("my_project");

    eprintln!("  Creating new skiff project `{project_name}`");

    let main_dir = project_dir.join("src").join("main");
    fs::create_dir_all(&main_dir)?;

    let config = format!(
        r#"[project]
name = "{project_name}"
version = "0.1.0"
entry = "main"

[paths]
src = "src"
out = "out/{project_name}.js"
cache = ".skiff-cache"
"#
    );
    fs::write(project_dir.join("skiff.toml"), config)?;

    let main_src = format!(
        "func main\nemit console.log(\"hello from {project_name}\");\n"
    );
    fs::write(main_dir.join("main.sk"), main_src)?;

    eprintln!("     Created {}", project_dir.join("skiff.toml").display());
    eprintln!("     Created {}", main_dir.join("main.sk").display());

    Ok(0)
}
