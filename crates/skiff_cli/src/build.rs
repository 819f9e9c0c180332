//! `skiff build` — compile the entry package and link the bundle.
//!
//! Orchestrates the full driver pipeline:
//! 1. Find the project root and load `skiff.toml`
//! 2. Resolve the entry package (recursively building its imports)
//! 3. Link the bundle with the embedded prelude, unless already up to date
//! 4. Write the bundle and report

use std::path::Path;

use skiff_build::BuildSession;
use skiff_context::{BuildContext, FsContext};
use skiff_frontend::DirectiveFrontend;

use crate::pipeline::resolve_project_root;
use crate::{config, BuildArgs, GlobalArgs, ReportFormat};

/// The JavaScript runtime prelude embedded in every bundle.
const PRELUDE: &str = include_str!("prelude.js");

/// Runs the `skiff build` command.
///
/// Returns exit code 0 on success, 1 on error.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = config::load_config(&project_dir)?;

    if !global.quiet {
        eprintln!(
            "   Building {} v{}",
            config.project.name, config.project.version
        );
    }

    let entry = args
        .entry
        .clone()
        .unwrap_or_else(|| config.project.entry.clone());
    let out_path = project_dir.join(args.output.as_deref().unwrap_or(&config.paths.out));

    let ctx = FsContext::new(
        project_dir.join(&config.paths.src),
        project_dir.join(&config.paths.cache),
        out_path.clone(),
    );
    let frontend = DirectiveFrontend::new();
    let mut session = BuildSession::new(&ctx, &frontend);

    session.resolve(&entry, &project_dir)?;

    if global.verbose {
        let mut lines: Vec<String> = session
            .packages()
            .map(|pkg| {
                let how = if pkg.loaded_from_cache {
                    "cached"
                } else if pkg.up_to_date {
                    "up to date"
                } else {
                    "translated"
                };
                format!("    {how:>10}  {}", pkg.meta.import_path)
            })
            .collect();
        lines.sort();
        for line in lines {
            eprintln!("{line}");
        }
    }

    let pkg = session
        .package(&entry)
        .ok_or_else(|| format!("entry package \"{entry}\" missing after resolution"))?;

    let mut wrote = None;
    if !pkg.meta.is_command {
        if !global.quiet {
            eprintln!("   Package {entry} is a library; archive cached, no bundle written");
        }
    } else if pkg.up_to_date {
        if !global.quiet {
            eprintln!("   Bundle {} is up to date", out_path.display());
        }
    } else {
        let bundle = skiff_link::link(&session, &entry, PRELUDE)?;
        ctx.write_file(&out_path, &bundle)?;
        wrote = Some(bundle.len());
        if !global.quiet {
            eprintln!("     Wrote {} ({} bytes)", out_path.display(), bundle.len());
        }
    }

    if args.format == ReportFormat::Json {
        println!("{}", json_report(&session, &entry, &out_path, wrote));
    }

    Ok(0)
}

/// Builds the machine-readable report for `--format json`.
fn json_report<F: skiff_build::Frontend>(
    session: &BuildSession<'_, F>,
    entry: &str,
    out_path: &Path,
    wrote: Option<usize>,
) -> serde_json::Value {
    let mut packages: Vec<serde_json::Value> = session
        .packages()
        .map(|pkg| {
            serde_json::json!({
                "import_path": pkg.meta.import_path,
                "command": pkg.meta.is_command,
                "cached": pkg.loaded_from_cache,
                "up_to_date": pkg.up_to_date,
            })
        })
        .collect();
    packages.sort_by_key(|p| p["import_path"].as_str().unwrap_or_default().to_string());

    serde_json::json!({
        "entry": entry,
        "output": out_path.display().to_string(),
        "written_bytes": wrote,
        "packages": packages,
    })
}
