//! Skiff CLI — the command-line driver for the skiff-to-JavaScript compiler.
//!
//! Provides `skiff build` for compiling a package tree into a single
//! JavaScript bundle and `skiff init` for project scaffolding.

#![warn(missing_docs)]

mod build;
mod config;
mod init;
mod pipeline;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Skiff — a package-based source-to-JavaScript compiler.
#[derive(Parser, Debug)]
#[command(name = "skiff", version, about = "Skiff compiler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (per-package) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `skiff.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new skiff project.
    Init {
        /// Project name (creates a subdirectory). If omitted, initializes in
        /// the current directory.
        name: Option<String>,
    },
    /// Build the entry package into a bundle.
    Build(BuildArgs),
}

/// Arguments for the `skiff build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Entry package import path (default: `project.entry` from skiff.toml).
    pub entry: Option<String>,

    /// Output format for the build report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Override the bundle output path.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Build report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print per-package information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Init { name } => init::run(name),
        Command::Build(ref args) => build::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_build_default() {
        let cli = Cli::parse_from(["skiff", "build"]);
        match cli.command {
            Command::Build(ref args) => {
                assert!(args.entry.is_none());
                assert_eq!(args.format, ReportFormat::Text);
                assert!(args.output.is_none());
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_with_args() {
        let cli = Cli::parse_from([
            "skiff", "build", "main", "--format", "json", "--output", "dist/app.js",
        ]);
        match cli.command {
            Command::Build(ref args) => {
                assert_eq!(args.entry.as_deref(), Some("main"));
                assert_eq!(args.format, ReportFormat::Json);
                assert_eq!(args.output.as_deref(), Some("dist/app.js"));
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_init_with_name() {
        let cli = Cli::parse_from(["skiff", "init", "my_app"]);
        match cli.command {
            Command::Init { name } => assert_eq!(name.as_deref(), Some("my_app")),
            _ => panic!("expected Init command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["skiff", "--quiet", "build"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);

        let cli = Cli::parse_from(["skiff", "--verbose", "--config", "/p/skiff.toml", "build"]);
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("/p/skiff.toml"));
    }
}
