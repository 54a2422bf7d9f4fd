//! tokensmith - design token generator
//!
//! Merges layered JSON token documents per brand and theme, resolves
//! aliases, and writes Kotlin, Android XML, and CSS.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tokensmith_cli::{exit_code, init_project, render_summary, run, Config, RunOptions};
use tokensmith_emit::Platform;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tokensmith")]
#[command(about = "Generate Kotlin, Android XML, and CSS from layered design tokens")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate output files
    Generate {
        #[command(flatten)]
        selection: Selection,

        /// Output directory (default: <ROOT>/_TransformedTokens)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Platforms to generate (repeatable; default: all configured)
        #[arg(short, long = "platform", value_parser = parse_platform)]
        platforms: Vec<Platform>,

        /// Remove each combination's previous output first
        #[arg(long)]
        clean: bool,

        /// Exit 0 even when diagnostics were reported
        #[arg(long)]
        lenient: bool,
    },

    /// Resolve and render without writing anything; report diagnostics
    Check {
        #[command(flatten)]
        selection: Selection,
    },

    /// Write a default tokensmith.toml
    Init {
        /// Project root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Overwrite an existing tokensmith.toml
        #[arg(long)]
        force: bool,
    },
}

/// Which combinations to process
#[derive(Args, Debug)]
struct Selection {
    /// Project root (contains tokensmith.toml and the token directory)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Export every brand × theme combination
    #[arg(long)]
    modes: bool,

    /// Brand to export (narrows --modes)
    #[arg(long)]
    brand: Option<String>,

    /// Theme to export (narrows --modes)
    #[arg(long)]
    theme: Option<String>,
}

fn parse_platform(s: &str) -> Result<Platform, String> {
    s.parse()
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tokensmith={level},tokensmith_cli={level},tokensmith_core={level},tokensmith_emit={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(root: &Path, options: RunOptions, lenient: bool) -> Result<u8> {
    let config = Config::load_from_dir(root)?;
    let report = run(root, &config, &options)?;
    print!("{}", render_summary(&report));
    Ok(exit_code(&report, lenient))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Command::Generate {
            selection,
            out,
            platforms,
            clean,
            lenient,
        } => {
            let options = RunOptions {
                modes: selection.modes,
                brand: selection.brand,
                theme: selection.theme,
                out,
                platforms,
                clean,
                dry_run: false,
            };
            execute(&selection.root, options, lenient)
        }
        Command::Check { selection } => {
            let options = RunOptions {
                modes: selection.modes,
                brand: selection.brand,
                theme: selection.theme,
                dry_run: true,
                ..RunOptions::default()
            };
            execute(&selection.root, options, false)
        }
        Command::Init { root, force } => init_project(&root, force).map(|path| {
            info!("Wrote {}", path.display());
            0
        }),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
