mod report;
mod validation;

use std::path::PathBuf;

use clap::Parser;
use genstrings::{Config, RunMode};
use tracing::debug;

use crate::report::{render_human, render_json};
use crate::validation::{validate_config_path, validate_project_dir};

/// Extract localized strings from source and reconcile the `.strings` catalogs.
///
/// With no arguments, runs in the current directory using `genstrings.toml`
/// if present and the built-in project layout otherwise.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to use instead of looking for genstrings.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project directory that default paths are resolved against
    #[arg(short = 'C', long, default_value = ".")]
    project_dir: PathBuf,

    /// Compute and report changes without writing any file
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Fail if the master catalog is out of date; writes nothing
    #[arg(long)]
    check: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn mode(&self) -> RunMode {
        if self.check {
            RunMode::Check
        } else if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Write
        }
    }

    fn load_config(&self) -> Result<Config, String> {
        match &self.config {
            Some(path) => {
                validate_config_path(path)?;
                Config::load(path).map_err(|e| e.to_string())
            }
            None => {
                validate_project_dir(&self.project_dir)?;
                Config::discover(&self.project_dir).map_err(|e| e.to_string())
            }
        }
    }
}

fn init_tracing(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match args.verbose {
        0 if args.quiet => EnvFilter::new("error"),
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(args.verbose >= 2),
        )
        .init();
}

fn run(args: &Args) -> Result<(), String> {
    let config = args.load_config()?;
    debug!(?config, "configuration loaded");
    let report = genstrings::run(&config, args.mode()).map_err(|e| e.to_string())?;

    if args.json {
        println!("{}", render_json(&report)?);
    } else if !args.quiet {
        println!("{}", render_human(&report));
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
