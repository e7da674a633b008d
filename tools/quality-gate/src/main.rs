use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use quality_gate::config;
use quality_gate::engine;
use quality_gate::files::{self, FileMode};
use quality_gate::invoke::RealCommandRunner;
use quality_gate::reporter;

/// Pre-commit quality gate: runs the configured static-analysis tools
/// against the changed files and fails on any finding.
#[derive(Parser)]
#[command(name = "quality-gate", version)]
struct Cli {
    /// Check every file under the working directory instead of the
    /// version-control diff.
    #[arg(long)]
    all_files: bool,

    /// JSON check list to run instead of the built-in checks.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(all_passed) => process::exit(if all_passed { 0 } else { 1 }),
        Err(error) => {
            eprintln!("error: {error:#}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let checks = match &cli.config {
        Some(path) => config::load_checks(path)
            .with_context(|| format!("loading checks from '{}'", path.display()))?,
        None => config::default_checks(),
    };

    let mode = if cli.all_files {
        FileMode::AllFiles
    } else {
        FileMode::ChangedFiles
    };
    let candidates = files::candidate_files(mode);

    reporter::print_header();
    let result = engine::run_all(
        &checks,
        &candidates,
        &RealCommandRunner,
        reporter::print_report,
    )?;
    reporter::print_summary(&result);

    Ok(result.all_passed)
}
