//! Report command implementation
//!
//! Runs the full report pipeline: discover projects under the configured
//! root, extract (or reuse cached) dependency data, aggregate, render the
//! HTML comparison table into the projects root, and open it with the
//! platform opener.

use anyhow::Result;
use clap::Args;
use indicatif::ProgressBar;
use log::warn;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use depgrid::config::Config;
use depgrid::generator::ReportGenerator;
use depgrid::output::{emoji, OutputConfig};

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Projects root directory (overrides the config file)
    #[arg(short, long, value_name = "DIR", env = "DEPGRID_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "DEPGRID_CONFIG")]
    pub config: Option<PathBuf>,

    /// File name of the generated report, created inside the projects root
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Render only dependencies with conflicting versions
    #[arg(long)]
    pub only_conflicts: bool,

    /// Exclude devDependencies from the report
    #[arg(long)]
    pub no_dev: bool,

    /// Bypass the cache snapshot and re-read every manifest
    #[arg(long)]
    pub no_cache: bool,

    /// Skip installed-version resolution in node_modules
    #[arg(long)]
    pub no_resolve: bool,

    /// Do not open the generated report
    #[arg(long)]
    pub no_open: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the report command
pub fn execute(args: ReportArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(root) = args.root {
        config.projects_root = root;
    }
    if let Some(file) = args.output {
        config.output_file = file;
    }
    if args.only_conflicts {
        config.show_only_conflicts = true;
    }
    if args.no_dev {
        config.include_dev_dependencies = false;
    }
    if args.no_cache {
        config.enable_cache = false;
    }
    if args.no_resolve {
        config.resolve_installed = false;
    }
    if args.no_open {
        config.open_report = false;
    }

    if !args.quiet {
        println!(
            "{} Depgrid dependency report",
            emoji(output, "🔍", "[SCAN]")
        );
        println!("   projects root: {}", config.projects_root.display());
        println!();
    }

    let spinner = (!args.quiet).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("collecting dependency data...");
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    });

    let open_report = config.open_report;
    let result = ReportGenerator::new(config).generate();
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let outcome = result?;

    if !args.quiet {
        println!(
            "{} Report written to {}",
            emoji(output, "✅", "[OK]"),
            outcome.report_path.display()
        );
        println!(
            "   {} project(s), {} dependencies, {} conflicting",
            outcome.project_count, outcome.dependency_count, outcome.conflict_count
        );
        if outcome.served_from_cache {
            println!("   (served from cache snapshot)");
        }
        println!("   completed in {:.2}s", start_time.elapsed().as_secs_f64());
    }

    if open_report {
        // A missing or failing opener downgrades to a warning; the report
        // itself is already on disk.
        if let Err(e) = open_with_platform_opener(&outcome.report_path) {
            warn!(
                "could not open {}: {}",
                outcome.report_path.display(),
                e
            );
        }
    }

    Ok(())
}

/// Open a file with the host environment's default opener.
fn open_with_platform_opener(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let status = Command::new("open").arg(path).status()?;

    #[cfg(target_os = "windows")]
    let status = Command::new("cmd").args(["/C", "start", ""]).arg(path).status()?;

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let status = Command::new("xdg-open").arg(path).status()?;

    if !status.success() {
        return Err(std::io::Error::other(format!(
            "opener exited with {}",
            status
        )));
    }
    Ok(())
}
