//! # Cache Command Implementation
//!
//! This module implements the `cache` subcommand, which provides
//! functionality for inspecting and deleting the report cache snapshot.
//!
//! ## Subcommands
//!
//! - **`status`**: Show the snapshot's location, age, project count, and
//!   whether it would still be served for the current project map.
//! - **`clean`**: Delete the snapshot file (`--yes` skips the confirmation
//!   prompt).

use anyhow::Result;
use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use depgrid::cache::{ReportCache, MAX_SNAPSHOT_AGE};
use depgrid::config::Config;
use depgrid::discovery;
use depgrid::output::{emoji, OutputConfig};

/// Inspect or delete the report cache snapshot
#[derive(Args, Debug)]
pub struct CacheArgs {
    /// Projects root directory (overrides the config file)
    #[arg(short, long, value_name = "DIR", env = "DEPGRID_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "DEPGRID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// Show snapshot location, age, and validity
    Status,
    /// Delete the snapshot file
    Clean(CleanArgs),
}

/// Arguments for the cache clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Skip confirmation prompt and delete immediately
    #[arg(long)]
    pub yes: bool,
}

/// Execute the `cache` command.
pub fn execute(args: CacheArgs, output: &OutputConfig) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(root) = args.root {
        config.projects_root = root;
    }

    match args.command {
        CacheSubcommand::Status => execute_status(&config, output),
        CacheSubcommand::Clean(clean_args) => execute_clean(&config, clean_args, output),
    }
}

/// Execute the `cache status` command.
fn execute_status(config: &Config, output: &OutputConfig) -> Result<()> {
    let cache = ReportCache::open(config);
    println!("Cache snapshot: {}", cache.path().display());

    let Some(snapshot) = cache.snapshot() else {
        println!("No snapshot found.");
        return Ok(());
    };

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let age_secs = now.saturating_sub(snapshot.timestamp) / 1_000;

    println!("  projects: {}", snapshot.projects.len());
    println!(
        "  age: {}s (expires after {}s)",
        age_secs,
        MAX_SNAPSHOT_AGE.as_secs()
    );

    let projects = discovery::discover(&config.projects_root);
    if cache.is_valid(&projects) {
        println!(
            "  status: {} valid for the current project map",
            emoji(output, "✅", "[OK]")
        );
    } else {
        println!(
            "  status: {} stale; the next report will re-read all manifests",
            emoji(output, "⚠️", "[STALE]")
        );
    }

    Ok(())
}

/// Execute the `cache clean` command.
fn execute_clean(config: &Config, args: CleanArgs, output: &OutputConfig) -> Result<()> {
    let mut cache = ReportCache::open(config);

    if !cache.path().exists() {
        println!("No cache snapshot at {}", cache.path().display());
        return Ok(());
    }

    if !args.yes {
        print!("Delete {}? (y/N): ", cache.path().display());
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input != "y" && input != "yes" {
            println!("Clean cancelled.");
            return Ok(());
        }
    }

    cache.clear()?;
    println!(
        "{} Deleted cache snapshot.",
        emoji(output, "🗑️", "[CLEAN]")
    );

    Ok(())
}
