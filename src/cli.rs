//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use depgrid::output::OutputConfig;

/// Depgrid - Compare npm dependency versions across related projects
#[derive(Parser, Debug)]
#[command(name = "depgrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the HTML dependency comparison report
    Report(commands::report::ReportArgs),

    /// Inspect or delete the report cache snapshot
    Cache(commands::cache::CacheArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Report(args) => commands::report::execute(args, &output),
            Commands::Cache(args) => commands::cache::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let filter = level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);
    // RUST_LOG still wins when set, matching env_logger conventions
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter.as_str()),
    )
    .try_init();
}
