//! CLI argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "biomass-sim", version, about = "Multi-species biomass dynamics under predation")]
pub struct Args {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run a scenario file.
    Run {
        /// Path to the scenario YAML file.
        scenario: PathBuf,
        /// Optional run configuration YAML file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Write output to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a scenario file without running it.
    Validate {
        /// Path to the scenario YAML file.
        scenario: PathBuf,
    },
    /// Run a scenario several times and check the outputs are identical.
    Verify {
        /// Path to the scenario YAML file.
        scenario: PathBuf,
        /// Optional run configuration YAML file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of runs.
        #[arg(long, default_value = "3")]
        runs: usize,
    },
    /// Run the built-in Rabbit/Fox scenario.
    Demo {
        /// Output format.
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Write output to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Result rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON of the full results.
    Json,
    /// `species,time,biomass` rows.
    Csv,
}
