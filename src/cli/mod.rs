//! CLI module for biomass-sim.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, OutputFormat};
pub use commands::{execute, load_config, run_cli, simulate, verify_reproducibility};
pub use output::{emit, print_summary, render};
