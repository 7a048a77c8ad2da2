//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;

use super::args::{Args, Command, OutputFormat};
use super::output::{emit, print_summary, render};
use crate::config::SimConfig;
use crate::engine::Simulation;
use crate::error::{SimError, SimResult};
use crate::model::{Scenario, SimulationResults};
use crate::scenarios::predator_prey;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match execute(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Execute a command.
///
/// # Errors
///
/// Returns the first error raised while loading, running or writing.
pub fn execute(command: Command) -> SimResult<()> {
    match command {
        Command::Run {
            scenario,
            config,
            format,
            output,
        } => {
            let mut scenario = Scenario::load(&scenario)?;
            let config = load_config(config.as_deref())?;
            let results = simulate(&mut scenario, config)?;
            write_results(&results, format, output.as_deref())
        }
        Command::Validate { scenario } => {
            let scenario = Scenario::load(&scenario)?;
            eprintln!(
                "✓ valid: {} species, {} interactions, {} events",
                scenario.species.len(),
                scenario.interactions.len(),
                scenario.events.len()
            );
            Ok(())
        }
        Command::Verify {
            scenario,
            config,
            runs,
        } => {
            let scenario = Scenario::load(&scenario)?;
            let config = load_config(config.as_deref())?;
            verify_reproducibility(&scenario, &config, runs)?;
            eprintln!("✓ {runs} runs produced identical output");
            Ok(())
        }
        Command::Demo { format, output } => {
            let mut scenario = predator_prey();
            let results = simulate(&mut scenario, SimConfig::default())?;
            write_results(&results, format, output.as_deref())
        }
    }
}

/// Load a run configuration, or use the defaults.
///
/// # Errors
///
/// Returns error if the file cannot be read or fails validation.
pub fn load_config(path: Option<&Path>) -> SimResult<SimConfig> {
    path.map_or_else(|| Ok(SimConfig::default()), SimConfig::load)
}

/// Run a scenario with a configuration.
///
/// # Errors
///
/// Returns error if the run aborts.
pub fn simulate(scenario: &mut Scenario, config: SimConfig) -> SimResult<SimulationResults> {
    Simulation::new(config)?.run(scenario)
}

/// Run independent copies of a scenario and compare the outputs bit for bit.
///
/// NaN biomass (possible with the Jidoka guard disabled) matches itself.
///
/// # Errors
///
/// Returns error if a run aborts, and `NonReproducible` if two runs differ.
pub fn verify_reproducibility(
    scenario: &Scenario,
    config: &SimConfig,
    runs: usize,
) -> SimResult<SimulationResults> {
    if runs == 0 {
        return Err(SimError::config("verify needs at least one run"));
    }

    let reference = simulate(&mut scenario.clone(), config.clone())?;
    for run in 1..runs {
        let results = simulate(&mut scenario.clone(), config.clone())?;
        if let Some(location) = reference.first_difference(&results) {
            return Err(SimError::NonReproducible { run, location });
        }
    }
    Ok(reference)
}

fn write_results(
    results: &SimulationResults,
    format: OutputFormat,
    output: Option<&Path>,
) -> SimResult<()> {
    print_summary(results);
    emit(&render(results, format)?, output)
}
