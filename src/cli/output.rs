//! CLI output formatting.

use std::path::Path;

use super::args::OutputFormat;
use crate::error::{SimError, SimResult};
use crate::model::SimulationResults;

/// Render results in the requested format.
///
/// JSON has no NaN or infinity, so results holding non-finite biomass
/// (only possible with the Jidoka guard disabled) render as CSV only.
///
/// # Errors
///
/// Returns error if JSON serialization fails or the results hold a
/// non-finite biomass.
pub fn render(results: &SimulationResults, format: OutputFormat) -> SimResult<String> {
    match format {
        OutputFormat::Json => {
            if let Some(location) = results.first_non_finite() {
                return Err(SimError::serialization(format!(
                    "non-finite biomass at {location} cannot be written as JSON, use --format csv"
                )));
            }
            Ok(serde_json::to_string_pretty(results)?)
        }
        OutputFormat::Csv => Ok(results.to_csv()),
    }
}

/// Write rendered output to a file, or to stdout if no path is given.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn emit(text: &str, path: Option<&Path>) -> SimResult<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote results");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Print a one-line summary per species to stderr.
pub fn print_summary(results: &SimulationResults) {
    for (name, series) in &results.population_over_time {
        match series.last() {
            Some(last) => eprintln!(
                "{name:<16} ticks={:<6} final t={:<10.4} biomass={:.6}",
                series.len(),
                last.time,
                last.biomass
            ),
            None => eprintln!("{name:<16} ticks=0"),
        }
    }
}
