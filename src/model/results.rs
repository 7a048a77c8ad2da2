//! Simulation output series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Biomass of one species at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationOutput {
    /// Species name.
    pub species: String,
    /// Tick time.
    pub time: f64,
    /// Biomass after the tick (never negative).
    pub biomass: f64,
}

/// Energy moved along one predator-prey link at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyFlowOutput {
    /// Predator species name.
    pub predator: String,
    /// Prey species name.
    pub prey: String,
    /// Tick time.
    pub time: f64,
    /// Energy transferred during the tick.
    pub energy_transferred: f64,
}

/// Output of a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResults {
    /// Time-ascending biomass series per species.
    pub population_over_time: BTreeMap<String, Vec<PopulationOutput>>,
    /// Energy flow per interaction key. The engine does not populate it.
    #[serde(default)]
    pub energy_flow_over_time: BTreeMap<String, Vec<EnergyFlowOutput>>,
}

impl SimulationResults {
    /// Create empty series for the given species.
    #[must_use]
    pub fn with_species<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let population_over_time = names
            .into_iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        Self {
            population_over_time,
            energy_flow_over_time: BTreeMap::new(),
        }
    }

    /// Append one record to a species' series.
    pub fn record(&mut self, species: &str, time: f64, biomass: f64) {
        self.population_over_time
            .entry(species.to_string())
            .or_default()
            .push(PopulationOutput {
                species: species.to_string(),
                time,
                biomass,
            });
    }

    /// The series recorded for a species.
    #[must_use]
    pub fn series(&self, species: &str) -> Option<&[PopulationOutput]> {
        self.population_over_time.get(species).map(Vec::as_slice)
    }

    /// The last recorded biomass of a species.
    #[must_use]
    pub fn final_biomass(&self, species: &str) -> Option<f64> {
        self.series(species)
            .and_then(<[PopulationOutput]>::last)
            .map(|p| p.biomass)
    }

    /// Number of records for a species (0 if unknown).
    #[must_use]
    pub fn len(&self, species: &str) -> usize {
        self.series(species).map_or(0, <[PopulationOutput]>::len)
    }

    /// True if no species has any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.population_over_time.values().all(Vec::is_empty)
    }

    /// Location of the first non-finite biomass, as `species[index]`.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<String> {
        self.population_over_time.iter().find_map(|(name, series)| {
            series
                .iter()
                .position(|p| !p.biomass.is_finite())
                .map(|i| format!("{name}[{i}]"))
        })
    }

    /// First point where two results differ bit for bit, as `species[index]`.
    ///
    /// Floats are compared by their bits, so identical NaNs match.
    #[must_use]
    pub fn first_difference(&self, other: &Self) -> Option<String> {
        if !self.population_over_time.keys().eq(other.population_over_time.keys()) {
            return Some("species set".to_string());
        }
        for ((name, a), b) in self
            .population_over_time
            .iter()
            .zip(other.population_over_time.values())
        {
            if a.len() != b.len() {
                return Some(format!("{name} length"));
            }
            if let Some(i) = a.iter().zip(b).position(|(x, y)| !same_point(x, y)) {
                return Some(format!("{name}[{i}]"));
            }
        }

        if !self.energy_flow_over_time.keys().eq(other.energy_flow_over_time.keys()) {
            return Some("energy flow keys".to_string());
        }
        for ((key, a), b) in self
            .energy_flow_over_time
            .iter()
            .zip(other.energy_flow_over_time.values())
        {
            let same = a.len() == b.len()
                && a.iter().zip(b).all(|(x, y)| {
                    x.predator == y.predator
                        && x.prey == y.prey
                        && x.time.to_bits() == y.time.to_bits()
                        && x.energy_transferred.to_bits() == y.energy_transferred.to_bits()
                });
            if !same {
                return Some(format!("energy flow {key}"));
            }
        }
        None
    }

    /// Render every record as `species,time,biomass` CSV rows.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("species,time,biomass\n");
        for series in self.population_over_time.values() {
            for p in series {
                let _ = writeln!(out, "{},{},{}", p.species, p.time, p.biomass);
            }
        }
        out
    }
}

fn same_point(a: &PopulationOutput, b: &PopulationOutput) -> bool {
    a.species == b.species
        && a.time.to_bits() == b.time.to_bits()
        && a.biomass.to_bits() == b.biomass.to_bits()
}
