//! Per-species population derivative.
//!
//! `dB/dt = growth - predation_loss + predation_gain`, evaluated at an
//! instantaneous biomass `y` against a population snapshot frozen at the
//! start of the tick.
//!
//! All name lookups and curve resolution happen once in
//! [`PopulationDerivative::build`]; [`PopulationDerivative::rate`] is then a
//! pure function of `y` that the integrator can call repeatedly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::response::FunctionalResponse;
use crate::error::{SimError, SimResult};
use crate::model::{Interaction, Species};

/// Form of the growth term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthTerm {
    /// `g·(1 - y/K)`, or `g` without a carrying capacity. Not scaled by `y`.
    #[default]
    Additive,
    /// `g·y·(1 - y/K)`, or `g·y` without a carrying capacity.
    Logistic,
}

/// Which snapshot entry supplies the prey biomass when a species gains
/// biomass as a predator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GainBinding {
    /// The predator's own snapshot biomass (historical behavior).
    #[default]
    PredatorSnapshot,
    /// The prey's snapshot biomass.
    PreySnapshot,
}

/// Biomass of every species, frozen at the start of a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationSnapshot {
    biomass: HashMap<String, f64>,
}

impl PopulationSnapshot {
    /// Capture the current biomass of every species.
    #[must_use]
    pub fn capture(species: &[Species]) -> Self {
        Self {
            biomass: species
                .iter()
                .map(|s| (s.name.clone(), s.biomass))
                .collect(),
        }
    }

    /// Biomass of a species.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSpecies` if the name was not captured.
    pub fn biomass(&self, name: &str) -> SimResult<f64> {
        self.biomass
            .get(name)
            .copied()
            .ok_or_else(|| SimError::unknown_species(name))
    }

    /// Number of species captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.biomass.len()
    }

    /// True if no species was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.biomass.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct PredationTerm {
    response: FunctionalResponse,
    /// Snapshot biomass of the other side of the link.
    partner_biomass: f64,
    efficiency: f64,
}

/// Derivative of one species' biomass, bound to one tick's snapshot.
#[derive(Debug, Clone)]
pub struct PopulationDerivative {
    growth_rate: f64,
    carrying_capacity: Option<f64>,
    growth: GrowthTerm,
    losses: Vec<PredationTerm>,
    gains: Vec<PredationTerm>,
}

impl PopulationDerivative {
    /// Bind a species to the interaction list and a frozen snapshot.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFunctionalResponseKind` for a bad curve label, or
    /// `UnknownSpecies` if an interaction names a species missing from the
    /// snapshot.
    pub fn build(
        species: &Species,
        interactions: &[Interaction],
        snapshot: &PopulationSnapshot,
        growth: GrowthTerm,
        gain_binding: GainBinding,
    ) -> SimResult<Self> {
        let mut losses = Vec::new();
        let mut gains = Vec::new();

        for interaction in interactions.iter().filter(|i| i.prey == species.name) {
            losses.push(PredationTerm {
                response: FunctionalResponse::from_interaction(interaction)?,
                partner_biomass: snapshot.biomass(&interaction.predator)?,
                efficiency: 1.0,
            });
        }

        for interaction in interactions.iter().filter(|i| i.predator == species.name) {
            let partner = match gain_binding {
                GainBinding::PredatorSnapshot => &interaction.predator,
                GainBinding::PreySnapshot => &interaction.prey,
            };
            gains.push(PredationTerm {
                response: FunctionalResponse::from_interaction(interaction)?,
                partner_biomass: snapshot.biomass(partner)?,
                efficiency: interaction.efficiency(),
            });
        }

        Ok(Self {
            growth_rate: species.growth_rate,
            carrying_capacity: species.carrying_capacity,
            growth,
            losses,
            gains,
        })
    }

    /// Growth contribution at biomass `y`.
    #[must_use]
    pub fn growth(&self, y: f64) -> f64 {
        let mut growth = self.growth_rate;
        if let Some(k) = self.carrying_capacity {
            growth *= 1.0 - y / k;
        }
        match self.growth {
            GrowthTerm::Additive => growth,
            GrowthTerm::Logistic => growth * y,
        }
    }

    /// Biomass lost to predators at biomass `y` (this species as prey).
    #[must_use]
    pub fn predation_loss(&self, y: f64) -> f64 {
        self.losses
            .iter()
            .map(|term| term.response.consumption(term.partner_biomass, y))
            .sum()
    }

    /// Biomass gained from prey at biomass `y` (this species as predator).
    #[must_use]
    pub fn predation_gain(&self, y: f64) -> f64 {
        self.gains
            .iter()
            .map(|term| term.response.consumption(y, term.partner_biomass) * term.efficiency)
            .sum()
    }

    /// Net rate of change `dB/dt` at biomass `y`.
    #[must_use]
    pub fn rate(&self, _t: f64, y: f64) -> f64 {
        self.growth(y) - self.predation_loss(y) + self.predation_gain(y)
    }
}
