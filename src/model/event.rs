//! Scheduled scenario events.
//!
//! An event's effect is data, not a closure: scenarios stay serializable
//! and each effect can be applied and tested on its own. Effects reach the
//! scenario only through its narrow mutators.

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::model::{Environment, Interaction, Scenario};

/// Mutation applied to a scenario when an event fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EventEffect {
    /// Set a species' growth rate.
    SetGrowthRate {
        /// Target species.
        species: String,
        /// New growth rate.
        value: f64,
    },
    /// Set or clear a species' carrying capacity.
    SetCarryingCapacity {
        /// Target species.
        species: String,
        /// New capacity, or `None` to remove it.
        value: Option<f64>,
    },
    /// Overwrite a species' standing biomass.
    SetBiomass {
        /// Target species.
        species: String,
        /// New biomass.
        value: f64,
    },
    /// Multiply a species' standing biomass (e.g. a cull of 0.5).
    ScaleBiomass {
        /// Target species.
        species: String,
        /// Multiplier.
        factor: f64,
    },
    /// Change the attack rate of an existing interaction.
    SetConsumptionRate {
        /// Predator species.
        predator: String,
        /// Prey species.
        prey: String,
        /// New attack-rate coefficient.
        value: f64,
    },
    /// Add a predator-prey interaction.
    AddInteraction(Interaction),
    /// Remove every interaction between a predator and a prey.
    RemoveInteraction {
        /// Predator species.
        predator: String,
        /// Prey species.
        prey: String,
    },
    /// Replace the environment.
    SetEnvironment(Environment),
}

impl EventEffect {
    /// Apply the effect to the scenario at simulation time `time`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSpecies` or `ScenarioValidation` if the effect
    /// targets a missing species or would leave the scenario invalid.
    pub fn apply(&self, scenario: &mut Scenario, _time: f64) -> SimResult<()> {
        match self {
            Self::SetGrowthRate { species, value } => scenario.set_growth_rate(species, *value),
            Self::SetCarryingCapacity { species, value } => {
                scenario.set_carrying_capacity(species, *value)
            }
            Self::SetBiomass { species, value } => scenario.set_biomass(species, *value),
            Self::ScaleBiomass { species, factor } => scenario.scale_biomass(species, *factor),
            Self::SetConsumptionRate {
                predator,
                prey,
                value,
            } => scenario.set_consumption_rate(predator, prey, *value),
            Self::AddInteraction(interaction) => scenario.add_interaction(interaction.clone()),
            Self::RemoveInteraction { predator, prey } => {
                scenario.remove_interaction(predator, prey);
                Ok(())
            }
            Self::SetEnvironment(environment) => {
                scenario.set_environment(environment.clone());
                Ok(())
            }
        }
    }
}

/// An effect scheduled at a simulation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name (for logs).
    pub name: String,
    /// Scheduled simulation time.
    pub time: f64,
    /// Set once the effect has been applied.
    #[serde(default)]
    pub handled: bool,
    /// What the event does.
    pub effect: EventEffect,
}

impl Event {
    /// Create an unhandled event.
    #[must_use]
    pub fn new(name: impl Into<String>, time: f64, effect: EventEffect) -> Self {
        Self {
            name: name.into(),
            time,
            handled: false,
            effect,
        }
    }
}
