//! Species definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{SimError, SimResult};

/// A species in the ecosystem.
///
/// `biomass` is the live state variable: the engine overwrites it in place
/// after every tick, so a scenario that has been run holds the final values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    /// Unique species name.
    pub name: String,
    /// Standing biomass (kg or tons).
    pub biomass: f64,
    /// Growth rate (year⁻¹).
    pub growth_rate: f64,
    /// Population ceiling that attenuates growth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrying_capacity: Option<f64>,
    /// Consumption rate (kg/year). Not used by the growth model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption_rate: Option<f64>,
    /// Production/biomass ratio (year⁻¹). Not used by the growth model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_biomass_ratio: Option<f64>,
    /// Per-resource consumption. Not used by the growth model.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource_consumption: BTreeMap<String, f64>,
}

impl Species {
    /// Create a species with no carrying capacity.
    #[must_use]
    pub fn new(name: impl Into<String>, biomass: f64, growth_rate: f64) -> Self {
        Self {
            name: name.into(),
            biomass,
            growth_rate,
            carrying_capacity: None,
            consumption_rate: None,
            production_biomass_ratio: None,
            resource_consumption: BTreeMap::new(),
        }
    }

    /// Set the carrying capacity.
    #[must_use]
    pub const fn with_carrying_capacity(mut self, capacity: f64) -> Self {
        self.carrying_capacity = Some(capacity);
        self
    }

    /// Check the numeric parameters the growth model reads.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioValidation` if biomass is negative or non-finite,
    /// the growth rate is non-finite, or the carrying capacity is not a
    /// positive finite number.
    pub fn validate(&self) -> SimResult<()> {
        if self.name.is_empty() {
            return Err(SimError::validation("species name must not be empty"));
        }
        if !self.biomass.is_finite() || self.biomass < 0.0 {
            return Err(SimError::validation(format!(
                "species '{}' has invalid biomass {}",
                self.name, self.biomass
            )));
        }
        if !self.growth_rate.is_finite() {
            return Err(SimError::validation(format!(
                "species '{}' has non-finite growthRate",
                self.name
            )));
        }
        if let Some(k) = self.carrying_capacity {
            if !k.is_finite() || k <= 0.0 {
                return Err(SimError::validation(format!(
                    "species '{}' has invalid carryingCapacity {k}",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
