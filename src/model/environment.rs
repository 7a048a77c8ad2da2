//! Environmental forcing values.
//!
//! These fields are carried with a scenario and can be changed by events,
//! but nothing in the growth or predation model reads them. Forcing
//! components that consume them are a future extension.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environmental conditions affecting the ecosystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Fishing effort per species (fraction of population).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fishing_effort: BTreeMap<String, f64>,
    /// Fraction of habitat lost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitat_loss: Option<f64>,
    /// Dimensionless climate change impact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate_change_impact: Option<f64>,
    /// Temperature (°C).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Precipitation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    /// Pollutant levels by pollutant name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pollution_levels: BTreeMap<String, f64>,
}

impl Environment {
    /// Environment with only a temperature set.
    #[must_use]
    pub fn with_temperature(temperature: f64) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }
}
