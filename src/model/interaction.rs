//! Predator-prey interactions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SimError, SimResult};

/// Functional response curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionalResponseKind {
    /// Linear, unbounded: `a·P·Q`.
    TypeI,
    /// Saturating: `a·P·Q / (1 + a·h·Q)`.
    #[default]
    TypeII,
    /// Sigmoidal: `a·P·Q² / (1 + a·h·Q²)`.
    TypeIII,
}

impl FunctionalResponseKind {
    /// Label used in scenario files.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TypeI => "Type I",
            Self::TypeII => "Type II",
            Self::TypeIII => "Type III",
        }
    }
}

impl fmt::Display for FunctionalResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FunctionalResponseKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Type I" => Ok(Self::TypeI),
            "Type II" => Ok(Self::TypeII),
            "Type III" => Ok(Self::TypeIII),
            other => Err(SimError::UnknownFunctionalResponseKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// A predator-prey interaction.
///
/// The functional response is stored as its label so that scenario files
/// with an unrecognized curve still load; the label is resolved (and
/// rejected) when the scenario is validated or the curve is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Predator species name.
    pub predator: String,
    /// Prey species name.
    pub prey: String,
    /// Attack-rate coefficient `a`.
    pub consumption_rate: f64,
    /// Curve label (`Type I`, `Type II`, `Type III`). Defaults to `Type II`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional_response: Option<String>,
    /// Fraction of consumed biomass converted into predator biomass. Defaults to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_transfer_efficiency: Option<f64>,
    /// Handling time `h`. Defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handling_time: Option<f64>,
}

impl Interaction {
    /// Create a `Type II` interaction with default efficiency and no handling time.
    #[must_use]
    pub fn new(predator: impl Into<String>, prey: impl Into<String>, consumption_rate: f64) -> Self {
        Self {
            predator: predator.into(),
            prey: prey.into(),
            consumption_rate,
            functional_response: None,
            energy_transfer_efficiency: None,
            handling_time: None,
        }
    }

    /// Set the functional response curve.
    #[must_use]
    pub fn with_response(mut self, kind: FunctionalResponseKind) -> Self {
        self.functional_response = Some(kind.label().to_string());
        self
    }

    /// Set the energy transfer efficiency.
    #[must_use]
    pub const fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.energy_transfer_efficiency = Some(efficiency);
        self
    }

    /// Set the handling time.
    #[must_use]
    pub const fn with_handling_time(mut self, handling_time: f64) -> Self {
        self.handling_time = Some(handling_time);
        self
    }

    /// Resolve the curve label, defaulting to `Type II`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFunctionalResponseKind` for an unrecognized label.
    pub fn response_kind(&self) -> SimResult<FunctionalResponseKind> {
        self.functional_response
            .as_deref()
            .map_or(Ok(FunctionalResponseKind::default()), str::parse)
    }

    /// Energy transfer efficiency, defaulting to 1.0.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.energy_transfer_efficiency.unwrap_or(1.0)
    }

    /// Handling time, defaulting to 0.
    #[must_use]
    pub fn handling(&self) -> f64 {
        self.handling_time.unwrap_or(0.0)
    }

    /// Key identifying this predator-prey pair in output maps.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}->{}", self.predator, self.prey)
    }

    /// Check the numeric parameters and the curve label.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFunctionalResponseKind` for a bad label, or
    /// `ScenarioValidation` for non-finite or negative coefficients.
    pub fn validate(&self) -> SimResult<()> {
        self.response_kind()?;
        if !self.consumption_rate.is_finite() {
            return Err(SimError::validation(format!(
                "interaction {} has non-finite consumptionRate",
                self.key()
            )));
        }
        let handling = self.handling();
        if !handling.is_finite() || handling < 0.0 {
            return Err(SimError::validation(format!(
                "interaction {} has invalid handlingTime {handling}",
                self.key()
            )));
        }
        let efficiency = self.efficiency();
        if !efficiency.is_finite() || efficiency < 0.0 {
            return Err(SimError::validation(format!(
                "interaction {} has invalid energyTransferEfficiency {efficiency}",
                self.key()
            )));
        }
        Ok(())
    }
}
