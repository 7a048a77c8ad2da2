//! Jidoka (自働化) - stop-on-error for population state.
//!
//! Runs after every tick. A non-finite biomass stops the run immediately
//! instead of propagating NaN through every coupled species.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::model::Species;

/// Jidoka guard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JidokaConfig {
    /// NaN/Inf detection enabled.
    ///
    /// When disabled, non-finite biomass reaches the results. CSV output
    /// writes it as `NaN`/`inf`; JSON output refuses it, since serde_json
    /// would write `null` and the file could not be read back.
    #[serde(default = "default_true")]
    pub check_finite: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for JidokaConfig {
    fn default() -> Self {
        Self { check_finite: true }
    }
}

/// Guard for population anomalies.
///
/// # Example
///
/// ```rust
/// use biomass_sim::engine::jidoka::{JidokaConfig, JidokaGuard};
/// use biomass_sim::model::Species;
///
/// let mut guard = JidokaGuard::new(JidokaConfig::default());
/// assert!(guard.check(&[Species::new("Rabbit", 10.0, 0.8)]).is_ok());
/// assert!(guard.check(&[Species::new("Rabbit", f64::NAN, 0.8)]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct JidokaGuard {
    config: JidokaConfig,
    warned: bool,
}

impl JidokaGuard {
    /// Create a guard.
    #[must_use]
    pub const fn new(config: JidokaConfig) -> Self {
        Self {
            config,
            warned: false,
        }
    }

    /// Check every species' biomass.
    ///
    /// With `check_finite` disabled a non-finite value is logged once and
    /// the run continues.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteValue` naming the first offending species.
    pub fn check(&mut self, species: &[Species]) -> SimResult<()> {
        let Some(bad) = species.iter().find(|s| !s.biomass.is_finite()) else {
            return Ok(());
        };

        let location = format!("biomass[{}]", bad.name);
        if self.config.check_finite {
            return Err(SimError::NonFiniteValue { location });
        }
        if !self.warned {
            tracing::warn!(%location, value = bad.biomass, "non-finite biomass, guard disabled");
            self.warned = true;
        }
        Ok(())
    }

    /// Get current configuration.
    #[must_use]
    pub const fn config(&self) -> &JidokaConfig {
        &self.config
    }
}
