//! Run configuration with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Field validation via `validator`
//! - Runtime semantic validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::derivative::{GainBinding, GrowthTerm};
use crate::engine::jidoka::JidokaConfig;
use crate::engine::scheduler::{FiringPolicy, EVENT_TIME_TOLERANCE};
use crate::error::{SimError, SimResult};

/// Top-level run configuration.
///
/// The scenario says *what* is simulated; this says *how* the engine runs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Event firing settings.
    #[validate(nested)]
    #[serde(default)]
    pub events: EventConfig,

    /// Derivative model options.
    #[serde(default)]
    pub model: ModelConfig,

    /// Jidoka (stop-on-error) configuration.
    #[serde(default)]
    pub jidoka: JidokaConfig,

    /// Output settings.
    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl SimConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::default()
    }

    /// Run field and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns error if any constraint is violated.
    pub fn check(&self) -> SimResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SimResult<()> {
        let tol = self.events.tolerance;
        if !tol.is_finite() || tol <= 0.0 {
            return Err(SimError::config(format!(
                "Event tolerance must be positive, got {tol}"
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            events: EventConfig::default(),
            model: ModelConfig::default(),
            jidoka: JidokaConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SimConfigBuilder {
    firing: Option<FiringPolicy>,
    tolerance: Option<f64>,
    growth: Option<GrowthTerm>,
    gain_binding: Option<GainBinding>,
    jidoka: Option<JidokaConfig>,
    record_every: Option<u64>,
}

impl SimConfigBuilder {
    /// Set the event firing policy.
    #[must_use]
    pub const fn firing(mut self, policy: FiringPolicy) -> Self {
        self.firing = Some(policy);
        self
    }

    /// Set the event time tolerance.
    #[must_use]
    pub const fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the growth term form.
    #[must_use]
    pub const fn growth(mut self, growth: GrowthTerm) -> Self {
        self.growth = Some(growth);
        self
    }

    /// Set the predation-gain biomass binding.
    #[must_use]
    pub const fn gain_binding(mut self, binding: GainBinding) -> Self {
        self.gain_binding = Some(binding);
        self
    }

    /// Set Jidoka configuration.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn jidoka(mut self, config: JidokaConfig) -> Self {
        self.jidoka = Some(config);
        self
    }

    /// Keep every `n`th tick in the output.
    #[must_use]
    pub const fn record_every(mut self, n: u64) -> Self {
        self.record_every = Some(n);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SimConfig {
        let mut config = SimConfig::default();

        if let Some(firing) = self.firing {
            config.events.firing = firing;
        }
        if let Some(tolerance) = self.tolerance {
            config.events.tolerance = tolerance;
        }
        if let Some(growth) = self.growth {
            config.model.growth = growth;
        }
        if let Some(binding) = self.gain_binding {
            config.model.gain_binding = binding;
        }
        if let Some(jidoka) = self.jidoka {
            config.jidoka = jidoka;
        }
        if let Some(n) = self.record_every {
            config.output.record_every = n;
        }

        config
    }
}

/// Event firing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EventConfig {
    /// Whether a handled event may fire again.
    #[serde(default)]
    pub firing: FiringPolicy,
    /// Maximum distance between tick time and event time.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

const fn default_tolerance() -> f64 {
    EVENT_TIME_TOLERANCE
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            firing: FiringPolicy::default(),
            tolerance: EVENT_TIME_TOLERANCE,
        }
    }
}

/// Derivative model options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Growth term form.
    #[serde(default)]
    pub growth: GrowthTerm,
    /// Which snapshot entry feeds the predation-gain curve.
    #[serde(default)]
    pub gain_binding: GainBinding,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    /// Keep every `n`th tick (1 keeps all).
    #[validate(range(min = 1))]
    #[serde(default = "default_record_every")]
    pub record_every: u64,
}

const fn default_record_every() -> u64 {
    1
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            record_every: default_record_every(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.events.firing, FiringPolicy::Once);
        assert!((config.events.tolerance - 1e-6).abs() < f64::EPSILON);
        assert_eq!(config.model.growth, GrowthTerm::Additive);
        assert_eq!(config.model.gain_binding, GainBinding::PredatorSnapshot);
        assert!(config.jidoka.check_finite);
        assert_eq!(config.output.record_every, 1);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SimConfig::builder()
            .firing(FiringPolicy::WithinTolerance)
            .tolerance(1e-3)
            .growth(GrowthTerm::Logistic)
            .gain_binding(GainBinding::PreySnapshot)
            .record_every(10)
            .jidoka(JidokaConfig {
                check_finite: false,
            })
            .build();

        assert_eq!(config.events.firing, FiringPolicy::WithinTolerance);
        assert!((config.events.tolerance - 1e-3).abs() < f64::EPSILON);
        assert_eq!(config.model.growth, GrowthTerm::Logistic);
        assert_eq!(config.model.gain_binding, GainBinding::PreySnapshot);
        assert_eq!(config.output.record_every, 10);
        assert!(!config.jidoka.check_finite);
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
events:
  firing: within-tolerance
  tolerance: 0.0001
model:
  growth: logistic
  gain_binding: prey-snapshot
output:
  record_every: 5
";
        let config = SimConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.events.firing, FiringPolicy::WithinTolerance);
        assert_eq!(config.model.growth, GrowthTerm::Logistic);
        assert_eq!(config.model.gain_binding, GainBinding::PreySnapshot);
        assert_eq!(config.output.record_every, 5);
    }

    #[test]
    fn test_config_yaml_empty_uses_defaults() {
        let config = SimConfig::from_yaml("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let yaml = r"
reproducibility:
  seed: 42
";
        assert!(matches!(
            SimConfig::from_yaml(yaml),
            Err(SimError::YamlParse(_))
        ));
    }

    #[test]
    fn test_config_validation_fails_zero_record_every() {
        let yaml = r"
output:
  record_every: 0
";
        assert!(matches!(
            SimConfig::from_yaml(yaml),
            Err(SimError::Validation(_))
        ));
    }

    #[test]
    fn test_config_validation_fails_zero_tolerance() {
        let config = SimConfig::builder().tolerance(0.0).build();
        assert!(matches!(config.check(), Err(SimError::Config { .. })));
    }

    #[test]
    fn test_config_validation_fails_large_tolerance() {
        let config = SimConfig::builder().tolerance(2.0).build();
        assert!(config.check().is_err());
    }
}
