//! Scenario definition, loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{SimError, SimResult};
use crate::model::{Environment, Event, Interaction, Species};

/// Complete simulation input.
///
/// The engine mutates a scenario in place (species biomass, event flags,
/// and whatever event effects change). Clone it before each run to replay
/// the same input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Species in the ecosystem, in processing order.
    pub species: Vec<Species>,
    /// Predator-prey interactions.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// Environmental conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// Duration of each step.
    pub time_step: f64,
    /// Total simulated time.
    pub duration: f64,
    /// Scheduled events, in firing order for equal times.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
}

impl Scenario {
    /// Create a scenario with no environment and no events.
    #[must_use]
    pub fn new(
        species: Vec<Species>,
        interactions: Vec<Interaction>,
        time_step: f64,
        duration: f64,
    ) -> Self {
        Self {
            species,
            interactions,
            environment: None,
            time_step,
            duration,
            events: Vec::new(),
        }
    }

    /// Attach an environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Append a scheduled event.
    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Load a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let scenario: Self = serde_yaml::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every invariant the engine relies on.
    ///
    /// Runs before the time loop so that a bad scenario fails fast instead
    /// of propagating NaN through the populations.
    ///
    /// # Errors
    ///
    /// - `ScenarioValidation` for duplicate species names, dangling
    ///   interaction references, bad time settings or bad parameters
    /// - `UnknownFunctionalResponseKind` for an unrecognized curve label
    pub fn validate(&self) -> SimResult<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SimError::validation(format!(
                "timeStep must be positive and finite, got {}",
                self.time_step
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SimError::validation(format!(
                "duration must be non-negative and finite, got {}",
                self.duration
            )));
        }

        let mut names = HashSet::with_capacity(self.species.len());
        for species in &self.species {
            species.validate()?;
            if !names.insert(species.name.as_str()) {
                return Err(SimError::validation(format!(
                    "duplicate species name '{}'",
                    species.name
                )));
            }
        }

        for interaction in &self.interactions {
            self.check_references(interaction)?;
            interaction.validate()?;
        }

        for event in &self.events {
            if !event.time.is_finite() {
                return Err(SimError::validation(format!(
                    "event '{}' has non-finite time",
                    event.name
                )));
            }
        }

        Ok(())
    }

    fn check_references(&self, interaction: &Interaction) -> SimResult<()> {
        for name in [&interaction.predator, &interaction.prey] {
            if self.species(name).is_none() {
                return Err(SimError::validation(format!(
                    "interaction {} references unknown species '{name}'",
                    interaction.key()
                )));
            }
        }
        Ok(())
    }

    /// Look up a species by name.
    #[must_use]
    pub fn species(&self, name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.name == name)
    }

    fn species_mut(&mut self, name: &str) -> SimResult<&mut Species> {
        self.species
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| SimError::unknown_species(name))
    }

    /// Names of all species, in processing order.
    pub fn species_names(&self) -> impl Iterator<Item = &str> {
        self.species.iter().map(|s| s.name.as_str())
    }

    // ===== Narrow mutators used by event effects =====

    /// Set a species' growth rate.
    ///
    /// # Errors
    ///
    /// Returns error if the species is unknown or the value is not finite.
    pub fn set_growth_rate(&mut self, name: &str, value: f64) -> SimResult<()> {
        if !value.is_finite() {
            return Err(SimError::validation("growthRate must be finite"));
        }
        self.species_mut(name)?.growth_rate = value;
        Ok(())
    }

    /// Set or clear a species' carrying capacity.
    ///
    /// # Errors
    ///
    /// Returns error if the species is unknown or the capacity is not positive.
    pub fn set_carrying_capacity(&mut self, name: &str, value: Option<f64>) -> SimResult<()> {
        if let Some(k) = value {
            if !k.is_finite() || k <= 0.0 {
                return Err(SimError::validation(format!(
                    "carryingCapacity must be positive, got {k}"
                )));
            }
        }
        self.species_mut(name)?.carrying_capacity = value;
        Ok(())
    }

    /// Overwrite a species' standing biomass.
    ///
    /// # Errors
    ///
    /// Returns error if the species is unknown or the value is negative.
    pub fn set_biomass(&mut self, name: &str, value: f64) -> SimResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(SimError::validation(format!(
                "biomass must be non-negative, got {value}"
            )));
        }
        self.species_mut(name)?.biomass = value;
        Ok(())
    }

    /// Multiply a species' standing biomass.
    ///
    /// # Errors
    ///
    /// Returns error if the species is unknown or the factor is negative.
    pub fn scale_biomass(&mut self, name: &str, factor: f64) -> SimResult<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(SimError::validation(format!(
                "biomass factor must be non-negative, got {factor}"
            )));
        }
        self.species_mut(name)?.biomass *= factor;
        Ok(())
    }

    /// Change the attack rate of every matching interaction.
    ///
    /// # Errors
    ///
    /// Returns error if no interaction matches or the value is not finite.
    pub fn set_consumption_rate(&mut self, predator: &str, prey: &str, value: f64) -> SimResult<()> {
        if !value.is_finite() {
            return Err(SimError::validation("consumptionRate must be finite"));
        }
        let mut found = false;
        for interaction in self
            .interactions
            .iter_mut()
            .filter(|i| i.predator == predator && i.prey == prey)
        {
            interaction.consumption_rate = value;
            found = true;
        }
        if found {
            Ok(())
        } else {
            Err(SimError::validation(format!(
                "no interaction {predator}->{prey}"
            )))
        }
    }

    /// Add an interaction after checking it references existing species.
    ///
    /// # Errors
    ///
    /// Returns error if the interaction is invalid.
    pub fn add_interaction(&mut self, interaction: Interaction) -> SimResult<()> {
        self.check_references(&interaction)?;
        interaction.validate()?;
        self.interactions.push(interaction);
        Ok(())
    }

    /// Remove every interaction between `predator` and `prey`.
    ///
    /// Returns the number of interactions removed.
    pub fn remove_interaction(&mut self, predator: &str, prey: &str) -> usize {
        let before = self.interactions.len();
        self.interactions
            .retain(|i| !(i.predator == predator && i.prey == prey));
        before - self.interactions.len()
    }

    /// Replace the environment.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = Some(environment);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::EventEffect;

    fn two_species() -> Scenario {
        Scenario::new(
            vec![
                Species::new("Rabbit", 500.0, 0.8).with_carrying_capacity(1000.0),
                Species::new("Fox", 50.0, 0.2),
            ],
            vec![Interaction::new("Fox", "Rabbit", 0.01)
                .with_efficiency(0.1)
                .with_handling_time(0.5)],
            0.1,
            20.0,
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(two_species().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_names() {
        let mut s = two_species();
        s.species.push(Species::new("Fox", 1.0, 0.1));
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate species name 'Fox'"));
    }

    #[test]
    fn test_validate_dangling_reference() {
        let mut s = two_species();
        s.interactions.push(Interaction::new("Wolf", "Rabbit", 0.01));
        let err = s.validate().unwrap_err();
        assert!(matches!(err, SimError::ScenarioValidation { .. }));
        assert!(err.to_string().contains("Wolf"));
    }

    #[test]
    fn test_validate_time_step() {
        let mut s = two_species();
        s.time_step = 0.0;
        assert!(s.validate().is_err());
        s.time_step = -0.1;
        assert!(s.validate().is_err());
        s.time_step = f64::NAN;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_duration() {
        let mut s = two_species();
        s.duration = 0.0;
        assert!(s.validate().is_ok());
        s.duration = -1.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_kind() {
        let mut s = two_species();
        s.interactions[0].functional_response = Some("Type IV".to_string());
        assert!(matches!(
            s.validate(),
            Err(SimError::UnknownFunctionalResponseKind { .. })
        ));
    }

    #[test]
    fn test_add_interaction_checks_references() {
        let mut s = two_species();
        assert!(s.add_interaction(Interaction::new("Fox", "Mouse", 0.1)).is_err());
        assert_eq!(s.interactions.len(), 1);
    }

    #[test]
    fn test_remove_interaction_count() {
        let mut s = two_species();
        assert_eq!(s.remove_interaction("Fox", "Rabbit"), 1);
        assert_eq!(s.remove_interaction("Fox", "Rabbit"), 0);
    }

    #[test]
    fn test_set_biomass_rejects_negative() {
        let mut s = two_species();
        assert!(s.set_biomass("Rabbit", -5.0).is_err());
        assert!(s.set_biomass("Rabbit", 5.0).is_ok());
    }

    #[test]
    fn test_unknown_species_mutation() {
        let mut s = two_species();
        assert!(matches!(
            s.set_growth_rate("Wolf", 0.1),
            Err(SimError::UnknownSpecies { .. })
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let s = two_species().with_event(Event::new(
            "drought",
            5.0,
            EventEffect::SetGrowthRate {
                species: "Rabbit".to_string(),
                value: 0.0,
            },
        ));
        let yaml = s.to_yaml().unwrap();
        assert!(yaml.contains("timeStep"));
        let parsed = Scenario::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r"
species:
  - name: Rabbit
    biomass: 500.0
    growthRate: 0.8
    carryingCapacity: 1000.0
  - name: Fox
    biomass: 50.0
    growthRate: 0.2
interactions:
  - predator: Fox
    prey: Rabbit
    consumptionRate: 0.01
    functionalResponse: Type II
    energyTransferEfficiency: 0.1
    handlingTime: 0.5
environment:
  temperature: 15.0
timeStep: 0.1
duration: 20.0
events:
  - name: cull
    time: 5.0
    effect:
      type: scale-biomass
      species: Fox
      factor: 0.5
";
        let s = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(s.species.len(), 2);
        assert_eq!(s.events.len(), 1);
        assert!(!s.events[0].handled);
        assert_eq!(s.species_names().collect::<Vec<_>>(), vec!["Rabbit", "Fox"]);
    }

    #[test]
    fn test_from_yaml_rejects_dangling() {
        let yaml = r"
species:
  - name: Rabbit
    biomass: 500.0
    growthRate: 0.8
interactions:
  - predator: Fox
    prey: Rabbit
    consumptionRate: 0.01
timeStep: 0.1
duration: 1.0
";
        assert!(matches!(
            Scenario::from_yaml(yaml),
            Err(SimError::ScenarioValidation { .. })
        ));
    }
}
