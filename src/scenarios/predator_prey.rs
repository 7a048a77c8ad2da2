//! Two-species predator-prey scenario.

use serde::{Deserialize, Serialize};

use crate::model::{Environment, FunctionalResponseKind, Interaction, Scenario, Species};

/// Configuration for the Rabbit/Fox scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredatorPreyConfig {
    /// Initial prey biomass (kg).
    pub prey_biomass: f64,
    /// Prey growth rate (year⁻¹).
    pub prey_growth: f64,
    /// Prey carrying capacity (kg).
    pub prey_capacity: f64,
    /// Initial predator biomass (kg).
    pub predator_biomass: f64,
    /// Predator growth rate (year⁻¹).
    pub predator_growth: f64,
    /// Attack rate.
    pub attack_rate: f64,
    /// Handling time (years).
    pub handling_time: f64,
    /// Energy transfer efficiency.
    pub efficiency: f64,
    /// Step (years).
    pub time_step: f64,
    /// Duration (years).
    pub duration: f64,
}

impl Default for PredatorPreyConfig {
    fn default() -> Self {
        Self {
            prey_biomass: 500.0,
            prey_growth: 0.8,
            prey_capacity: 1000.0,
            predator_biomass: 50.0,
            predator_growth: 0.2,
            attack_rate: 0.01,
            handling_time: 0.5,
            efficiency: 0.1,
            time_step: 0.1,
            duration: 20.0,
        }
    }
}

impl PredatorPreyConfig {
    /// Build the scenario.
    #[must_use]
    pub fn build(&self) -> Scenario {
        let rabbit = Species::new("Rabbit", self.prey_biomass, self.prey_growth)
            .with_carrying_capacity(self.prey_capacity);
        let fox = Species::new("Fox", self.predator_biomass, self.predator_growth);
        let predation = Interaction::new("Fox", "Rabbit", self.attack_rate)
            .with_response(FunctionalResponseKind::TypeII)
            .with_efficiency(self.efficiency)
            .with_handling_time(self.handling_time);

        Scenario::new(vec![rabbit, fox], vec![predation], self.time_step, self.duration)
            .with_environment(Environment::with_temperature(15.0))
    }
}

/// Rabbit/Fox scenario with default parameters (20 years at 0.1-year steps).
#[must_use]
pub fn predator_prey() -> Scenario {
    PredatorPreyConfig::default().build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::engine::run_rk4_simulation;

    #[test]
    fn test_predator_prey_is_valid() {
        let s = predator_prey();
        assert!(s.validate().is_ok());
        assert_eq!(s.species.len(), 2);
        assert_eq!(s.interactions.len(), 1);
        assert_eq!(s.environment.as_ref().and_then(|e| e.temperature), Some(15.0));
    }

    #[test]
    fn test_predator_prey_runs() {
        let mut s = predator_prey();
        let results = run_rk4_simulation(&mut s).unwrap();
        assert_eq!(results.len("Rabbit"), 200);
        assert_eq!(results.len("Fox"), 200);
        for series in results.population_over_time.values() {
            assert!(series.iter().all(|p| p.biomass >= 0.0 && p.biomass.is_finite()));
            assert!(series.windows(2).all(|w| w[0].time < w[1].time));
        }
    }

    #[test]
    fn test_first_rabbit_step() {
        // Rabbit's first step: only growth and Fox predation, against a
        // Fox biomass frozen at 50.
        let mut s = PredatorPreyConfig {
            duration: 0.1,
            ..PredatorPreyConfig::default()
        }
        .build();
        let results = run_rk4_simulation(&mut s).unwrap();
        let rabbit = results.final_biomass("Rabbit").unwrap();
        // dR/dt ≈ 0.8·(1 - 0.5) - 0.01·50·500/(1 + 0.01·0.5·500) = 0.4 - 71.43
        assert!(rabbit < 500.0);
        assert!(rabbit > 490.0);
    }
}
