//! Core simulation engine.
//!
//! Implements the central time loop with:
//! - Event scheduling against the live scenario
//! - Frozen-coefficient coupling (one population snapshot per tick)
//! - Fixed-step RK4 integration per species
//! - Jidoka guards for stop-on-error

pub mod derivative;
pub mod integrator;
pub mod jidoka;
pub mod response;
pub mod scheduler;

pub use derivative::{GainBinding, GrowthTerm, PopulationDerivative, PopulationSnapshot};
pub use integrator::{rk4_step, Integrator, Rk4Integrator};
pub use jidoka::{JidokaConfig, JidokaGuard};
pub use response::{functional_response, FunctionalResponse};
pub use scheduler::{EventScheduler, FiringPolicy, EVENT_TIME_TOLERANCE};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::model::{Scenario, SimulationResults};

/// Main simulation engine.
///
/// Coordinates all subsystems:
/// - Event scheduling
/// - Derivative construction
/// - Integration
/// - Jidoka monitoring
pub struct Simulation {
    /// Event scheduler.
    scheduler: EventScheduler,
    /// Per-species stepper.
    integrator: Box<dyn Integrator + Send + Sync>,
    /// Jidoka guard for anomaly detection.
    jidoka: JidokaGuard,
    /// Configuration.
    config: SimConfig,
}

impl Simulation {
    /// Create a new simulation engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.check()?;
        Ok(Self {
            scheduler: EventScheduler::new(config.events.firing, config.events.tolerance),
            integrator: Box::new(Rk4Integrator::new()),
            jidoka: JidokaGuard::new(config.jidoka.clone()),
            config,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run the scenario to completion.
    ///
    /// The scenario is mutated in place: species biomass ends at the last
    /// tick's values, fired events are marked handled, and event effects
    /// stay applied. Clone the scenario first to run it again.
    ///
    /// Tick times accumulate as `t += timeStep`, so after many ticks `t`
    /// drifts from `n · timeStep` by floating-point rounding. The loop runs
    /// while `t < duration`; there is no partial final tick.
    ///
    /// # Errors
    ///
    /// Returns error (and no partial results) if:
    /// - The scenario fails validation
    /// - An event effect fails
    /// - A derivative cannot be built (unknown curve or species)
    /// - Jidoka detects a non-finite biomass
    pub fn run(&mut self, scenario: &mut Scenario) -> SimResult<SimulationResults> {
        scenario.validate()?;
        self.scheduler.report_handled(scenario);

        let h = scenario.time_step;
        let record_every = self.config.output.record_every;
        let mut results = SimulationResults::with_species(scenario.species_names());

        tracing::info!(
            species = scenario.species.len(),
            interactions = scenario.interactions.len(),
            events = scenario.events.len(),
            time_step = h,
            duration = scenario.duration,
            "starting simulation"
        );

        let mut t = 0.0;
        let mut tick: u64 = 0;
        while t < scenario.duration {
            self.step(scenario, t)?;

            if tick % record_every == 0 {
                for species in &scenario.species {
                    results.record(&species.name, t, species.biomass);
                }
            }

            t += h;
            tick += 1;
        }

        tracing::info!(ticks = tick, "simulation complete");
        Ok(results)
    }

    /// Advance every species by one tick starting at time `t`.
    ///
    /// # Errors
    ///
    /// Returns error if an event, derivative or Jidoka check fails.
    pub fn step(&mut self, scenario: &mut Scenario, t: f64) -> SimResult<()> {
        self.scheduler.fire_due(scenario, t)?;

        // Every species sees the populations as they were at tick start.
        let snapshot = PopulationSnapshot::capture(&scenario.species);
        let h = scenario.time_step;
        let model = self.config.model;

        for idx in 0..scenario.species.len() {
            let derivative = PopulationDerivative::build(
                &scenario.species[idx],
                &scenario.interactions,
                &snapshot,
                model.growth,
                model.gain_binding,
            )?;
            let current = scenario.species[idx].biomass;
            let predicted = self
                .integrator
                .step(t, current, h, &|t, y| derivative.rate(t, y));
            scenario.species[idx].biomass = clamp_biomass(predicted);
        }

        tracing::trace!(t, "tick complete");
        self.jidoka.check(&scenario.species)
    }
}

/// Clamp negative biomass to zero. NaN passes through for Jidoka to catch.
#[inline]
fn clamp_biomass(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Run a scenario with the default configuration.
///
/// # Errors
///
/// Returns error if the scenario is invalid or the run aborts.
pub fn run_rk4_simulation(scenario: &mut Scenario) -> SimResult<SimulationResults> {
    Simulation::new(SimConfig::default())?.run(scenario)
}
