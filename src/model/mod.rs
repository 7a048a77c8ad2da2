//! Scenario data model.
//!
//! Plain, serializable types describing an ecosystem:
//! - Species with growth parameters and standing biomass
//! - Pairwise predator-prey interactions
//! - Environmental forcing values (inert extension point)
//! - Scheduled events with data-driven effects
//! - Simulation output series

pub mod environment;
pub mod event;
pub mod interaction;
pub mod results;
pub mod scenario;
pub mod species;

pub use environment::Environment;
pub use event::{Event, EventEffect};
pub use interaction::{FunctionalResponseKind, Interaction};
pub use results::{EnergyFlowOutput, PopulationOutput, SimulationResults};
pub use scenario::Scenario;
pub use species::Species;
