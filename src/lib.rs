//! # biomass-sim
//!
//! Multi-species biomass dynamics under predation.
//!
//! Each tick the engine:
//! - fires scheduled events against the live scenario
//! - freezes a snapshot of every species' biomass
//! - steps each species with fixed-step RK4 against that snapshot
//! - clamps biomass at zero and records the series
//!
//! ## Example
//!
//! ```rust
//! use biomass_sim::prelude::*;
//!
//! let mut scenario = Scenario::new(
//!     vec![
//!         Species::new("Rabbit", 500.0, 0.8).with_carrying_capacity(1000.0),
//!         Species::new("Fox", 50.0, 0.2),
//!     ],
//!     vec![Interaction::new("Fox", "Rabbit", 0.01).with_handling_time(0.5)],
//!     0.1,
//!     2.0,
//! );
//!
//! let results = run_rk4_simulation(&mut scenario).unwrap();
//! assert_eq!(results.len("Rabbit"), 20);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Formulas mirror the published equations
    clippy::imprecise_flops,
    clippy::many_single_char_names,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod scenarios;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{SimConfig, SimConfigBuilder};
    pub use crate::engine::{
        run_rk4_simulation, EventScheduler, FiringPolicy, GainBinding, GrowthTerm, Simulation,
    };
    pub use crate::error::{SimError, SimResult};
    pub use crate::model::{
        Environment, Event, EventEffect, FunctionalResponseKind, Interaction, Scenario,
        SimulationResults, Species,
    };
}

/// Re-export for public API
pub use error::{SimError, SimResult};
