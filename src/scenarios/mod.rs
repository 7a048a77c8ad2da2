//! Pre-built simulation scenarios.
//!
//! Ready-to-run ecosystems for demos, benchmarks and tests:
//! - Rabbit/Fox predator-prey with a saturating functional response

pub mod predator_prey;

pub use predator_prey::{predator_prey, PredatorPreyConfig};
