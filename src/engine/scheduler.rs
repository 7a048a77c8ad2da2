//! Event scheduler.
//!
//! Fires scenario events whose scheduled time matches the current tick
//! within a tolerance. Events are checked in scenario order, so events at
//! the same time apply in insertion order. Reproducible across runs.
//!
//! Tick times accumulate by repeated addition, so an event time is matched
//! with a tolerance rather than by equality.

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::model::{Event, Scenario};

/// Default tolerance between tick time and event time.
pub const EVENT_TIME_TOLERANCE: f64 = 1e-6;

/// Whether an event that has already fired may fire again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FiringPolicy {
    /// Fire on the first matching tick only.
    #[default]
    Once,
    /// Fire on every tick within tolerance, even if already handled.
    /// Two ticks can share the window only when the step is smaller than
    /// twice the tolerance.
    WithinTolerance,
}

/// Applies due events to a scenario.
///
/// # Example
///
/// ```rust
/// use biomass_sim::engine::scheduler::{EventScheduler, FiringPolicy};
/// use biomass_sim::model::{Event, EventEffect, Scenario, Species};
///
/// let mut scenario = Scenario::new(vec![Species::new("Rabbit", 10.0, 0.8)], vec![], 1.0, 5.0)
///     .with_event(Event::new(
///         "drought",
///         2.0,
///         EventEffect::SetGrowthRate { species: "Rabbit".to_string(), value: 0.0 },
///     ));
///
/// let scheduler = EventScheduler::new(FiringPolicy::Once, 1e-6);
/// assert_eq!(scheduler.fire_due(&mut scenario, 1.0).unwrap(), 0);
/// assert_eq!(scheduler.fire_due(&mut scenario, 2.0).unwrap(), 1);
/// assert!(scenario.events[0].handled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventScheduler {
    policy: FiringPolicy,
    tolerance: f64,
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new(FiringPolicy::default(), EVENT_TIME_TOLERANCE)
    }
}

impl EventScheduler {
    /// Create a scheduler.
    #[must_use]
    pub const fn new(policy: FiringPolicy, tolerance: f64) -> Self {
        Self { policy, tolerance }
    }

    /// Firing policy.
    #[must_use]
    pub const fn policy(&self) -> FiringPolicy {
        self.policy
    }

    /// Time tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// True if the event is scheduled within tolerance of `time`.
    #[must_use]
    pub fn is_due(&self, event: &Event, time: f64) -> bool {
        (time - event.time).abs() < self.tolerance
    }

    /// Log events that arrive already handled and so will never fire.
    ///
    /// Returns how many there are; always 0 under `WithinTolerance`.
    pub fn report_handled(&self, scenario: &Scenario) -> usize {
        if self.policy != FiringPolicy::Once {
            return 0;
        }
        let mut count = 0;
        for event in scenario.events.iter().filter(|e| e.handled) {
            tracing::info!(
                event = %event.name,
                time = event.time,
                "event already marked handled, it will not fire"
            );
            count += 1;
        }
        count
    }

    /// Apply every due event to the scenario and mark it handled.
    ///
    /// Returns the number of events fired.
    ///
    /// # Errors
    ///
    /// Returns the first effect error. Events fired before it stay applied.
    pub fn fire_due(&self, scenario: &mut Scenario, time: f64) -> SimResult<usize> {
        if scenario.events.is_empty() {
            return Ok(0);
        }

        // Effects cannot touch the event list, so it is detached while they run.
        let mut events = std::mem::take(&mut scenario.events);
        let result = self.fire_detached(&mut events, scenario, time);
        scenario.events = events;
        result
    }

    fn fire_detached(
        &self,
        events: &mut [Event],
        scenario: &mut Scenario,
        time: f64,
    ) -> SimResult<usize> {
        let mut fired = 0;
        for event in events.iter_mut().filter(|e| self.is_due(e, time)) {
            if event.handled && self.policy == FiringPolicy::Once {
                tracing::warn!(event = %event.name, time, "event already handled, skipping");
                continue;
            }
            tracing::debug!(event = %event.name, scheduled = event.time, time, "firing event");
            event.effect.apply(scenario, time)?;
            event.handled = true;
            fired += 1;
        }
        Ok(fired)
    }
}
