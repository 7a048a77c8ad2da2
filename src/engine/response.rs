//! Functional response curves.
//!
//! Consumption rate of a predator population `P` feeding on a prey
//! population `Q`, with attack rate `a` and handling time `h`:
//!
//! ```text
//! Type I:   a·P·Q
//! Type II:  a·P·Q  / (1 + a·h·Q)
//! Type III: a·P·Q² / (1 + a·h·Q²)
//! ```

use crate::error::SimResult;
use crate::model::{FunctionalResponseKind, Interaction};

/// A resolved functional response: curve kind plus its coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionalResponse {
    /// Curve family.
    pub kind: FunctionalResponseKind,
    /// Attack rate `a`.
    pub attack_rate: f64,
    /// Handling time `h`.
    pub handling_time: f64,
}

impl FunctionalResponse {
    /// Create a response from explicit coefficients.
    #[must_use]
    pub const fn new(kind: FunctionalResponseKind, attack_rate: f64, handling_time: f64) -> Self {
        Self {
            kind,
            attack_rate,
            handling_time,
        }
    }

    /// Resolve an interaction's curve, applying the `Type II` and `h = 0` defaults.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFunctionalResponseKind` for an unrecognized label.
    pub fn from_interaction(interaction: &Interaction) -> SimResult<Self> {
        Ok(Self::new(
            interaction.response_kind()?,
            interaction.consumption_rate,
            interaction.handling(),
        ))
    }

    /// Instantaneous consumption rate.
    #[must_use]
    #[inline]
    pub fn consumption(&self, predator_biomass: f64, prey_biomass: f64) -> f64 {
        let a = self.attack_rate;
        let h = self.handling_time;
        match self.kind {
            FunctionalResponseKind::TypeI => a * predator_biomass * prey_biomass,
            FunctionalResponseKind::TypeII => {
                (a * predator_biomass * prey_biomass) / (1.0 + a * h * prey_biomass)
            }
            FunctionalResponseKind::TypeIII => {
                let q2 = prey_biomass.powi(2);
                (a * predator_biomass * q2) / (1.0 + a * h * q2)
            }
        }
    }
}

/// Consumption rate for an interaction at the given biomasses.
///
/// # Errors
///
/// Returns `UnknownFunctionalResponseKind` for an unrecognized label.
pub fn functional_response(
    interaction: &Interaction,
    predator_biomass: f64,
    prey_biomass: f64,
) -> SimResult<f64> {
    Ok(FunctionalResponse::from_interaction(interaction)?.consumption(predator_biomass, prey_biomass))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::SimError;

    fn interaction(kind: FunctionalResponseKind, h: f64) -> Interaction {
        Interaction::new("Fox", "Rabbit", 0.01)
            .with_response(kind)
            .with_handling_time(h)
    }

    #[test]
    fn test_type_i_exact() {
        let c = functional_response(&interaction(FunctionalResponseKind::TypeI, 0.5), 10.0, 20.0)
            .unwrap();
        assert!((c - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_type_ii_exact() {
        let c = functional_response(&interaction(FunctionalResponseKind::TypeII, 0.5), 10.0, 20.0)
            .unwrap();
        assert!((c - 2.0 / 1.1).abs() < 1e-12);
        assert!((c - 1.818_182).abs() < 1e-6);
    }

    #[test]
    fn test_type_iii_value() {
        let c =
            functional_response(&interaction(FunctionalResponseKind::TypeIII, 0.5), 10.0, 20.0)
                .unwrap();
        // 0.01·10·400 / (1 + 0.01·0.5·400) = 40 / 3
        assert!((c - 40.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_kind_is_type_ii() {
        let i = Interaction::new("Fox", "Rabbit", 0.01).with_handling_time(0.5);
        let c = functional_response(&i, 10.0, 20.0).unwrap();
        assert!((c - 2.0 / 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_zero_handling_type_ii_is_linear() {
        let i = Interaction::new("Fox", "Rabbit", 0.01);
        let c = functional_response(&i, 10.0, 20.0).unwrap();
        assert!((c - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_type_ii_saturates() {
        let r = FunctionalResponse::new(FunctionalResponseKind::TypeII, 0.01, 0.5);
        let p = 10.0;
        let c = r.consumption(p, 1e12);
        assert!((c - p / 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_kind_fails() {
        let mut i = Interaction::new("Fox", "Rabbit", 0.01);
        i.functional_response = Some("Type IV".to_string());
        assert!(matches!(
            functional_response(&i, 1.0, 1.0),
            Err(SimError::UnknownFunctionalResponseKind { .. })
        ));
    }

    #[test]
    fn test_zero_prey_gives_zero() {
        for kind in [
            FunctionalResponseKind::TypeI,
            FunctionalResponseKind::TypeII,
            FunctionalResponseKind::TypeIII,
        ] {
            let r = FunctionalResponse::new(kind, 0.01, 0.5);
            assert!(r.consumption(10.0, 0.0).abs() < f64::EPSILON);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Type III onset is slower than Type I and Type II for small prey biomass.
        #[test]
        fn prop_type_iii_below_type_i_and_ii_near_zero(
            a in 0.001f64..1.0,
            h in 0.0f64..2.0,
            p in 0.1f64..100.0,
            q in 1e-6f64..0.5,
        ) {
            let t1 = FunctionalResponse::new(FunctionalResponseKind::TypeI, a, h).consumption(p, q);
            let t2 = FunctionalResponse::new(FunctionalResponseKind::TypeII, a, h).consumption(p, q);
            let t3 = FunctionalResponse::new(FunctionalResponseKind::TypeIII, a, h).consumption(p, q);
            prop_assert!(t3 < t1);
            prop_assert!(t3 < t2);
        }

        /// Type II never exceeds Type I.
        #[test]
        fn prop_type_ii_bounded_by_type_i(
            a in 0.001f64..1.0,
            h in 0.0f64..2.0,
            p in 0.0f64..100.0,
            q in 0.0f64..1000.0,
        ) {
            let t1 = FunctionalResponse::new(FunctionalResponseKind::TypeI, a, h).consumption(p, q);
            let t2 = FunctionalResponse::new(FunctionalResponseKind::TypeII, a, h).consumption(p, q);
            prop_assert!(t2 <= t1 + 1e-9 * t1.abs().max(1.0));
        }
    }
}
