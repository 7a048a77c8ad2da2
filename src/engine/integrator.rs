//! Fixed-step scalar ODE integration.
//!
//! Steps `dy/dt = f(t, y)` forward by a constant `h`. There is no
//! adaptive step-size control and no local error estimate.

/// Numerical integrator trait.
pub trait Integrator {
    /// Advance `y` from `t` to `t + h`.
    ///
    /// `f` must be a pure function of `(t, y)` for the duration of the call.
    fn step(&self, t: f64, y: f64, h: f64, f: &dyn Fn(f64, f64) -> f64) -> f64;

    /// Global error order of the method.
    fn order(&self) -> u32;
}

/// Classical 4th-order Runge-Kutta.
///
/// Algorithm:
/// ```text
/// k1 = h·f(t, y)
/// k2 = h·f(t + h/2, y + k1/2)
/// k3 = h·f(t + h/2, y + k2/2)
/// k4 = h·f(t + h,   y + k3)
/// y_next = y + (k1 + 2·k2 + 2·k3 + k4) / 6
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4Integrator;

impl Rk4Integrator {
    /// Create a new RK4 integrator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Integrator for Rk4Integrator {
    fn step(&self, t: f64, y: f64, h: f64, f: &dyn Fn(f64, f64) -> f64) -> f64 {
        let half = h / 2.0;
        let k1 = h * f(t, y);
        let k2 = h * f(t + half, y + k1 / 2.0);
        let k3 = h * f(t + half, y + k2 / 2.0);
        let k4 = h * f(t + h, y + k3);
        y + (1.0 / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    }

    fn order(&self) -> u32 {
        4
    }
}

/// Single RK4 step.
#[must_use]
pub fn rk4_step<F>(t: f64, y: f64, h: f64, f: F) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    Rk4Integrator.step(t, y, h, &f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rk4_order() {
        assert_eq!(Rk4Integrator::new().order(), 4);
    }

    #[test]
    fn test_rk4_constant_derivative_is_exact() {
        let y = rk4_step(0.0, 500_000.0, 1.0, |_, _| 0.1);
        assert!((y - 500_000.1).abs() < 1e-9);
    }

    #[test]
    fn test_rk4_exponential_decay() {
        // dy/dt = -y, y(0) = 1 -> y(1) = e^-1
        let h = 0.01;
        let mut y = 1.0;
        let mut t = 0.0;
        for _ in 0..100 {
            y = rk4_step(t, y, h, |_, y| -y);
            t += h;
        }
        assert!((y - (-1.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_rk4_time_dependent() {
        // dy/dt = 2t, y(0) = 0 -> y(1) = 1 (quadratic: RK4 is exact)
        let y = rk4_step(0.0, 0.0, 1.0, |t, _| 2.0 * t);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rk4_fourth_order_convergence() {
        // Halving h should shrink the error by ~16x.
        let solve = |h: f64| {
            let n = (1.0 / h).round() as usize;
            let mut y = 1.0;
            for i in 0..n {
                y = rk4_step(i as f64 * h, y, h, |_, y| -2.0 * y);
            }
            (y - (-2.0f64).exp()).abs()
        };
        let ratio = solve(0.1) / solve(0.05);
        assert!(ratio > 12.0 && ratio < 20.0, "ratio = {ratio}");
    }

    #[test]
    fn test_integrator_trait_object() {
        let integrator: Box<dyn Integrator + Send + Sync> = Box::new(Rk4Integrator::new());
        let y = integrator.step(0.0, 1.0, 0.5, &|_, _| 2.0);
        assert!((y - 2.0).abs() < f64::EPSILON);
    }
}
