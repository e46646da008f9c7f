use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Solver settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub relaxation: f64,        // damping applied to each correction step, > 0
    pub tolerance: f64,         // stop when |λ_next − λ_prev| ≤ tolerance, > 0
    pub max_iterations: usize,  // >= 1
    pub residual_fraction: f64, // accepted |residual| ≤ fraction·|C_T| + tolerance, >= 0
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            relaxation: 0.6,
            tolerance: 1e-3,
            max_iterations: 10_000,
            residual_fraction: 0.5,
        }
    }
}

impl SolverSettings {
    /// Reject settings that would stall or never terminate the iteration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.relaxation.is_finite() && self.relaxation > 0.0) {
            return Err(ConfigError::InvalidRelaxation(self.relaxation));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidIterationLimit);
        }
        if !(self.residual_fraction.is_finite() && self.residual_fraction >= 0.0) {
            return Err(ConfigError::InvalidResidualFraction(self.residual_fraction));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Solution + convergence tag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Convergence {
    /// Step size fell within tolerance and the momentum balance holds.
    Converged,
    /// Step size fell within tolerance but the momentum balance is still far off
    /// (e.g. a near-zero seed in hover, where the correction is vanishingly small).
    Stalled,
    /// Iteration produced NaN (zero-flow disk, singular correction).
    Degenerate,
    /// Cap reached without meeting tolerance.
    IterationLimit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSolution {
    pub lambda_0: f64,
    pub iterations: usize,
    pub status: Convergence,
}

// ---------------------------------------------------------------------------
// Momentum-theory balance: 2·λ·√(μ² + (λ − μz)²) = C_T
// ---------------------------------------------------------------------------

/// Residual of the momentum balance at `lambda`.
pub fn momentum_residual(lambda: f64, c_t: f64, mu: f64, mu_z: f64) -> f64 {
    2.0 * lambda * (mu * mu + (lambda - mu_z).powi(2)).sqrt() - c_t
}

/// Damped quasi-Newton iteration for the uniform inflow ratio λ0.
///
/// `seed` is normally the previous step's λ0. NaN and infinities are not
/// guarded: a NaN iterate ends the solve as [`Convergence::Degenerate`] and is
/// returned as-is, an infinite iterate keeps iterating (and collapses to NaN on
/// the next correction).
///
/// A step within tolerance is only reported as [`Convergence::Converged`] when
/// the momentum residual is within `residual_fraction·|C_T| + tolerance`;
/// otherwise the same λ0 comes back tagged [`Convergence::Stalled`].
pub fn solve_uniform_inflow(
    seed: f64,
    c_t: f64,
    mu: f64,
    mu_z: f64,
    lift_slope: f64,
    solidity: f64,
    settings: &SolverSettings,
) -> UniformSolution {
    let blade_term = lift_slope * solidity / 4.0;
    let mut prev = seed;

    for iteration in 1..=settings.max_iterations {
        let big_lambda = mu * mu + (prev - mu_z).powi(2);
        let numerator = (2.0 * prev * big_lambda.sqrt() - c_t) * big_lambda;
        let denominator =
            2.0 * big_lambda.powf(1.5) + blade_term * big_lambda - c_t * (mu_z - prev);
        let next = prev + settings.relaxation * (-numerator / denominator);

        if next.is_nan() {
            return UniformSolution {
                lambda_0: next,
                iterations: iteration,
                status: Convergence::Degenerate,
            };
        }
        if (next - prev).abs() <= settings.tolerance {
            let residual = momentum_residual(next, c_t, mu, mu_z);
            let accepted = settings.residual_fraction * c_t.abs() + settings.tolerance;
            let status = if residual.abs() <= accepted {
                log::trace!("uniform inflow converged to {:.6} in {} iterations", next, iteration);
                Convergence::Converged
            } else {
                log::debug!(
                    "uniform inflow stalled at {:.6} (residual {:.3e}, C_T={:.5})",
                    next,
                    residual,
                    c_t
                );
                Convergence::Stalled
            };
            return UniformSolution {
                lambda_0: next,
                iterations: iteration,
                status,
            };
        }
        prev = next;
    }

    log::warn!(
        "uniform inflow did not converge in {} iterations (C_T={:.5}, mu={:.4}, mu_z={:.4})",
        settings.max_iterations,
        c_t,
        mu,
        mu_z
    );
    UniformSolution {
        lambda_0: prev,
        iterations: settings.max_iterations,
        status: Convergence::IterationLimit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const A0: f64 = 5.7;
    const S: f64 = 0.08;

    fn solve(seed: f64, c_t: f64, mu: f64, mu_z: f64) -> UniformSolution {
        solve_uniform_inflow(seed, c_t, mu, mu_z, A0, S, &SolverSettings::default())
    }

    #[test]
    fn forward_flight_envelope_converges() {
        for &mu in &[0.05, 0.1, 0.2, 0.3, 0.4] {
            for &mu_z in &[-0.02, 0.0, 0.02] {
                for &c_t in &[0.003, 0.006, 0.01] {
                    let sol = solve(0.05, c_t, mu, mu_z);
                    assert_eq!(sol.status, Convergence::Converged);
                    assert!(sol.iterations < 10_000);
                    let r = momentum_residual(sol.lambda_0, c_t, mu, mu_z);
                    assert!(
                        r.abs() < 1e-3,
                        "residual {:.2e} at mu={}, mu_z={}, C_T={}",
                        r, mu, mu_z, c_t
                    );
                }
            }
        }
    }

    #[test]
    fn hover_matches_momentum_theory() {
        let c_t: f64 = 0.005;
        let exact = (c_t / 2.0).sqrt();
        let tight = SolverSettings { tolerance: 1e-8, ..SolverSettings::default() };
        for &seed in &[0.01, 0.1, 0.2] {
            let sol = solve_uniform_inflow(seed, c_t, 0.0, 0.0, A0, S, &tight);
            assert_eq!(sol.status, Convergence::Converged);
            assert_relative_eq!(sol.lambda_0, exact, max_relative = 0.01);
        }
    }

    #[test]
    fn hover_default_tolerance_is_close() {
        let exact = (0.005_f64 / 2.0).sqrt();
        for &seed in &[0.01, 0.03, 0.1, 0.2] {
            let sol = solve(seed, 0.005, 0.0, 0.0);
            assert_relative_eq!(sol.lambda_0, exact, max_relative = 0.05);
        }
    }

    #[test]
    fn exact_seed_converges_in_one_step() {
        let exact = (0.005_f64 / 2.0).sqrt();
        let sol = solve(exact, 0.005, 0.0, 0.0);
        assert_eq!(sol.iterations, 1);
        assert!((sol.lambda_0 - exact).abs() < 1e-12);
    }

    #[test]
    fn zero_thrust_drives_inflow_to_zero() {
        for &seed in &[0.01, 0.05, 0.1, 0.2] {
            let sol = solve(seed, 0.0, 0.2, 0.0);
            assert_eq!(sol.status, Convergence::Converged);
            assert!(sol.lambda_0.abs() < 2e-3, "seed {} gave {}", seed, sol.lambda_0);
        }
    }

    #[test]
    fn reference_forward_flight_case() {
        // a0 = 5.7, s = 0.08, C_T = 0.006, mu = 0.2, seed 0.05
        let sol = solve(0.05, 0.006, 0.2, 0.0);
        assert_eq!(sol.status, Convergence::Converged);
        assert!((sol.lambda_0 - 0.015_752).abs() < 1e-6, "got {}", sol.lambda_0);
        assert!(sol.iterations <= 10);

        let tight = SolverSettings { tolerance: 1e-10, ..SolverSettings::default() };
        let root = solve_uniform_inflow(0.05, 0.006, 0.2, 0.0, A0, S, &tight);
        assert!((root.lambda_0 - 0.014_958).abs() < 1e-6, "got {}", root.lambda_0);
    }

    #[test]
    fn climb_reduces_inflow() {
        let level = solve(0.05, 0.006, 0.1, 0.0).lambda_0;
        let climb = solve(0.05, 0.006, 0.1, -0.02).lambda_0;
        assert!(climb < level);
    }

    #[test]
    fn zero_flow_disk_is_degenerate() {
        // Λ = 0 and C_T = 0 give 0/0 on the first correction
        let sol = solve(0.0, 0.0, 0.0, 0.0);
        assert_eq!(sol.status, Convergence::Degenerate);
        assert!(sol.lambda_0.is_nan());
        assert_eq!(sol.iterations, 1);
    }

    #[test]
    fn tiny_hover_seed_is_stalled_not_converged() {
        let sol = solve(1e-4, 0.006, 0.0, 0.0);
        assert_eq!(sol.status, Convergence::Stalled);
        assert_eq!(sol.iterations, 1);
        // λ0 is returned untouched, still far from √(C_T/2)
        assert!(sol.lambda_0 < 1e-3);
        assert!((momentum_residual(sol.lambda_0, 0.006, 0.0, 0.0) + 0.006).abs() < 1e-5);
    }

    #[test]
    fn default_settings_are_valid() {
        assert!(SolverSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_settings_that_cannot_terminate() {
        let base = SolverSettings::default();
        let bad = SolverSettings { tolerance: f64::NAN, ..base };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidTolerance(_))));
        let bad = SolverSettings { tolerance: -1e-3, ..base };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidTolerance(_))));
        let bad = SolverSettings { relaxation: 0.0, ..base };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidRelaxation(_))));
        let bad = SolverSettings { max_iterations: 0, ..base };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidIterationLimit)));
        let bad = SolverSettings { residual_fraction: -0.1, ..base };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidResidualFraction(_))));
    }

    #[test]
    fn settings_json_fills_missing_fields() {
        let settings: SolverSettings = serde_json::from_str(r#"{"tolerance": 1e-6}"#).unwrap();
        assert_eq!(settings.tolerance, 1e-6);
        assert_eq!(settings.relaxation, 0.6);
        assert_eq!(settings.residual_fraction, 0.5);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let capped = SolverSettings { max_iterations: 2, ..SolverSettings::default() };
        let sol = solve_uniform_inflow(0.05, 0.006, 0.2, 0.0, A0, S, &capped);
        assert_eq!(sol.status, Convergence::IterationLimit);
        assert_eq!(sol.iterations, 2);
        assert!(sol.lambda_0.is_finite());
    }
}
