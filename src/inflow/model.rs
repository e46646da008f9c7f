use crate::error::ConfigError;
use crate::rotor::{BladeForceState, BodyState, FlappingState, InflowState, PitchState, RotorConfig};

use super::harmonic::harmonic_inflow;
use super::uniform::{solve_uniform_inflow, Convergence, SolverSettings};

// ---------------------------------------------------------------------------
// Inflow model trait
// ---------------------------------------------------------------------------

/// Sanitized inflow plus diagnostics from the uniform solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflowSolution {
    pub state: InflowState,
    pub iterations: usize,
    pub status: Convergence,
}

/// Trait for induced-inflow models.
///
/// Implement this to plug a different inflow model into the step runner.
/// `previous` is the inflow returned for the prior step; its λ0 seeds the
/// uniform solve.
pub trait InflowModel {
    fn solve(
        &self,
        previous: &InflowState,
        pitch: &PitchState,
        flapping: &FlappingState,
        forces: &BladeForceState,
        body: &BodyState,
        omega: f64,
    ) -> InflowSolution;

    /// Inflow state only, diagnostics discarded.
    fn compute_state(
        &self,
        previous: &InflowState,
        pitch: &PitchState,
        flapping: &FlappingState,
        forces: &BladeForceState,
        body: &BodyState,
        omega: f64,
    ) -> InflowState {
        self.solve(previous, pitch, flapping, forces, body, omega).state
    }

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// NaN collapses to zero inflow. Infinities pass through untouched.
pub fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Harmonic (Glauert-type) model
// ---------------------------------------------------------------------------

/// Uniform momentum inflow with closed-form first-harmonic correction.
#[derive(Debug, Clone, Copy)]
pub struct HarmonicInflowModel<'a> {
    rotor: &'a RotorConfig,
    settings: SolverSettings,
}

impl<'a> HarmonicInflowModel<'a> {
    pub fn new(rotor: &'a RotorConfig) -> Self {
        Self { rotor, settings: SolverSettings::default() }
    }

    /// Model with custom solver settings, rejected if they cannot terminate cleanly.
    pub fn with_settings(rotor: &'a RotorConfig, settings: SolverSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { rotor, settings })
    }

    pub fn rotor(&self) -> &RotorConfig {
        self.rotor
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }
}

impl InflowModel for HarmonicInflowModel<'_> {
    fn solve(
        &self,
        previous: &InflowState,
        pitch: &PitchState,
        flapping: &FlappingState,
        forces: &BladeForceState,
        body: &BodyState,
        omega: f64,
    ) -> InflowSolution {
        let rotor = self.rotor;
        let uniform = solve_uniform_inflow(
            previous.lambda_0,
            forces.c_t,
            body.mu(omega, rotor.radius),
            body.mu_z(omega, rotor.radius),
            rotor.lift_slope,
            rotor.solidity,
            &self.settings,
        );
        let harmonics = harmonic_inflow(
            uniform.lambda_0,
            rotor.lift_slope,
            rotor.solidity,
            pitch,
            flapping,
            &body.omega_bar_hub(omega),
        );

        InflowSolution {
            state: InflowState::new(
                zero_if_nan(uniform.lambda_0),
                zero_if_nan(harmonics.lambda_1c),
                zero_if_nan(harmonics.lambda_1s),
            ),
            iterations: uniform.iterations,
            status: uniform.status,
        }
    }

    fn name(&self) -> &str {
        "Harmonic"
    }
}

// ---------------------------------------------------------------------------
// Uniform-only model
// ---------------------------------------------------------------------------

/// Momentum-theory uniform inflow with no first-harmonic variation.
#[derive(Debug, Clone, Copy)]
pub struct UniformInflowModel<'a> {
    rotor: &'a RotorConfig,
    settings: SolverSettings,
}

impl<'a> UniformInflowModel<'a> {
    pub fn new(rotor: &'a RotorConfig) -> Self {
        Self { rotor, settings: SolverSettings::default() }
    }

    /// Model with custom solver settings, rejected if they cannot terminate cleanly.
    pub fn with_settings(rotor: &'a RotorConfig, settings: SolverSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { rotor, settings })
    }
}

impl InflowModel for UniformInflowModel<'_> {
    fn solve(
        &self,
        previous: &InflowState,
        _pitch: &PitchState,
        _flapping: &FlappingState,
        forces: &BladeForceState,
        body: &BodyState,
        omega: f64,
    ) -> InflowSolution {
        let uniform = solve_uniform_inflow(
            previous.lambda_0,
            forces.c_t,
            body.mu(omega, self.rotor.radius),
            body.mu_z(omega, self.rotor.radius),
            self.rotor.lift_slope,
            self.rotor.solidity,
            &self.settings,
        );
        InflowSolution {
            state: InflowState::new(zero_if_nan(uniform.lambda_0), 0.0, 0.0),
            iterations: uniform.iterations,
            status: uniform.status,
        }
    }

    fn name(&self) -> &str {
        "Uniform"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
