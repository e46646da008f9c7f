use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::inflow::{Convergence, HarmonicInflowModel, InflowModel};
use crate::rotor::{BladeForceState, BodyState, FlappingState, InflowState, PitchState, RotorConfig};

// ---------------------------------------------------------------------------
// Step inputs / outputs
// ---------------------------------------------------------------------------

/// Everything the inflow model consumes for one simulation step.
#[derive(Debug, Clone, Copy)]
pub struct StepInputs {
    pub pitch: PitchState,
    pub flapping: FlappingState,
    pub forces: BladeForceState,
    pub body: BodyState,
    pub omega: f64,            // rad/s
}

#[derive(Debug, Clone, Copy)]
pub struct InflowStep {
    pub index: usize,
    pub mu: f64,
    pub mu_z: f64,
    pub c_t: f64,
    pub inflow: InflowState,
    pub iterations: usize,
    pub status: Convergence,
}

// ---------------------------------------------------------------------------
// Warm-started step loop
// ---------------------------------------------------------------------------

/// Run `model` over a sequence of steps. Each step's output seeds the next.
pub fn run_with(
    model: &dyn InflowModel,
    radius: f64,
    inputs: &[StepInputs],
    initial: InflowState,
) -> Vec<InflowStep> {
    let mut previous = initial;
    let mut history = Vec::with_capacity(inputs.len());

    for (index, step) in inputs.iter().enumerate() {
        let sol = model.solve(
            &previous,
            &step.pitch,
            &step.flapping,
            &step.forces,
            &step.body,
            step.omega,
        );
        if sol.status != Convergence::Converged {
            log::debug!(
                "{} model step {}: {:?} after {} iterations",
                model.name(),
                index,
                sol.status,
                sol.iterations
            );
        }

        history.push(InflowStep {
            index,
            mu: step.body.mu(step.omega, radius),
            mu_z: step.body.mu_z(step.omega, radius),
            c_t: step.forces.c_t,
            inflow: sol.state,
            iterations: sol.iterations,
            status: sol.status,
        });
        previous = sol.state;
    }

    history
}

/// Run with the default harmonic model (convenience wrapper).
pub fn run(rotor: &RotorConfig, inputs: &[StepInputs], initial: InflowState) -> Vec<InflowStep> {
    let model = HarmonicInflowModel::new(rotor);
    run_with(&model, rotor.radius, inputs, initial)
}

// ---------------------------------------------------------------------------
// Level-flight advance-ratio sweep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub omega: f64,             // rad/s
    pub c_t: f64,
    pub max_airspeed: f64,      // m/s
    pub points: usize,
    pub climb_rate: f64,        // m/s, positive up
    pub body_rates: [f64; 3],   // [p, q, r] rad/s
    pub pitch: PitchState,
    pub flapping: FlappingState,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            omega: 35.0,
            c_t: 0.006,
            max_airspeed: 80.0,
            points: 41,
            climb_rate: 0.0,
            body_rates: [0.0; 3],
            pitch: PitchState { theta_0: 0.14, theta_1c: 0.0, theta_1s: -0.05 },
            flapping: FlappingState { beta_0: 0.06, beta_1c: 0.02, beta_1s: 0.0 },
        }
    }
}

impl SweepConfig {
    /// Airspeeds visited by the sweep, hover first.
    pub fn airspeeds(&self) -> Vec<f64> {
        match self.points {
            0 => vec![],
            1 => vec![0.0],
            n => (0..n)
                .map(|i| self.max_airspeed * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }

    /// Step inputs for a straight-line forward-flight schedule.
    pub fn schedule(&self) -> Vec<StepInputs> {
        let rates = Vector3::new(self.body_rates[0], self.body_rates[1], self.body_rates[2]);
        self.airspeeds()
            .into_iter()
            .map(|v| StepInputs {
                pitch: self.pitch,
                flapping: self.flapping,
                forces: BladeForceState { c_t: self.c_t },
                body: BodyState {
                    vel_hub: Vector3::new(v, 0.0, -self.climb_rate),
                    omega_hub: rates,
                },
                omega: self.omega,
            })
            .collect()
    }

    /// Momentum-theory hover inflow √(C_T/2), used to seed the first step.
    pub fn hover_seed(&self) -> InflowState {
        InflowState::new((self.c_t.max(0.0) / 2.0).sqrt(), 0.0, 0.0)
    }
}

/// Sweep from hover to `max_airspeed`, warm-starting each point from the last.
pub fn sweep(model: &dyn InflowModel, rotor: &RotorConfig, config: &SweepConfig) -> Vec<InflowStep> {
    let history = run_with(model, rotor.radius, &config.schedule(), config.hover_seed());
    log::info!(
        "{} sweep on {}: {} points, C_T={:.4}, omega={:.2} rad/s",
        model.name(),
        rotor.name,
        history.len(),
        config.c_t,
        config.omega
    );
    history
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
