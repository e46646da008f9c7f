use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::config::RotorConfig;

// ---------------------------------------------------------------------------
// Blade pitch and flapping (mean + first harmonic)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchState {
    pub theta_0: f64,    // collective, rad
    pub theta_1c: f64,   // lateral cyclic, rad
    pub theta_1s: f64,   // longitudinal cyclic, rad
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlappingState {
    pub beta_0: f64,     // coning, rad
    pub beta_1c: f64,    // longitudinal disk tilt, rad
    pub beta_1s: f64,    // lateral disk tilt, rad
}

// ---------------------------------------------------------------------------
// Blade aerodynamic force state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BladeForceState {
    pub c_t: f64,        // thrust coefficient T / (ρ·πR²·(ΩR)²)
}

impl BladeForceState {
    /// Thrust coefficient from dimensional rotor thrust.
    pub fn from_thrust(thrust: f64, density: f64, rotor: &RotorConfig, omega: f64) -> Self {
        let tip = rotor.tip_speed(omega);
        Self { c_t: thrust / (density * rotor.disk_area() * tip * tip) }
    }
}

// ---------------------------------------------------------------------------
// Body motion seen at the rotor hub
// ---------------------------------------------------------------------------

/// Hub kinematics resolved in hub axes: x forward, y right, z down along the shaft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub vel_hub: Vector3<f64>,     // m/s, hub velocity relative to the air
    pub omega_hub: Vector3<f64>,   // rad/s, body angular rate [p, q, r]
}

impl Default for BodyState {
    fn default() -> Self {
        Self { vel_hub: Vector3::zeros(), omega_hub: Vector3::zeros() }
    }
}

impl BodyState {
    /// In-plane advance ratio μ = √(u² + v²) / ΩR.
    pub fn mu(&self, omega: f64, radius: f64) -> f64 {
        self.vel_hub.xy().norm() / (omega * radius)
    }

    /// Normal advance ratio μz = w / ΩR (positive in descent).
    pub fn mu_z(&self, omega: f64, radius: f64) -> f64 {
        self.vel_hub.z / (omega * radius)
    }

    /// Azimuth of the relative wind in the disk plane, rad.
    pub fn psi_w(&self) -> f64 {
        self.vel_hub.y.atan2(self.vel_hub.x)
    }

    /// Angular rates normalized by rotor speed: [p̄, q̄, r̄].
    pub fn omega_bar_hub(&self, omega: f64) -> Vector3<f64> {
        self.omega_hub / omega
    }
}

// ---------------------------------------------------------------------------
// Induced inflow (output)
// ---------------------------------------------------------------------------

/// Induced inflow ratios normalized by tip speed, positive down through the disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InflowState {
    pub lambda_0: f64,
    pub lambda_1c: f64,
    pub lambda_1s: f64,
}

impl InflowState {
    pub fn new(lambda_0: f64, lambda_1c: f64, lambda_1s: f64) -> Self {
        Self { lambda_0, lambda_1c, lambda_1s }
    }

    /// Local inflow ratio at radial station `r_bar` (r/R) and blade azimuth `psi`.
    pub fn local(&self, r_bar: f64, psi: f64) -> f64 {
        self.lambda_0 + r_bar * (self.lambda_1c * psi.cos() + self.lambda_1s * psi.sin())
    }

    /// Mean induced velocity λ0·ΩR, m/s.
    pub fn induced_velocity(&self, omega: f64, radius: f64) -> f64 {
        self.lambda_0 * omega * radius
    }
}
