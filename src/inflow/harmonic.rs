use nalgebra::Vector3;

use crate::rotor::{FlappingState, PitchState};

/// First-harmonic inflow components (cosine, sine).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicInflow {
    pub lambda_1c: f64,
    pub lambda_1s: f64,
}

/// Closed-form first-harmonic inflow from disk tilt and body rates.
///
/// `omega_bar` holds hub-axis rates normalized by rotor speed, [p̄, q̄, r̄].
/// λ0 → 0 is singular and yields NaN; callers sanitize.
pub fn harmonic_inflow(
    lambda_0: f64,
    lift_slope: f64,
    solidity: f64,
    pitch: &PitchState,
    flapping: &FlappingState,
    omega_bar: &Vector3<f64>,
) -> HarmonicInflow {
    let blade_ratio = lift_slope * solidity / (16.0 * lambda_0);
    let c_prime = 1.0 / (1.0 + blade_ratio);
    let gain = c_prime * blade_ratio;

    let p_bar = omega_bar.x;
    let q_bar = omega_bar.y;

    HarmonicInflow {
        lambda_1c: gain * (pitch.theta_1c - flapping.beta_1s + q_bar),
        lambda_1s: gain * (pitch.theta_1s + flapping.beta_1c + p_bar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A0: f64 = 5.7;
    const S: f64 = 0.08;
    const LAMBDA_0: f64 = 0.015_752;

    #[test]
    fn cosine_term_vanishes_when_pitch_matches_lateral_tilt() {
        let pitch = PitchState { theta_0: 0.15, theta_1c: 0.03, theta_1s: -0.02 };
        let flapping = FlappingState { beta_0: 0.05, beta_1c: 0.01, beta_1s: 0.03 };
        let rates = Vector3::new(0.02, 0.0, 0.0);
        let h = harmonic_inflow(LAMBDA_0, A0, S, &pitch, &flapping, &rates);
        assert_eq!(h.lambda_1c, 0.0);
        assert!(h.lambda_1s != 0.0);
    }

    #[test]
    fn sine_term_vanishes_when_pitch_cancels_longitudinal_tilt() {
        let pitch = PitchState { theta_0: 0.15, theta_1c: 0.02, theta_1s: -0.04 };
        let flapping = FlappingState { beta_0: 0.05, beta_1c: 0.04, beta_1s: 0.0 };
        let rates = Vector3::new(0.0, 0.02, 0.0);
        let h = harmonic_inflow(LAMBDA_0, A0, S, &pitch, &flapping, &rates);
        assert_eq!(h.lambda_1s, 0.0);
        assert!(h.lambda_1c != 0.0);
    }

    #[test]
    fn gain_matches_closed_form() {
        let pitch = PitchState { theta_0: 0.0, theta_1c: 0.05, theta_1s: 0.0 };
        let flapping = FlappingState { beta_0: 0.0, beta_1c: 0.0, beta_1s: 0.01 };
        let h = harmonic_inflow(LAMBDA_0, A0, S, &pitch, &flapping, &Vector3::zeros());
        // C' = 1 / (1 + a0·s/(16·λ0)), gain = C'·a0·s/(16·λ0) ≈ 0.64404
        assert!((h.lambda_1c - 0.644_04 * 0.04).abs() < 1e-6, "got {}", h.lambda_1c);
        assert_eq!(h.lambda_1s, 0.0);
    }

    #[test]
    fn body_rates_feed_matching_components() {
        let rates = Vector3::new(0.01, -0.02, 0.5);
        let h = harmonic_inflow(
            LAMBDA_0,
            A0,
            S,
            &PitchState::default(),
            &FlappingState::default(),
            &rates,
        );
        assert!(h.lambda_1c < 0.0, "q̄ < 0 should give negative λ1c");
        assert!(h.lambda_1s > 0.0, "p̄ > 0 should give positive λ1s");
        assert!((h.lambda_1c / h.lambda_1s + 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_uniform_inflow_is_singular() {
        let pitch = PitchState { theta_0: 0.1, theta_1c: 0.02, theta_1s: 0.01 };
        let h = harmonic_inflow(0.0, A0, S, &pitch, &FlappingState::default(), &Vector3::zeros());
        assert!(h.lambda_1c.is_nan());
        assert!(h.lambda_1s.is_nan());
    }
}
