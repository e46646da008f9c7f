use nalgebra::Vector3;

use rotor_inflow::inflow::Convergence;
use rotor_inflow::io::{csv, json::{self, SweepSummary}};
use rotor_inflow::rotor::{presets, BladeForceState, BodyState, FlappingState, InflowState, PitchState};
use rotor_inflow::sim::{self, StepInputs};

/// Level acceleration from hover to 60 m/s with a light pitch oscillation,
/// stepping the inflow model at 100 Hz.
fn main() {
    let rotor = presets::lynx();
    let omega = rotor.nominal_omega;
    let dt = 0.01;
    let duration = 20.0;
    let weight = 4300.0 * 9.80665; // N
    let density = 1.225;

    let steps = (duration / dt) as usize;
    let inputs: Vec<StepInputs> = (0..steps)
        .map(|i| {
            let t = i as f64 * dt;
            let speed = 3.0 * t;                               // 3 m/s^2
            let q = 0.05 * (2.0 * std::f64::consts::PI * 0.5 * t).sin();
            StepInputs {
                pitch: PitchState { theta_0: 0.15, theta_1c: 0.01, theta_1s: -0.002 * speed },
                flapping: FlappingState { beta_0: 0.05, beta_1c: 0.001 * speed, beta_1s: 0.005 },
                forces: BladeForceState::from_thrust(weight, density, &rotor, omega),
                body: BodyState {
                    vel_hub: Vector3::new(speed, 0.0, 0.0),
                    omega_hub: Vector3::new(0.0, q, 0.0),
                },
                omega,
            }
        })
        .collect();

    println!("Stepping {} inflow for {} steps ...", rotor.name, steps);
    let seed = InflowState::new(0.05, 0.0, 0.0);
    let history = sim::run(&rotor, &inputs, seed);

    let summary = SweepSummary::from_history(&history);
    println!("C_T: {:.5}", inputs[0].forces.c_t);
    println!("lambda_0: {:.4} (hover) .. {:.4} (60 m/s)", summary.lambda_0_max, summary.lambda_0_min);
    println!("Mean iterations per step: {:.2}", summary.mean_iterations);
    let unconverged = history.iter().filter(|h| h.status != Convergence::Converged).count();
    println!("Unconverged steps: {}", unconverged);

    csv::write_history_file("forward_flight_inflow.csv", &history)
        .expect("Failed to write CSV");
    json::write_summary_file("forward_flight_summary.json", &rotor, &summary)
        .expect("Failed to write JSON");

    println!("Exported: forward_flight_inflow.csv, forward_flight_summary.json");
}
