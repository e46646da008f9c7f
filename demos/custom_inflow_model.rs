use rotor_inflow::inflow::{solve_uniform_inflow, InflowModel, InflowSolution, SolverSettings};
use rotor_inflow::rotor::{
    presets, BladeForceState, BodyState, FlappingState, InflowState, PitchState, RotorConfig,
};
use rotor_inflow::sim::{self, SweepConfig};

/// Drees linear inflow: harmonics scale with λ0 and the wake skew angle,
/// independent of pitch and flapping.
struct DreesInflow<'a> {
    rotor: &'a RotorConfig,
    settings: SolverSettings,
}

impl InflowModel for DreesInflow<'_> {
    fn solve(
        &self,
        previous: &InflowState,
        _pitch: &PitchState,
        _flapping: &FlappingState,
        forces: &BladeForceState,
        body: &BodyState,
        omega: f64,
    ) -> InflowSolution {
        let mu = body.mu(omega, self.rotor.radius);
        let mu_z = body.mu_z(omega, self.rotor.radius);
        let uniform = solve_uniform_inflow(
            previous.lambda_0,
            forces.c_t,
            mu,
            mu_z,
            self.rotor.lift_slope,
            self.rotor.solidity,
            &self.settings,
        );
        let lambda_0 = uniform.lambda_0;

        // Wake skew angle from the disk normal
        let chi = mu.atan2(lambda_0 - mu_z);
        let k_x = if chi.sin().abs() > 1e-6 {
            4.0 / 3.0 * (1.0 - chi.cos() - 1.8 * mu * mu) / chi.sin()
        } else {
            0.0
        };
        let k_y = -2.0 * mu;

        InflowSolution {
            state: InflowState::new(lambda_0, k_x * lambda_0, k_y * lambda_0),
            iterations: uniform.iterations,
            status: uniform.status,
        }
    }

    fn name(&self) -> &str {
        "Drees"
    }
}

fn main() {
    let rotor = presets::bo105();
    let model = DreesInflow { rotor: &rotor, settings: SolverSettings::default() };
    let config = SweepConfig {
        omega: rotor.nominal_omega,
        max_airspeed: 80.0,
        points: 9,
        ..SweepConfig::default()
    };

    println!("Sweeping {} with {} inflow...", rotor.name, model.name());
    let history = sim::sweep(&model, &rotor, &config);

    println!("{:>8} {:>10} {:>10} {:>10}", "mu", "lambda_0", "lambda_1c", "lambda_1s");
    for h in &history {
        println!(
            "{:>8.4} {:>10.5} {:>10.5} {:>10.5}",
            h.mu, h.inflow.lambda_0, h.inflow.lambda_1c, h.inflow.lambda_1s
        );
    }
}
