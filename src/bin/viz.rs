use eframe::egui;
use egui_plot::{Legend, Line, Plot};

use rotor_inflow::inflow::{HarmonicInflowModel, UniformInflowModel};
use rotor_inflow::rotor::{presets, RotorConfig};
use rotor_inflow::sim::{self, InflowStep, SweepConfig};

fn main() -> eframe::Result {
    env_logger::init();

    let rotor = presets::reference();
    let config = SweepConfig {
        omega: rotor.nominal_omega,
        max_airspeed: 0.45 * rotor.tip_speed(rotor.nominal_omega),
        points: 200,
        ..SweepConfig::default()
    };
    let harmonic = sim::sweep(&HarmonicInflowModel::new(&rotor), &rotor, &config);
    let uniform = sim::sweep(&UniformInflowModel::new(&rotor), &rotor, &config);

    let app = InflowViz { rotor, config, harmonic, uniform };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Rotor Inflow", options, Box::new(|_| Ok(Box::new(app))))
}

struct InflowViz {
    rotor: RotorConfig,
    config: SweepConfig,
    harmonic: Vec<InflowStep>,
    uniform: Vec<InflowStep>,
}

fn series(history: &[InflowStep], f: impl Fn(&InflowStep) -> f64) -> Vec<[f64; 2]> {
    history.iter().map(|h| [h.mu, f(h)]).collect()
}

impl eframe::App for InflowViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Rotor: {}", self.rotor.name));
            ui.label(format!(
                "R = {:.2} m  |  s = {:.4}  |  a0 = {:.2}  |  C_T = {:.4}  |  Omega = {:.1} rad/s",
                self.rotor.radius,
                self.rotor.solidity,
                self.rotor.lift_slope,
                self.config.c_t,
                self.config.omega,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let h = available.y - 16.0;

            ui.horizontal(|ui| {
                // Uniform inflow vs advance ratio
                ui.vertical(|ui| {
                    ui.label("Uniform inflow λ0");
                    Plot::new("lambda_0")
                        .width(half_w)
                        .height(h)
                        .x_axis_label("Advance ratio μ")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Harmonic", series(&self.harmonic, |s| s.inflow.lambda_0)));
                            plot_ui.line(Line::new("Uniform", series(&self.uniform, |s| s.inflow.lambda_0)));
                        });
                });

                // First harmonics vs advance ratio
                ui.vertical(|ui| {
                    ui.label("First-harmonic inflow");
                    Plot::new("harmonics")
                        .width(half_w)
                        .height(h)
                        .x_axis_label("Advance ratio μ")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("λ1c", series(&self.harmonic, |s| s.inflow.lambda_1c)));
                            plot_ui.line(Line::new("λ1s", series(&self.harmonic, |s| s.inflow.lambda_1s)));
                        });
                });
            });
        });
    }
}
