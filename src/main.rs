use anyhow::{anyhow, Context, Result};
use clap::Parser;

use rotor_inflow::inflow::{Convergence, HarmonicInflowModel, InflowModel, UniformInflowModel};
use rotor_inflow::io::{self, SweepSummary};
use rotor_inflow::rotor::{presets, RotorConfig};
use rotor_inflow::sim::{self, SweepConfig};

/// Forward-flight inflow sweep for a helicopter main rotor.
#[derive(Debug, Parser)]
#[command(name = "rotor-inflow", version)]
struct Args {
    /// Preset rotor: reference, bo105, lynx, puma
    #[arg(long, default_value = "reference")]
    preset: String,

    /// JSON rotor configuration file (overrides --preset)
    #[arg(long)]
    config: Option<String>,

    /// JSON sweep configuration file
    #[arg(long)]
    sweep: Option<String>,

    /// Thrust coefficient
    #[arg(long)]
    ct: Option<f64>,

    /// Rotor speed, rad/s (defaults to the rotor's nominal speed)
    #[arg(long)]
    omega: Option<f64>,

    /// Top airspeed of the sweep, m/s
    #[arg(long)]
    max_speed: Option<f64>,

    /// Number of sweep points
    #[arg(long)]
    points: Option<usize>,

    /// Climb rate, m/s (positive up)
    #[arg(long)]
    climb: Option<f64>,

    /// Drop the first-harmonic correction
    #[arg(long)]
    uniform_only: bool,

    /// Write the sweep history as CSV
    #[arg(long)]
    csv: Option<String>,

    /// Write the sweep summary as JSON
    #[arg(long)]
    json: Option<String>,
}

fn load_rotor(args: &Args) -> Result<RotorConfig> {
    match &args.config {
        Some(path) => RotorConfig::from_json_file(path)
            .with_context(|| format!("loading rotor configuration from {}", path)),
        None => presets::by_name(&args.preset)
            .ok_or_else(|| anyhow!("unknown rotor preset '{}'", args.preset)),
    }
}

fn load_sweep(args: &Args, rotor: &RotorConfig) -> Result<SweepConfig> {
    let mut config = match &args.sweep {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading sweep configuration from {}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing sweep configuration from {}", path))?
        }
        None => SweepConfig { omega: rotor.nominal_omega, ..SweepConfig::default() },
    };

    if let Some(v) = args.ct { config.c_t = v; }
    if let Some(v) = args.omega { config.omega = v; }
    if let Some(v) = args.max_speed { config.max_airspeed = v; }
    if let Some(v) = args.points { config.points = v; }
    if let Some(v) = args.climb { config.climb_rate = v; }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let rotor = load_rotor(&args)?;
    let config = load_sweep(&args, &rotor)?;

    let harmonic = HarmonicInflowModel::new(&rotor);
    let uniform = UniformInflowModel::new(&rotor);
    let model: &dyn InflowModel = if args.uniform_only { &uniform } else { &harmonic };

    // -----------------------------------------------------------------------
    // Run sweep
    // -----------------------------------------------------------------------
    let history = sim::sweep(model, &rotor, &config);
    let summary = SweepSummary::from_history(&history);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    let tip_speed = rotor.tip_speed(config.omega);
    println!();
    println!("====================================================================");
    println!("  ROTOR INFLOW SWEEP — {} ({} model)", rotor.name, model.name());
    println!("====================================================================");
    println!();
    println!("  Rotor Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Radius:        {:>8.2} m     Solidity:     {:>8.4}",
        rotor.radius, rotor.solidity
    );
    println!(
        "  Lift slope:    {:>8.3} /rad  Twist:        {:>8.2} deg",
        rotor.lift_slope,
        rotor.twist.to_degrees()
    );
    println!(
        "  Omega:         {:>8.2} rad/s Tip speed:    {:>8.1} m/s",
        config.omega, tip_speed
    );
    println!(
        "  C_T:           {:>8.5}       Climb rate:   {:>8.2} m/s",
        config.c_t, config.climb_rate
    );
    println!();

    println!("  Inflow");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>8}  {:>7}  {:>9}  {:>10}  {:>10}  {:>8}  {:>5}",
        "V (m/s)", "mu", "lambda_0", "lambda_1c", "lambda_1s", "v_i(m/s)", "iter"
    );
    println!("  {}", "─".repeat(66));

    for h in &history {
        let flag = match h.status {
            Convergence::Converged => "",
            Convergence::Stalled => "  STALLED",
            Convergence::Degenerate => "  DEGENERATE",
            Convergence::IterationLimit => "  NO CONVERGENCE",
        };
        println!(
            "  {:>8.1}  {:>7.4}  {:>9.5}  {:>10.6}  {:>10.6}  {:>8.2}  {:>5}{}",
            h.mu * tip_speed,
            h.mu,
            h.inflow.lambda_0,
            h.inflow.lambda_1c,
            h.inflow.lambda_1s,
            h.inflow.induced_velocity(config.omega, rotor.radius),
            h.iterations,
            flag,
        );
    }

    println!();
    println!("  Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Points: {}   converged: {}   stalled: {}   degenerate: {}   capped: {}",
        summary.points,
        summary.converged,
        summary.stalled,
        summary.degenerate,
        summary.iteration_limit
    );
    println!(
        "  lambda_0 range: {:.5} .. {:.5}   mean iterations: {:.1}",
        summary.lambda_0_min, summary.lambda_0_max, summary.mean_iterations
    );
    println!("====================================================================");
    println!();

    if let Some(path) = &args.csv {
        io::write_history_file(path, &history)
            .with_context(|| format!("writing CSV to {}", path))?;
        log::info!("Wrote inflow history to {}", path);
    }
    if let Some(path) = &args.json {
        io::write_summary_file(path, &rotor, &summary)
            .with_context(|| format!("writing JSON to {}", path))?;
        log::info!("Wrote sweep summary to {}", path);
    }

    Ok(())
}
