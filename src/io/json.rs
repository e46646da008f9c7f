use std::io::{self, Write};

use serde::Serialize;

use crate::inflow::Convergence;
use crate::rotor::RotorConfig;
use crate::sim::InflowStep;

/// Summary statistics computed from an inflow history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSummary {
    pub points: usize,
    pub converged: usize,
    pub stalled: usize,
    pub degenerate: usize,
    pub iteration_limit: usize,
    pub lambda_0_min: f64,
    pub lambda_0_max: f64,
    pub mean_iterations: f64,
    pub max_abs_lambda_1c: f64,
    pub max_abs_lambda_1s: f64,
}

impl SweepSummary {
    /// Compute summary from history data.
    pub fn from_history(history: &[InflowStep]) -> Self {
        let count = |status: Convergence| history.iter().filter(|h| h.status == status).count();

        let lambda_0_min = history
            .iter()
            .map(|h| h.inflow.lambda_0)
            .fold(f64::INFINITY, f64::min);
        let lambda_0_max = history
            .iter()
            .map(|h| h.inflow.lambda_0)
            .fold(f64::NEG_INFINITY, f64::max);

        let mean_iterations = if history.is_empty() {
            0.0
        } else {
            history.iter().map(|h| h.iterations as f64).sum::<f64>() / history.len() as f64
        };

        SweepSummary {
            points: history.len(),
            converged: count(Convergence::Converged),
            stalled: count(Convergence::Stalled),
            degenerate: count(Convergence::Degenerate),
            iteration_limit: count(Convergence::IterationLimit),
            lambda_0_min: if history.is_empty() { 0.0 } else { lambda_0_min },
            lambda_0_max: if history.is_empty() { 0.0 } else { lambda_0_max },
            mean_iterations,
            max_abs_lambda_1c: history
                .iter()
                .map(|h| h.inflow.lambda_1c.abs())
                .fold(0.0_f64, f64::max),
            max_abs_lambda_1s: history
                .iter()
                .map(|h| h.inflow.lambda_1s.abs())
                .fold(0.0_f64, f64::max),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    rotor: &'a RotorConfig,
    summary: &'a SweepSummary,
}

/// Write rotor data and sweep summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    rotor: &RotorConfig,
    summary: &SweepSummary,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &Report { rotor, summary })?;
    writeln!(writer)
}

/// Write sweep summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    rotor: &RotorConfig,
    summary: &SweepSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, rotor, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotor::{presets, InflowState};

    fn step(index: usize, lambda_0: f64, iterations: usize, status: Convergence) -> InflowStep {
        InflowStep {
            index,
            mu: 0.05 * index as f64,
            mu_z: 0.0,
            c_t: 0.006,
            inflow: InflowState::new(lambda_0, 0.002, -0.004),
            iterations,
            status,
        }
    }

    #[test]
    fn summary_counts_statuses() {
        let history = vec![
            step(0, 0.055, 1, Convergence::Converged),
            step(1, 0.046, 4, Convergence::Converged),
            step(2, 0.0, 1, Convergence::Degenerate),
            step(3, 0.03, 10, Convergence::IterationLimit),
            step(4, 0.0002, 1, Convergence::Stalled),
        ];
        let s = SweepSummary::from_history(&history);
        assert_eq!(s.points, 5);
        assert_eq!(s.converged, 2);
        assert_eq!(s.stalled, 1);
        assert_eq!(s.degenerate, 1);
        assert_eq!(s.iteration_limit, 1);
        assert_eq!(s.lambda_0_min, 0.0);
        assert_eq!(s.lambda_0_max, 0.055);
        assert!((s.mean_iterations - 3.4).abs() < 1e-12);
        assert_eq!(s.max_abs_lambda_1s, 0.004);
    }

    #[test]
    fn empty_history_summary() {
        let s = SweepSummary::from_history(&[]);
        assert_eq!(s.points, 0);
        assert_eq!(s.lambda_0_max, 0.0);
        assert_eq!(s.mean_iterations, 0.0);
    }

    #[test]
    fn json_output_is_valid() {
        let history = vec![step(0, 0.05, 3, Convergence::Converged)];
        let summary = SweepSummary::from_history(&history);

        let mut buf = Vec::new();
        write_summary(&mut buf, &presets::reference(), &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["rotor"]["name"], "Reference");
        assert_eq!(value["summary"]["points"], 1);
        assert_eq!(value["summary"]["converged"], 1);
    }
}
