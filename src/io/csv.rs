use std::io::{self, Write};

use crate::sim::InflowStep;

/// Write an inflow history to CSV format.
///
/// Columns: step, mu, mu_z, c_t, lambda_0, lambda_1c, lambda_1s, iterations, status
pub fn write_history<W: Write>(writer: &mut W, history: &[InflowStep]) -> io::Result<()> {
    writeln!(
        writer,
        "step,mu,mu_z,c_t,lambda_0,lambda_1c,lambda_1s,iterations,status"
    )?;

    for h in history {
        writeln!(
            writer,
            "{},{:.6},{:.6},{:.6},{:.8},{:.8},{:.8},{},{:?}",
            h.index,
            h.mu,
            h.mu_z,
            h.c_t,
            h.inflow.lambda_0,
            h.inflow.lambda_1c,
            h.inflow.lambda_1s,
            h.iterations,
            h.status,
        )?;
    }

    Ok(())
}

/// Write an inflow history to a CSV file at the given path.
pub fn write_history_file(path: &str, history: &[InflowStep]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_history(&mut file, history)
}
