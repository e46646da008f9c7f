pub mod runner;

pub use runner::{run, run_with, sweep, InflowStep, StepInputs, SweepConfig};
