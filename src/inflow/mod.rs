pub mod harmonic;
pub mod model;
pub mod uniform;

pub use harmonic::{harmonic_inflow, HarmonicInflow};
pub use model::{zero_if_nan, HarmonicInflowModel, InflowModel, InflowSolution, UniformInflowModel};
pub use uniform::{momentum_residual, solve_uniform_inflow, Convergence, SolverSettings, UniformSolution};
