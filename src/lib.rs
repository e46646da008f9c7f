//! First-harmonic (Glauert-type) induced inflow for helicopter rotor flight dynamics.
//!
//! The uniform inflow ratio comes from a damped quasi-Newton solve of the
//! momentum balance; the longitudinal/lateral harmonics follow in closed form
//! from disk tilt and body rates.

pub mod error;
pub mod inflow;
pub mod io;
pub mod rotor;
pub mod sim;

pub use error::ConfigError;
pub use inflow::{HarmonicInflowModel, InflowModel, InflowSolution, UniformInflowModel};
pub use rotor::{BladeForceState, BodyState, FlappingState, InflowState, PitchState, RotorConfig};
