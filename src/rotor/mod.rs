pub mod config;
pub mod state;

pub use config::{presets, RotorConfig, RotorConfigBuilder};
pub use state::{BladeForceState, BodyState, FlappingState, InflowState, PitchState};
