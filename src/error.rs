use thiserror::Error;

/// Errors raised while building or loading a rotor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rotor radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("rotor solidity must be positive and finite, got {0}")]
    InvalidSolidity(f64),
    #[error("lift-curve slope must be positive and finite, got {0}")]
    InvalidLiftSlope(f64),
    #[error("blade twist must be finite, got {0}")]
    InvalidTwist(f64),
    #[error("nominal rotor speed must be positive and finite, got {0}")]
    InvalidRotorSpeed(f64),
    #[error("solver relaxation must be positive and finite, got {0}")]
    InvalidRelaxation(f64),
    #[error("solver tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),
    #[error("solver iteration limit must be at least 1")]
    InvalidIterationLimit,
    #[error("solver residual fraction must be non-negative and finite, got {0}")]
    InvalidResidualFraction(f64),
    #[error("failed to read rotor configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed rotor configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
