use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Rotor configuration (blade aerodynamics + disk geometry)
// ---------------------------------------------------------------------------

/// Fixed rotor/blade data shared read-only by every inflow solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotorConfig {
    pub name: String,
    pub lift_slope: f64,      // a0, 1/rad
    pub solidity: f64,        // s = Nb·c / (π·R)
    pub radius: f64,          // R, m
    pub twist: f64,           // θtw, rad (root to tip, linear)
    pub nominal_omega: f64,   // rad/s, front ends only
}

impl RotorConfig {
    /// Blade tip speed ΩR, m/s.
    pub fn tip_speed(&self, omega: f64) -> f64 {
        omega * self.radius
    }

    /// Rotor disk area πR², m^2.
    pub fn disk_area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Check the physical invariants the inflow model relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !(self.solidity.is_finite() && self.solidity > 0.0) {
            return Err(ConfigError::InvalidSolidity(self.solidity));
        }
        if !(self.lift_slope.is_finite() && self.lift_slope > 0.0) {
            return Err(ConfigError::InvalidLiftSlope(self.lift_slope));
        }
        if !self.twist.is_finite() {
            return Err(ConfigError::InvalidTwist(self.twist));
        }
        if !(self.nominal_omega.is_finite() && self.nominal_omega > 0.0) {
            return Err(ConfigError::InvalidRotorSpeed(self.nominal_omega));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: RotorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

// ---------------------------------------------------------------------------
// Rotor builder
// ---------------------------------------------------------------------------

pub struct RotorConfigBuilder {
    name: String,
    lift_slope: f64,
    solidity: f64,
    radius: f64,
    twist: f64,
    nominal_omega: f64,
}

impl RotorConfigBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lift_slope: 5.7,
            solidity: 0.08,
            radius: 5.5,
            twist: -0.14,
            nominal_omega: 35.0,
        }
    }

    pub fn lift_slope(mut self, v: f64) -> Self { self.lift_slope = v; self }
    pub fn solidity(mut self, v: f64) -> Self { self.solidity = v; self }
    pub fn radius(mut self, v: f64) -> Self { self.radius = v; self }
    pub fn twist(mut self, v: f64) -> Self { self.twist = v; self }
    pub fn nominal_omega(mut self, v: f64) -> Self { self.nominal_omega = v; self }

    /// Set solidity from blade count and constant chord. Uses the radius set so far.
    pub fn blades(mut self, count: u32, chord: f64) -> Self {
        self.solidity = count as f64 * chord / (PI * self.radius);
        self
    }

    pub fn build(self) -> Result<RotorConfig, ConfigError> {
        let config = RotorConfig {
            name: self.name,
            lift_slope: self.lift_slope,
            solidity: self.solidity,
            radius: self.radius,
            twist: self.twist,
            nominal_omega: self.nominal_omega,
        };
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Preset rotors
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Generic light-utility main rotor used as the reference case.
    pub fn reference() -> RotorConfig {
        RotorConfig {
            name: "Reference".into(),
            lift_slope: 5.7,
            solidity: 0.08,
            radius: 5.5,
            twist: -0.14,
            nominal_omega: 35.0,
        }
    }

    /// Hingeless four-bladed light twin main rotor.
    pub fn bo105() -> RotorConfig {
        RotorConfig {
            name: "Bo105".into(),
            lift_slope: 6.113,
            solidity: 0.07,
            radius: 4.91,
            twist: -0.14,
            nominal_omega: 44.4,
        }
    }

    /// Four-bladed medium utility main rotor.
    pub fn lynx() -> RotorConfig {
        RotorConfig {
            name: "Lynx".into(),
            lift_slope: 6.0,
            solidity: 0.078,
            radius: 6.4,
            twist: -0.14,
            nominal_omega: 35.63,
        }
    }

    /// Articulated four-bladed medium transport main rotor.
    pub fn puma() -> RotorConfig {
        RotorConfig {
            name: "Puma".into(),
            lift_slope: 5.73,
            solidity: 0.0918,
            radius: 7.5,
            twist: -0.14,
            nominal_omega: 27.0,
        }
    }

    /// Look up a preset by case-insensitive name.
    pub fn by_name(name: &str) -> Option<RotorConfig> {
        match name.to_ascii_lowercase().as_str() {
            "reference" => Some(reference()),
            "bo105" => Some(bo105()),
            "lynx" => Some(lynx()),
            "puma" => Some(puma()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for name in ["reference", "bo105", "lynx", "puma"] {
            let rotor = presets::by_name(name).unwrap();
            assert!(rotor.validate().is_ok(), "{} should validate", name);
        }
        assert!(presets::by_name("chinook").is_none());
    }

    #[test]
    fn blades_sets_solidity() {
        let rotor = RotorConfigBuilder::new("Four-blade")
            .radius(5.0)
            .blades(4, 0.3)
            .build()
            .unwrap();
        let expected = 4.0 * 0.3 / (PI * 5.0);
        assert!((rotor.solidity - expected).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_geometry() {
        let err = RotorConfigBuilder::new("Bad").radius(0.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRadius(_)));

        let err = RotorConfigBuilder::new("Bad").solidity(-0.01).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSolidity(_)));

        let err = RotorConfigBuilder::new("Bad").lift_slope(f64::NAN).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLiftSlope(_)));
    }

    #[test]
    fn json_round_trip_and_validation() {
        let json = serde_json::to_string(&presets::lynx()).unwrap();
        let parsed = RotorConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, presets::lynx());

        let bad = r#"{"name":"X","lift_slope":5.7,"solidity":0.0,"radius":5.0,"twist":0.0,"nominal_omega":30.0}"#;
        assert!(matches!(
            RotorConfig::from_json_str(bad),
            Err(ConfigError::InvalidSolidity(_))
        ));
        assert!(matches!(
            RotorConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn tip_speed_and_disk_area() {
        let rotor = presets::reference();
        assert!((rotor.tip_speed(35.0) - 192.5).abs() < 1e-9);
        assert!((rotor.disk_area() - PI * 30.25).abs() < 1e-9);
    }
}
