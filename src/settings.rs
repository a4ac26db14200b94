//! Run configuration
//!
//! Loaded from JSON; any field left out takes its reference value.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("`{field}` must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Parameters of one run, fixed at start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Chimney length (m)
    pub length: f64,
    /// Stress proxy value above which the chimney snaps
    pub break_strength: f64,
    /// Initial lean from vertical (radians)
    pub initial_angle: f64,
    /// Fixed timestep (s)
    pub dt: f64,
    /// Simulated time limit (s)
    pub max_time: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            length: DEFAULT_LENGTH,
            break_strength: DEFAULT_BREAK_STRENGTH,
            initial_angle: DEFAULT_INITIAL_ANGLE_DEG.to_radians(),
            dt: DEFAULT_DT,
            max_time: DEFAULT_MAX_TIME,
        }
    }
}

impl SimConfig {
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_break_strength(mut self, break_strength: f64) -> Self {
        self.break_strength = break_strength;
        self
    }

    pub fn with_initial_angle(mut self, radians: f64) -> Self {
        self.initial_angle = radians;
        self
    }

    pub fn with_initial_angle_degrees(self, degrees: f64) -> Self {
        self.with_initial_angle(degrees.to_radians())
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_max_time(mut self, max_time: f64) -> Self {
        self.max_time = max_time;
        self
    }

    /// Check preconditions of the simulation core
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gravity", self.gravity),
            ("length", self.length),
            ("break_strength", self.break_strength),
            ("initial_angle", self.initial_angle),
            ("dt", self.dt),
            ("max_time", self.max_time),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        if self.length <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "length",
                value: self.length,
            });
        }
        if self.dt <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "dt",
                value: self.dt,
            });
        }
        if self.max_time < 0.0 {
            return Err(ConfigError::Negative {
                field: "max_time",
                value: self.max_time,
            });
        }
        Ok(())
    }

    /// Number of steps needed to cover `[0, max_time)`
    pub fn expected_steps(&self) -> usize {
        if self.dt > 0.0 && self.max_time.is_finite() && self.max_time > 0.0 {
            (self.max_time / self.dt).ceil() as usize
        } else {
            0
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file (not validated)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
